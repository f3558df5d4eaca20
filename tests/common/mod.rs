#![allow(dead_code)]

use chart_engine::context::AxisExtents;
use chart_engine::data_types::{LayoutState, Rect, RenderType, Size, TransitionEdge};
use chart_engine::element::{
    AnimationController, DrawableHandle, ElementFactory, ElementKind, ElementRequest,
    HostServices, NoAnimation, Scene,
};
use chart_engine::layout::LayoutNegotiator;
use chart_engine::validation::ValidationCollector;
use chart_engine::PassContext;
use glam::{DAffine2, DVec2};
use std::collections::{HashMap, HashSet};

/// Factory handing out sequential handles and remembering every request.
#[derive(Default)]
pub struct CountingFactory {
    next: u64,
    pub requests: Vec<(DrawableHandle, String, ElementKind, Option<usize>)>,
}

impl CountingFactory {
    pub fn calls(&self) -> usize {
        self.requests.len()
    }

    pub fn count_kind(&self, matches: impl Fn(&ElementKind) -> bool) -> usize {
        self.requests.iter().filter(|(_, _, kind, _)| matches(kind)).count()
    }

    pub fn handles_of(&self, component: &str) -> Vec<DrawableHandle> {
        self.requests
            .iter()
            .filter(|(_, c, _, _)| c == component)
            .map(|(h, _, _, _)| *h)
            .collect()
    }

    /// Handle created for item `index` of `component`, if any.
    pub fn handle_for_item(&self, component: &str, index: usize) -> Option<DrawableHandle> {
        self.requests
            .iter()
            .find(|(_, c, _, i)| c == component && *i == Some(index))
            .map(|(h, _, _, _)| *h)
    }

    pub fn labels(&self) -> Vec<String> {
        self.requests
            .iter()
            .filter_map(|(_, _, kind, _)| match kind {
                ElementKind::AxisTick { label } => Some(label.clone()),
                _ => None,
            })
            .collect()
    }
}

impl ElementFactory for CountingFactory {
    fn create(&mut self, request: &ElementRequest<'_>) -> DrawableHandle {
        self.next += 1;
        let handle = DrawableHandle(self.next);
        self.requests.push((
            handle,
            request.component.to_string(),
            request.kind.clone(),
            request.index,
        ));
        handle
    }
}

/// Scene that only records what the core asks of it.
#[derive(Default)]
pub struct RecordingScene {
    pub placed: HashSet<DrawableHandle>,
    pub transforms: HashMap<DrawableHandle, DAffine2>,
    pub texts: HashMap<DrawableHandle, String>,
    pub removals: usize,
}

impl Scene for RecordingScene {
    fn place(&mut self, handle: DrawableHandle) {
        self.placed.insert(handle);
    }

    fn remove(&mut self, handle: DrawableHandle) {
        self.removals += 1;
        self.placed.remove(&handle);
    }

    fn set_transform(&mut self, handle: DrawableHandle, transform: DAffine2) {
        self.transforms.insert(handle, transform);
    }

    fn set_text(&mut self, handle: DrawableHandle, text: &str) {
        self.texts.insert(handle, text.to_string());
    }
}

/// Takes over every exit animation, so the core never removes exiting items.
#[derive(Default)]
pub struct ExitAnimator {
    pub exits: Vec<(DrawableHandle, TransitionEdge)>,
}

impl AnimationController for ExitAnimator {
    fn exit(&mut self, handle: DrawableHandle, edge: TransitionEdge) -> bool {
        self.exits.push((handle, edge));
        true
    }
}

/// Records every offset request and leaves repositioning to the core.
#[derive(Default)]
pub struct OffsetAnimator {
    pub offsets: Vec<(DrawableHandle, DVec2)>,
}

impl AnimationController for OffsetAnimator {
    fn offset(&mut self, handle: DrawableHandle, delta: DVec2) -> bool {
        self.offsets.push((handle, delta));
        false
    }
}

/// Host collaborators for chart-level tests.
#[derive(Default)]
pub struct Host<A = NoAnimation> {
    pub factory: CountingFactory,
    pub scene: RecordingScene,
    pub animation: A,
}

impl<A: AnimationController> Host<A> {
    pub fn services(&mut self) -> HostServices<'_> {
        HostServices::new(&mut self.factory, &mut self.scene, &mut self.animation)
    }
}

/// Owns everything a `PassContext` borrows, for driving components directly.
pub struct Fixture {
    pub layout: LayoutNegotiator,
    pub state: LayoutState,
    pub extents: AxisExtents,
    pub validation: ValidationCollector,
    pub factory: CountingFactory,
    pub scene: RecordingScene,
    pub animation: NoAnimation,
}

impl Fixture {
    pub fn new(width: f64, height: f64) -> Self {
        let size = Size::new(width, height);
        let rect = Rect::from_size(size);
        Self {
            layout: LayoutNegotiator::new(rect, LayoutNegotiator::DEFAULT_QUOTA),
            state: LayoutState::new(size, rect),
            extents: AxisExtents::default(),
            validation: ValidationCollector::default(),
            factory: CountingFactory::default(),
            scene: RecordingScene::default(),
            animation: NoAnimation,
        }
    }

    pub fn ctx(&mut self) -> PassContext<'_> {
        PassContext::new(
            RenderType::Full,
            &mut self.layout,
            &mut self.state,
            &mut self.extents,
            &mut self.validation,
            &mut self.factory,
            &mut self.scene,
            &mut self.animation,
        )
    }
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
