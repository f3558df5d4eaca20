//! State lent to components while a pass runs.

use crate::data_types::{AxisSnapshot, LayoutState, Rect, RenderContext, RenderType};
use crate::element::{AnimationController, DrawableHandle, ElementFactory, ElementRequest, Scene};
use crate::error::ChartError;
use crate::event_bus::Message;
use crate::layout::LayoutNegotiator;
use crate::recycler::RecycleOutcome;
use crate::validation::ValidationCollector;
use std::collections::{HashMap, VecDeque};

/// Latest snapshot of every axis, keyed by axis name.
///
/// Kept by the orchestrator across passes so transforms-only passes see the
/// extents frozen by the last full pass.
#[derive(Clone, Debug, Default)]
pub struct AxisExtents {
    axes: HashMap<String, AxisSnapshot>,
}

impl AxisExtents {
    pub fn insert(&mut self, snapshot: AxisSnapshot) {
        self.axes.insert(snapshot.name.clone(), snapshot);
    }

    pub fn get(&self, name: &str) -> Option<&AxisSnapshot> {
        self.axes.get(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<AxisSnapshot> {
        self.axes.remove(name)
    }

    /// Looks an axis up on behalf of `component`.
    pub fn resolve(&self, component: &str, axis: &str) -> Result<&AxisSnapshot, ChartError> {
        self.axes.get(axis).ok_or_else(|| ChartError::UnresolvedAxis {
            component: component.to_string(),
            axis: axis.to_string(),
        })
    }

    /// `true` if any final snapshot widened during the pass.
    pub fn any_dirty(&self) -> bool {
        self.axes.values().any(|s| s.is_final && s.dirty)
    }

    pub fn len(&self) -> usize {
        self.axes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.axes.is_empty()
    }
}

/// Placements and removals collected during a pass, applied by the orchestrator.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SceneChanges {
    pub place: Vec<DrawableHandle>,
    pub remove: Vec<DrawableHandle>,
}

impl SceneChanges {
    pub fn is_empty(&self) -> bool {
        self.place.is_empty() && self.remove.is_empty()
    }
}

pub struct PassContext<'a> {
    pub render_type: RenderType,
    pub layout: &'a mut LayoutNegotiator,
    pub layout_state: &'a mut LayoutState,
    pub extents: &'a mut AxisExtents,
    pub validation: &'a mut ValidationCollector,
    pub scene: &'a mut dyn Scene,
    pub animation: &'a mut dyn AnimationController,
    factory: &'a mut dyn ElementFactory,
    factory_calls: usize,
    changes: SceneChanges,
    posted: VecDeque<Message>,
}

impl<'a> PassContext<'a> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        render_type: RenderType,
        layout: &'a mut LayoutNegotiator,
        layout_state: &'a mut LayoutState,
        extents: &'a mut AxisExtents,
        validation: &'a mut ValidationCollector,
        factory: &'a mut dyn ElementFactory,
        scene: &'a mut dyn Scene,
        animation: &'a mut dyn AnimationController,
    ) -> Self {
        Self {
            render_type,
            layout,
            layout_state,
            extents,
            validation,
            scene,
            animation,
            factory,
            factory_calls: 0,
            changes: SceneChanges::default(),
            posted: VecDeque::new(),
        }
    }

    /// Queues a message for delivery after the current one.
    pub fn post(&mut self, message: Message) {
        self.posted.push_back(message);
    }

    pub(crate) fn next_posted(&mut self) -> Option<Message> {
        self.posted.pop_front()
    }

    /// Bookkeeping done before a message reaches its subscribers.
    pub(crate) fn record(&mut self, message: &Message) {
        if let Message::AxisExtents(snapshot) = message {
            self.extents.insert(snapshot.clone());
        }
    }

    pub fn create_element(&mut self, request: &ElementRequest<'_>) -> DrawableHandle {
        self.factory_calls += 1;
        self.factory.create(request)
    }

    pub fn factory_calls(&self) -> usize {
        self.factory_calls
    }

    /// Schedules the recycler's leftovers for removal and its new handles for placement.
    pub fn commit(&mut self, outcome: RecycleOutcome<DrawableHandle>) {
        self.changes.remove.extend(outcome.unused);
        self.changes.place.extend(outcome.created);
    }

    pub fn retire(&mut self, handle: DrawableHandle) {
        self.changes.remove.push(handle);
    }

    pub fn take_changes(&mut self) -> SceneChanges {
        std::mem::take(&mut self.changes)
    }

    /// Data area of this pass; equals the remaining layout rectangle.
    pub fn data_area(&self) -> Rect {
        self.layout.remaining()
    }

    /// Per-component context, cached once layout is final.
    pub fn render_context(&mut self, component: &str) -> RenderContext {
        let area = self.layout.rect_for(component);
        let data_area = self.layout.remaining();
        if !self.layout.is_finalized() {
            return RenderContext {
                component: component.to_string(),
                area,
                data_area,
                dimensions: self.layout_state.dimensions,
                render_type: self.render_type,
            };
        }
        self.layout_state
            .render_context(component, || (area, data_area))
            .clone()
    }
}
