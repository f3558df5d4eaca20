//! Contracts for the collaborators the core drives: the element factory, the
//! retained scene and the optional animation controller.

use crate::data_types::TransitionEdge;
use glam::{DAffine2, DVec2};

/// Opaque id of a retained drawable, minted by the host's factory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DrawableHandle(pub u64);

/// What a component asks the factory for.
#[derive(Clone, Debug, PartialEq)]
pub enum ElementKind {
    /// Point marker, positioned by translation.
    Marker,
    /// Unit square stretched onto a column rectangle.
    Column,
    /// Axis tick with its formatted label.
    AxisTick { label: String },
    /// Unit-length line stretched across the data area.
    GridLine,
}

/// Everything the factory may look at when creating a drawable.
#[derive(Clone, Debug, PartialEq)]
pub struct ElementRequest<'a> {
    pub component: &'a str,
    pub kind: ElementKind,
    /// Category/value axis pair for series elements.
    pub axes: Option<(&'a str, &'a str)>,
    pub index: Option<usize>,
}

pub trait ElementFactory {
    /// Creates a drawable. Positioning is applied afterwards by the core.
    fn create(&mut self, request: &ElementRequest<'_>) -> DrawableHandle;
}

/// The host's retained scene.
pub trait Scene {
    fn place(&mut self, handle: DrawableHandle);
    fn remove(&mut self, handle: DrawableHandle);
    fn set_transform(&mut self, handle: DrawableHandle, transform: DAffine2);

    /// Updates the text of a reused label-bearing drawable.
    fn set_text(&mut self, _handle: DrawableHandle, _text: &str) {}
}

/// Optional animation hooks. Every method returns `false` when no animation
/// was applied, in which case the caller applies the change directly.
pub trait AnimationController {
    fn enter(&mut self, _handle: DrawableHandle, _edge: TransitionEdge) -> bool {
        false
    }

    /// Returning `true` hands removal of `handle` over to the controller.
    fn exit(&mut self, _handle: DrawableHandle, _edge: TransitionEdge) -> bool {
        false
    }

    /// `delta` is the on-screen shift in pixels of a reindexed item.
    fn offset(&mut self, _handle: DrawableHandle, _delta: DVec2) -> bool {
        false
    }

    fn transform(&mut self, _handle: DrawableHandle, _target: DAffine2) -> bool {
        false
    }
}

/// Applies every change immediately.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoAnimation;

impl AnimationController for NoAnimation {}

/// Host collaborators lent to the orchestrator for one trigger.
pub struct HostServices<'a> {
    pub factory: &'a mut dyn ElementFactory,
    pub scene: &'a mut dyn Scene,
    pub animation: &'a mut dyn AnimationController,
}

impl<'a> HostServices<'a> {
    pub fn new(
        factory: &'a mut dyn ElementFactory,
        scene: &'a mut dyn Scene,
        animation: &'a mut dyn AnimationController,
    ) -> Self {
        Self {
            factory,
            scene,
            animation,
        }
    }
}
