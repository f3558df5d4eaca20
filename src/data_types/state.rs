use super::geometry::{Rect, Size};
use crate::element::DrawableHandle;
use std::collections::HashMap;

/// Per-item status for one render pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ItemStatus {
    Enter,
    Live,
    Exit,
}

/// Which end of the item sequence a transition is anchored to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TransitionEdge {
    /// Low-index end.
    Head,
    /// High-index end.
    Tail,
}

/// One realized (or filtered-out) item of a series.
#[derive(Clone, Debug, PartialEq)]
pub struct ItemState {
    pub index: usize,
    pub component1: f64,
    pub component2: f64,
    pub category_offset: f64,
    /// `None` when the item is present but has no visual (filtered or missing value).
    pub element: Option<DrawableHandle>,
    pub status: ItemStatus,
}

impl ItemState {
    pub fn new(index: usize, value: f64, category_offset: f64) -> Self {
        Self {
            index,
            component1: index as f64 + category_offset,
            component2: value,
            category_offset,
            element: None,
            status: ItemStatus::Enter,
        }
    }

    /// Moves the item to `index`, keeping `component1` in step.
    pub fn reindex(&mut self, index: usize) {
        self.index = index;
        self.component1 = index as f64 + self.category_offset;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RenderType {
    Full,
    TransformsOnly,
}

/// Per-component data resolved once per pass.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderContext {
    pub component: String,
    /// Rectangle the component renders into (claimed, or the data area).
    pub area: Rect,
    /// Final data area of the pass.
    pub data_area: Rect,
    pub dimensions: Size,
    pub render_type: RenderType,
}

/// Surface-level state owned by the orchestrator.
#[derive(Clone, Debug)]
pub struct LayoutState {
    pub dimensions: Size,
    pub layout_rect: Rect,
    pub render_type: RenderType,
    render_contexts: HashMap<String, RenderContext>,
}

impl LayoutState {
    pub fn new(dimensions: Size, layout_rect: Rect) -> Self {
        Self {
            dimensions,
            layout_rect,
            render_type: RenderType::Full,
            render_contexts: HashMap::new(),
        }
    }

    /// Starts a pass: clears the render-context cache.
    pub fn begin_pass(&mut self, render_type: RenderType) {
        self.render_type = render_type;
        self.render_contexts.clear();
    }

    pub fn cached_context(&self, component: &str) -> Option<&RenderContext> {
        self.render_contexts.get(component)
    }

    pub fn render_context(
        &mut self,
        component: &str,
        build: impl FnOnce() -> (Rect, Rect),
    ) -> &RenderContext {
        let dimensions = self.dimensions;
        let render_type = self.render_type;
        self.render_contexts
            .entry(component.to_string())
            .or_insert_with(|| {
                let (area, data_area) = build();
                RenderContext {
                    component: component.to_string(),
                    area,
                    data_area,
                    dimensions,
                    render_type,
                }
            })
    }

    pub fn cached_count(&self) -> usize {
        self.render_contexts.len()
    }
}
