//! Chart orchestrator
//!
//! `Chart` owns the registered components, the data sources and the layout
//! state of the drawing surface. Each trigger (a resize or an explicit
//! [`Chart::render`]) runs one synchronous layout pass through the event bus:
//! a full pass when data or the component set changed, a transforms-only
//! pass otherwise.

use crate::context::{AxisExtents, PassContext, SceneChanges};
use crate::data_types::{
    ChartConfig, DataSource, ErasedOperation, ErasedSource, LayoutState, Rect, RenderType, Size,
};
use crate::element::{DrawableHandle, HostServices, Scene};
use crate::error::ChartError;
use crate::event_bus::{Component, ComponentRole, EventBus, Message};
use crate::layout::LayoutNegotiator;
use crate::plot_types::{AxisComponent, Gridlines};
use crate::validation::{ValidationCollector, ValidationResult};
use tracing::{debug, info};

/// Outcome of one trigger.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PassReport {
    /// `None` when the pass was skipped.
    pub render_type: Option<RenderType>,
    pub dimensions: Size,
    pub validation: Vec<ValidationResult>,
    /// Factory invocations during the pass.
    pub created: usize,
    /// Handles removed from the scene.
    pub removed: usize,
    /// `true` if an axis widened past its previously frozen bounds.
    pub extents_changed: bool,
}

impl PassReport {
    fn skipped(dimensions: Size) -> Self {
        Self {
            dimensions,
            ..Self::default()
        }
    }

    pub fn is_skipped(&self) -> bool {
        self.render_type.is_none()
    }
}

pub struct Chart {
    config: ChartConfig,
    bus: EventBus,
    sources: Vec<Box<dyn ErasedSource>>,
    layout_state: Option<LayoutState>,
    /// Snapshots frozen by the last full pass.
    extents: AxisExtents,
    /// Set when the component or source set changed since the last full pass.
    replay: bool,
    /// Elements of detached components, removed on the next pass.
    retired: Vec<DrawableHandle>,
    data_area: Rect,
}

impl Chart {
    pub fn new(config: ChartConfig) -> Self {
        Self {
            config,
            bus: EventBus::new(),
            sources: Vec::new(),
            layout_state: None,
            extents: AxisExtents::default(),
            replay: true,
            retired: Vec::new(),
            data_area: Rect::default(),
        }
    }

    /// Builds a chart with one axis component per configured axis, plus gridlines.
    pub fn from_config(config: ChartConfig) -> Result<Self, ChartError> {
        let mut chart = Self::new(config.clone());
        for axis in config.axes {
            chart.add_component(AxisComponent::new(axis))?;
        }
        if let Some(gridlines) = config.gridlines {
            chart.add_component(Gridlines::new(gridlines))?;
        }
        Ok(chart)
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn component(&self, name: &str) -> Option<&dyn Component> {
        self.bus.component(name)
    }

    pub fn extents(&self) -> &AxisExtents {
        &self.extents
    }

    pub fn layout_state(&self) -> Option<&LayoutState> {
        self.layout_state.as_ref()
    }

    /// Data area computed by the last pass.
    pub fn data_area(&self) -> Rect {
        self.data_area
    }

    pub fn add_component<C: Component + 'static>(&mut self, component: C) -> Result<(), ChartError> {
        self.bus.register(Box::new(component))?;
        self.replay = true;
        Ok(())
    }

    /// Detaches a component; its elements leave the scene on the next pass.
    pub fn remove_component(&mut self, name: &str) -> Option<Box<dyn Component>> {
        let component = self.bus.unregister(name)?;
        self.retired.extend(component.elements());
        if component.role() == ComponentRole::Axis {
            self.extents.remove(name);
        }
        self.replay = true;
        debug!(component = name, "component removed");
        Some(component)
    }

    /// Registers a data source under its own name.
    pub fn add_data_source<T>(&mut self, source: &DataSource<T>) -> Result<(), ChartError>
    where
        T: Clone + Send + Sync + 'static,
    {
        if self.has_data_source(source.name()) {
            return Err(ChartError::DuplicateDataSource(source.name().to_string()));
        }
        self.sources.push(Box::new(source.clone()));
        self.replay = true;
        Ok(())
    }

    pub fn has_data_source(&self, name: &str) -> bool {
        self.sources.iter().any(|s| s.name() == name)
    }

    /// Handles a surface resize. Skips the pass for a zero-size surface or
    /// unchanged dimensions.
    pub fn on_size_changed(&mut self, size: Size, host: &mut HostServices<'_>) -> PassReport {
        if size.is_empty() {
            debug!(?size, "zero-size surface, pass skipped");
            return PassReport::skipped(size);
        }
        if self.layout_state.as_ref().is_some_and(|s| s.dimensions == size) {
            debug!(?size, "dimensions unchanged, pass skipped");
            return PassReport::skipped(size);
        }
        let layout_rect = Rect::from_size(size).deflate(self.config.padding);
        self.layout_state = Some(LayoutState::new(size, layout_rect));
        self.run_pass(host)
    }

    /// Runs a pass against the current surface, if there is one.
    pub fn render(&mut self, host: &mut HostServices<'_>) -> PassReport {
        let Some(dimensions) = self.layout_state.as_ref().map(|s| s.dimensions) else {
            debug!("no surface yet, pass skipped");
            return PassReport::skipped(Size::default());
        };
        if dimensions.is_empty() {
            return PassReport::skipped(dimensions);
        }
        self.run_pass(host)
    }

    fn needs_full_pass(&self) -> bool {
        self.replay || self.sources.iter().any(|s| s.is_dirty())
    }

    /// Operations to publish this pass, in source registration order.
    fn collect_operations(&self) -> Vec<(String, Vec<ErasedOperation>)> {
        self.sources
            .iter()
            .map(|source| {
                let operations = if self.replay {
                    vec![source.snapshot()]
                } else {
                    source.drain()
                };
                (source.name().to_string(), operations)
            })
            .filter(|(_, operations)| !operations.is_empty())
            .collect()
    }

    fn run_pass(&mut self, host: &mut HostServices<'_>) -> PassReport {
        let render_type = if self.needs_full_pass() {
            RenderType::Full
        } else {
            RenderType::TransformsOnly
        };
        let operations = match render_type {
            RenderType::Full => self.collect_operations(),
            RenderType::TransformsOnly => Vec::new(),
        };

        let Some(state) = self.layout_state.as_mut() else {
            return PassReport::skipped(Size::default());
        };
        let dimensions = state.dimensions;
        info!(?render_type, width = dimensions.width, height = dimensions.height, "layout pass");

        state.begin_pass(render_type);
        let mut layout = LayoutNegotiator::new(state.layout_rect, self.config.layout_quota);
        let mut validation = ValidationCollector::default();
        let mut ctx = PassContext::new(
            render_type,
            &mut layout,
            state,
            &mut self.extents,
            &mut validation,
            &mut *host.factory,
            &mut *host.scene,
            &mut *host.animation,
        );
        for handle in self.retired.drain(..) {
            ctx.retire(handle);
        }
        if render_type == RenderType::Full {
            for component in self.bus.components() {
                let Some(source) = component.data_source() else {
                    continue;
                };
                if !self.sources.iter().any(|s| s.name() == source) {
                    let error = ChartError::UnresolvedDataSource {
                        component: component.name().to_string(),
                        source_name: source.to_string(),
                    };
                    ctx.validation.report_error(component.name(), &error);
                }
            }
        }

        let mut removed = 0;
        let mut extents_changed = false;
        match render_type {
            RenderType::Full => {
                broadcast(&mut self.bus, Message::InitializeAxes, &mut ctx);
                broadcast(&mut self.bus, Message::Layout, &mut ctx);
                ctx.layout.finalize_rects();
                broadcast(&mut self.bus, Message::LayoutComplete, &mut ctx);
                for (source, source_operations) in operations {
                    for operation in source_operations {
                        let message = Message::DataSourceOperation {
                            source: source.clone(),
                            operation,
                        };
                        broadcast(&mut self.bus, message, &mut ctx);
                    }
                }
                broadcast(&mut self.bus, Message::RenderComponents, &mut ctx);
                broadcast(&mut self.bus, Message::FinalizeAxes, &mut ctx);
                extents_changed = ctx.extents.any_dirty();
                broadcast(&mut self.bus, Message::RenderAxes, &mut ctx);
            }
            RenderType::TransformsOnly => {
                broadcast(&mut self.bus, Message::Layout, &mut ctx);
                ctx.layout.finalize_rects();
                broadcast(&mut self.bus, Message::LayoutComplete, &mut ctx);
            }
        }
        // New elements must be in the scene before they are positioned.
        let changes = ctx.take_changes();
        removed += apply_changes(&changes, &mut *ctx.scene);
        broadcast(&mut self.bus, Message::RenderTransforms, &mut ctx);
        let late = ctx.take_changes();
        removed += apply_changes(&late, &mut *ctx.scene);

        let created = ctx.factory_calls();
        let data_area = ctx.data_area();
        drop(ctx);

        self.data_area = data_area;
        if render_type == RenderType::Full {
            self.replay = false;
        }
        let validation = validation.take();
        debug!(
            created,
            removed,
            extents_changed,
            issues = validation.len(),
            "layout pass complete"
        );
        PassReport {
            render_type: Some(render_type),
            dimensions,
            validation,
            created,
            removed,
            extents_changed,
        }
    }
}

fn broadcast(bus: &mut EventBus, message: Message, ctx: &mut PassContext<'_>) {
    if let Err(error) = bus.publish(message, ctx) {
        ctx.validation.report_error("chart", &error);
    }
}

/// Applies removals, then placements. Returns the number of removals.
fn apply_changes(changes: &SceneChanges, scene: &mut dyn Scene) -> usize {
    for handle in &changes.remove {
        scene.remove(*handle);
    }
    for handle in &changes.place {
        scene.place(*handle);
    }
    changes.remove.len()
}
