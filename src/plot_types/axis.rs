use crate::context::PassContext;
use crate::data_types::{
    AxisConfig, AxisExtent, AxisKind, AxisOrientation, AxisSide, AxisSnapshot,
};
use crate::element::{DrawableHandle, ElementKind, ElementRequest};
use crate::event_bus::{Component, ComponentRole, Message, MessageKind};
use crate::recycler::Recycler;
use crate::scales::{format_tick, nice_ticks, MAX_TICKS};
use crate::transform::{model, projection_for_quadrant, Quadrant, TransformCache};
use glam::{DAffine2, DVec2};

const SUBSCRIPTIONS: &[MessageKind] = &[
    MessageKind::InitializeAxes,
    MessageKind::Layout,
    MessageKind::DataExtent,
    MessageKind::FinalizeAxes,
    MessageKind::RenderAxes,
    MessageKind::RenderTransforms,
];

/// A single tick: its value on the axis and its label.
#[derive(Clone, Debug, PartialEq)]
pub struct Tick {
    pub value: f64,
    pub label: String,
}

/// Axis component: tracks extents, claims its strip and renders tick elements.
pub struct AxisComponent {
    config: AxisConfig,
    extent: AxisExtent,
    /// Bounds accepted by the last full pass.
    frozen: Option<(f64, f64)>,
    ticks: Vec<Tick>,
    tick_elements: Vec<(f64, DrawableHandle)>,
    transform: TransformCache,
    ticks_moved: bool,
}

impl AxisComponent {
    pub fn new(config: AxisConfig) -> Self {
        let extent = AxisExtent::new(config.limit_minimum, config.limit_maximum);
        Self {
            config,
            extent,
            frozen: None,
            ticks: Vec::new(),
            tick_elements: Vec::new(),
            transform: TransformCache::new(),
            ticks_moved: false,
        }
    }

    pub fn config(&self) -> &AxisConfig {
        &self.config
    }

    pub fn extent(&self) -> &AxisExtent {
        &self.extent
    }

    pub fn ticks(&self) -> &[Tick] {
        &self.ticks
    }

    pub fn snapshot(&self, is_final: bool, dirty: bool) -> AxisSnapshot {
        AxisSnapshot {
            name: self.config.name.clone(),
            kind: self.config.kind,
            orientation: self.config.orientation,
            side: self.config.effective_side(),
            minimum: self.extent.minimum,
            maximum: self.extent.maximum,
            reversed: self.config.reversed,
            is_final,
            dirty,
        }
    }

    fn compute_ticks(&self) -> Vec<Tick> {
        let Some((min, max)) = self.extent.bounds() else {
            return Vec::new();
        };
        match self.config.kind {
            AxisKind::Value => nice_ticks(min, max, self.config.tick_count)
                .into_iter()
                .map(|value| Tick {
                    value,
                    label: format_tick(value, max - min, &self.config.format),
                })
                .collect(),
            AxisKind::Category => {
                let first = min.max(0.0).floor() as usize;
                let last = max.max(0.0).ceil() as usize;
                let count = last.saturating_sub(first);
                let budget = self.config.tick_count.clamp(1, MAX_TICKS);
                let stride = count.div_ceil(budget).max(1);
                (first..last)
                    .step_by(stride)
                    .map(|i| i as f64 + 0.5)
                    .filter(|center| *center >= min && *center <= max)
                    .map(|center| Tick {
                        value: center,
                        label: format!("{}", center.floor() as usize),
                    })
                    .collect()
            }
        }
    }

    fn render_ticks(&mut self, ctx: &mut PassContext<'_>) {
        let ticks = self.compute_ticks();
        let mut recycler = Recycler::default();
        let mut kept = Vec::with_capacity(ticks.len());
        let mut old = std::mem::take(&mut self.tick_elements);

        // Ticks whose value survives keep their element and label.
        for tick in &ticks {
            if let Some(pos) = old.iter().position(|(v, _)| *v == tick.value) {
                kept.push(Some(old.swap_remove(pos).1));
            } else {
                kept.push(None);
            }
        }
        for (_, handle) in old {
            recycler.recycle(handle);
        }

        for (tick, slot) in ticks.iter().zip(kept) {
            let handle = match slot {
                Some(handle) => handle,
                None => {
                    let request = ElementRequest {
                        component: &self.config.name,
                        kind: ElementKind::AxisTick {
                            label: tick.label.clone(),
                        },
                        axes: None,
                        index: None,
                    };
                    let (created, handle) =
                        recycler.next(&request, |r| ctx.create_element(r));
                    if !created {
                        ctx.scene.set_text(handle, &tick.label);
                    }
                    handle
                }
            };
            self.tick_elements.push((tick.value, handle));
        }

        ctx.commit(recycler.finish());
        self.ticks = ticks;
        self.ticks_moved = true;
    }

    /// Directions the axis strip grows in, with unit `0` on the data-area edge.
    fn quadrant(&self) -> Quadrant {
        let forward = !self.config.reversed;
        match (self.config.orientation, self.config.effective_side()) {
            (AxisOrientation::Horizontal, AxisSide::Top) => Quadrant::from_directions(forward, true),
            (AxisOrientation::Horizontal, _) => Quadrant::from_directions(forward, false),
            (AxisOrientation::Vertical, AxisSide::Right) => Quadrant::from_directions(true, forward),
            (AxisOrientation::Vertical, _) => Quadrant::from_directions(false, forward),
        }
    }

    fn render_transforms(&mut self, ctx: &mut PassContext<'_>) {
        let area = ctx.render_context(&self.config.name).area;
        let model_transform = self.extent.bounds().and_then(|(min, max)| match self.config.orientation {
            AxisOrientation::Horizontal => model(min, max, 0.0, 1.0),
            AxisOrientation::Vertical => model(0.0, 1.0, min, max),
        });
        let changed = self.transform.update(model_transform, projection_for_quadrant(self.quadrant(), area));
        if !self.transform.is_valid() || !(changed || self.ticks_moved) {
            return;
        }
        for (value, handle) in &self.tick_elements {
            let point = match self.config.orientation {
                AxisOrientation::Horizontal => DVec2::new(*value, 0.0),
                AxisOrientation::Vertical => DVec2::new(0.0, *value),
            };
            let target = DAffine2::from_translation(self.transform.data_to_screen(point));
            if !ctx.animation.transform(*handle, target) {
                ctx.scene.set_transform(*handle, target);
            }
        }
        self.ticks_moved = false;
    }
}

impl Component for AxisComponent {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn role(&self) -> ComponentRole {
        ComponentRole::Axis
    }

    fn subscriptions(&self) -> &[MessageKind] {
        SUBSCRIPTIONS
    }

    fn handle(&mut self, message: &Message, ctx: &mut PassContext<'_>) {
        match message {
            Message::InitializeAxes => {
                self.extent.reset_limits();
                self.extent.take_dirty();
                ctx.post(Message::AxisExtents(self.snapshot(false, false)));
            }
            Message::Layout => {
                let side = self.config.effective_side();
                ctx.layout.claim_axis_space(&self.config.name, side, self.config.size);
            }
            Message::DataExtent(report) if report.axis == self.config.name => {
                self.extent.merge_extent(report.minimum, report.maximum);
            }
            Message::FinalizeAxes => {
                let widened = self.extent.take_dirty();
                let bounds = self.extent.bounds();
                let dirty = widened && bounds != self.frozen;
                self.frozen = bounds;
                if bounds.is_none() {
                    tracing::debug!(axis = %self.config.name, "axis has no extent this pass");
                }
                ctx.post(Message::AxisExtents(self.snapshot(true, dirty)));
            }
            Message::RenderAxes => self.render_ticks(ctx),
            Message::RenderTransforms => self.render_transforms(ctx),
            _ => {}
        }
    }

    fn elements(&self) -> Vec<DrawableHandle> {
        self.tick_elements.iter().map(|(_, h)| *h).collect()
    }
}
