use crate::context::PassContext;
use crate::data_types::{AxisOrientation, GridlinesConfig};
use crate::element::{DrawableHandle, ElementKind, ElementRequest};
use crate::event_bus::{Component, ComponentRole, Message, MessageKind};
use crate::recycler::Recycler;
use crate::scales::nice_ticks;
use crate::transform::{model, projection_for_quadrant, Quadrant, TransformCache};
use glam::{DAffine2, DVec2};

const SUBSCRIPTIONS: &[MessageKind] = &[MessageKind::RenderAxes, MessageKind::RenderTransforms];

/// Lines across the data area at the ticks of one axis.
///
/// Never claims space, so its render area is the final data area.
pub struct Gridlines {
    config: GridlinesConfig,
    lines: Vec<(f64, DrawableHandle)>,
    transform: TransformCache,
    lines_moved: bool,
}

impl Gridlines {
    pub fn new(config: GridlinesConfig) -> Self {
        Self {
            config,
            lines: Vec::new(),
            transform: TransformCache::new(),
            lines_moved: false,
        }
    }

    pub fn values(&self) -> Vec<f64> {
        self.lines.iter().map(|(v, _)| *v).collect()
    }

    fn render_lines(&mut self, ctx: &mut PassContext<'_>) {
        let axis = match ctx.extents.resolve(&self.config.name, &self.config.axis) {
            Ok(axis) => axis.clone(),
            Err(error) => {
                ctx.validation.report_error(&self.config.name, &error);
                return;
            }
        };
        let values = axis
            .bounds()
            .map(|(min, max)| nice_ticks(min, max, self.config.tick_count))
            .unwrap_or_default();

        // Lines are interchangeable: every old one may serve any new value.
        let mut recycler = Recycler::new(self.lines.drain(..).map(|(_, h)| h));
        let request = ElementRequest {
            component: &self.config.name,
            kind: ElementKind::GridLine,
            axes: None,
            index: None,
        };
        for value in values {
            let (_, handle) = recycler.next(&request, |r| ctx.create_element(r));
            self.lines.push((value, handle));
        }
        ctx.commit(recycler.finish());
        self.lines_moved = true;
    }

    fn render_transforms(&mut self, ctx: &mut PassContext<'_>) {
        let Some(axis) = ctx.extents.get(&self.config.axis).cloned() else {
            return;
        };
        let area = ctx.render_context(&self.config.name).area;
        let (model_transform, quadrant) = match axis.orientation {
            AxisOrientation::Vertical => (
                axis.bounds().and_then(|(min, max)| model(0.0, 1.0, min, max)),
                Quadrant::from_directions(true, axis.grows_forward()),
            ),
            AxisOrientation::Horizontal => (
                axis.bounds().and_then(|(min, max)| model(min, max, 0.0, 1.0)),
                Quadrant::from_directions(axis.grows_forward(), true),
            ),
        };
        let changed = self
            .transform
            .update(model_transform, projection_for_quadrant(quadrant, area));
        if !self.transform.is_valid() || !(changed || self.lines_moved) {
            return;
        }

        let composed = self.transform.composed();
        for (value, handle) in &self.lines {
            // Unit segment along x, laid across the axis at `value`.
            let local = match axis.orientation {
                AxisOrientation::Vertical => DAffine2::from_translation(DVec2::new(0.0, *value)),
                AxisOrientation::Horizontal => DAffine2::from_cols(
                    DVec2::new(0.0, 1.0),
                    DVec2::new(1.0, 0.0),
                    DVec2::new(*value, 0.0),
                ),
            };
            let target = composed * local;
            if !ctx.animation.transform(*handle, target) {
                ctx.scene.set_transform(*handle, target);
            }
        }
        self.lines_moved = false;
    }
}

impl Component for Gridlines {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn role(&self) -> ComponentRole {
        ComponentRole::Decoration
    }

    fn subscriptions(&self) -> &[MessageKind] {
        SUBSCRIPTIONS
    }

    fn handle(&mut self, message: &Message, ctx: &mut PassContext<'_>) {
        match message {
            Message::RenderAxes => self.render_lines(ctx),
            Message::RenderTransforms => self.render_transforms(ctx),
            _ => {}
        }
    }

    fn elements(&self) -> Vec<DrawableHandle> {
        self.lines.iter().map(|(_, h)| *h).collect()
    }
}
