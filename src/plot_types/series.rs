use crate::context::PassContext;
use crate::data_types::{
    AxisKind, AxisOrientation, AxisSnapshot, ExtentReport, ItemState, ItemStatus, SeriesConfig,
    SeriesKind, TransitionEdge,
};
use crate::diff::{diff, reduce, DiffCounts, TransitionHandler};
use crate::element::{DrawableHandle, ElementKind, ElementRequest};
use crate::error::ChartError;
use crate::event_bus::{Component, ComponentRole, Message, MessageKind};
use crate::recycler::Recycler;
use crate::transform::{model, projection_for_quadrant, swap_components, Quadrant, TransformCache};
use crate::validation::ValidationResult;
use glam::{DAffine2, DVec2};
use std::marker::PhantomData;

const SUBSCRIPTIONS: &[MessageKind] = &[
    MessageKind::LayoutComplete,
    MessageKind::DataSourceOperation,
    MessageKind::RenderComponents,
    MessageKind::RenderTransforms,
];

type ValueFn<T> = Box<dyn Fn(&T) -> Option<f64>>;
type SelectorFn<T> = Box<dyn Fn(&T) -> bool>;

/// A series realizing one drawable per item of a typed data source.
///
/// The value binding is a plain closure over the item type; items for which
/// it yields nothing (or `NaN`) stay in the list without an element.
pub struct ItemSeries<T> {
    config: SeriesConfig,
    value: ValueFn<T>,
    selector: Option<SelectorFn<T>>,
    category_offset: f64,
    items: Vec<ItemState>,
    /// Axis pair resolved for the current pass.
    resolved: Option<(AxisSnapshot, AxisSnapshot)>,
    recycler: Option<Recycler<DrawableHandle>>,
    transform: TransformCache,
    needs_positioning: bool,
    last_diff: DiffCounts,
    _items: PhantomData<fn(&T)>,
}

impl<T: 'static> ItemSeries<T> {
    pub fn new(config: SeriesConfig, value: impl Fn(&T) -> Option<f64> + 'static) -> Self {
        Self {
            config,
            value: Box::new(value),
            selector: None,
            category_offset: 0.5,
            items: Vec::new(),
            resolved: None,
            recycler: None,
            transform: TransformCache::new(),
            needs_positioning: false,
            last_diff: DiffCounts::default(),
            _items: PhantomData,
        }
    }

    /// Per-item opt-out: items rejected here get no element.
    pub fn with_selector(mut self, selector: impl Fn(&T) -> bool + 'static) -> Self {
        self.selector = Some(Box::new(selector));
        self
    }

    /// Position of an item inside its category slot (`0.5` centers it).
    pub fn with_category_offset(mut self, offset: f64) -> Self {
        self.category_offset = offset;
        self
    }

    pub fn config(&self) -> &SeriesConfig {
        &self.config
    }

    pub fn items(&self) -> &[ItemState] {
        &self.items
    }

    pub fn last_diff(&self) -> DiffCounts {
        self.last_diff
    }

    fn resolve_axes(&mut self, ctx: &mut PassContext<'_>) {
        let name = self.config.name.as_str();
        let resolved = ctx
            .extents
            .resolve(name, &self.config.category_axis)
            .cloned()
            .and_then(|c| {
                let v = ctx.extents.resolve(name, &self.config.value_axis).cloned()?;
                Ok((c, v))
            });
        self.resolved = match resolved {
            Ok((category, value)) if category.orientation == value.orientation => {
                ctx.validation.report(
                    ValidationResult::new(name, "category and value axes must be orthogonal")
                        .with_members([category.name, value.name]),
                );
                None
            }
            Ok(pair) => Some(pair),
            Err(error) => {
                ctx.validation.report_error(name, &error);
                None
            }
        };
    }

    fn apply_operation(&mut self, source: &str, message: &Message, ctx: &mut PassContext<'_>) {
        let Message::DataSourceOperation { operation, .. } = message else {
            return;
        };
        if self.resolved.is_none() {
            return;
        }
        let Some(operation) = operation.downcast::<T>() else {
            let error = ChartError::ItemTypeMismatch {
                source_name: source.to_string(),
                expected: std::any::type_name::<T>(),
                found: operation.item_type_name(),
            };
            ctx.validation.report_error(&self.config.name, &error);
            return;
        };
        let transitions = match diff(self.items.len(), operation) {
            Ok(transitions) => transitions,
            Err(error) => {
                ctx.validation.report_error(&self.config.name, &error);
                return;
            }
        };
        self.last_diff = DiffCounts::of(&transitions);
        tracing::debug!(
            series = %self.config.name,
            enter = self.last_diff.enter,
            live = self.last_diff.live,
            exit = self.last_diff.exit,
            "applying diff"
        );

        let current = std::mem::take(&mut self.items);
        let mut recycler = self.recycler.take().unwrap_or_default();
        let items = {
            let mut reducer = ItemReducer {
                config: &self.config,
                value: self.value.as_ref(),
                selector: self.selector.as_deref(),
                category_offset: self.category_offset,
                composed: self.transform.is_valid().then(|| self.transform.composed()),
                recycler: &mut recycler,
                ctx: &mut *ctx,
            };
            reduce(current, &transitions, &mut reducer)
        };
        self.items = items;
        self.recycler = Some(recycler);
        self.needs_positioning = true;
    }

    fn report_extents(&self, ctx: &mut PassContext<'_>) {
        let Some((category, _)) = &self.resolved else {
            return;
        };
        if self.items.is_empty() {
            return;
        }

        let (c_min, c_max) = match category.kind {
            AxisKind::Category => (0.0, self.items.len() as f64),
            AxisKind::Value => min_max(self.items.iter().map(|i| i.component1)),
        };
        if c_min.is_finite() && c_max.is_finite() {
            ctx.post(Message::DataExtent(ExtentReport {
                axis: self.config.category_axis.clone(),
                minimum: c_min,
                maximum: c_max,
            }));
        }

        let values = self
            .items
            .iter()
            .filter(|i| i.element.is_some())
            .map(|i| i.component2);
        let (mut v_min, mut v_max) = min_max(values);
        if let SeriesKind::Columns { .. } = self.config.kind {
            v_min = v_min.min(0.0);
            v_max = v_max.max(0.0);
        }
        if v_min.is_finite() && v_max.is_finite() {
            ctx.post(Message::DataExtent(ExtentReport {
                axis: self.config.value_axis.clone(),
                minimum: v_min,
                maximum: v_max,
            }));
        }
    }

    fn render_transforms(&mut self, ctx: &mut PassContext<'_>) {
        // Re-read the frozen snapshots: extents may have moved since LayoutComplete.
        let name = self.config.name.as_str();
        let (Some(category), Some(value)) = (
            ctx.extents.get(&self.config.category_axis).cloned(),
            ctx.extents.get(&self.config.value_axis).cloned(),
        ) else {
            return;
        };
        if category.orientation == value.orientation {
            return;
        }
        let category_vertical = category.orientation == AxisOrientation::Vertical;
        let (horizontal, vertical) = if category_vertical {
            (&value, &category)
        } else {
            (&category, &value)
        };

        let model_transform = match (horizontal.bounds(), vertical.bounds()) {
            (Some((h_min, h_max)), Some((v_min, v_max))) => {
                model(h_min, h_max, v_min, v_max).map(|m| {
                    if category_vertical {
                        m * swap_components()
                    } else {
                        m
                    }
                })
            }
            _ => None,
        };
        let quadrant = Quadrant::from_directions(horizontal.grows_forward(), vertical.grows_forward());
        let area = ctx.render_context(name).area;
        let changed = self
            .transform
            .update(model_transform, projection_for_quadrant(quadrant, area));

        if !self.transform.is_valid() || !(changed || self.needs_positioning) {
            return;
        }
        let composed = self.transform.composed();
        for item in &self.items {
            let Some(handle) = item.element else {
                continue;
            };
            let target = match self.config.kind {
                SeriesKind::Markers => DAffine2::from_translation(
                    composed.transform_point2(DVec2::new(item.component1, item.component2)),
                ),
                SeriesKind::Columns { width } => composed * column_local(item, width),
            };
            if !ctx.animation.transform(handle, target) {
                ctx.scene.set_transform(handle, target);
            }
        }
        self.needs_positioning = false;
    }
}

/// Maps the unit square onto `[c1 - w/2, c1 + w/2] x [0, c2]` in data space.
fn column_local(item: &ItemState, width: f64) -> DAffine2 {
    DAffine2::from_cols(
        DVec2::new(width, 0.0),
        DVec2::new(0.0, item.component2),
        DVec2::new(item.component1 - width / 2.0, 0.0),
    )
}

fn min_max(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values
        .filter(|v| !v.is_nan())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)))
}

struct ItemReducer<'s, 'c, 'p, T> {
    config: &'s SeriesConfig,
    value: &'s dyn Fn(&T) -> Option<f64>,
    selector: Option<&'s dyn Fn(&T) -> bool>,
    category_offset: f64,
    /// Data-to-pixel transform of the previous pass, if one was valid.
    composed: Option<DAffine2>,
    recycler: &'s mut Recycler<DrawableHandle>,
    ctx: &'c mut PassContext<'p>,
}

impl<T> TransitionHandler<ItemState, T> for ItemReducer<'_, '_, '_, T> {
    fn live_item(&mut self, new_index: usize, _edge: TransitionEdge, mut item: ItemState) -> ItemState {
        let shift = new_index as f64 - item.index as f64;
        item.reindex(new_index);
        item.status = ItemStatus::Live;
        if let (Some(handle), Some(composed), true) = (item.element, self.composed, shift != 0.0) {
            // Category shift in pixels; the swap for a vertical category axis is part of `composed`.
            let delta = composed.transform_vector2(DVec2::new(shift, 0.0));
            // Falls back to the repositioning done in RenderTransforms.
            let _ = self.ctx.animation.offset(handle, delta);
        }
        item
    }

    fn entering_item(&mut self, new_index: usize, edge: TransitionEdge, item: &T) -> ItemState {
        let value = (self.value)(item).filter(|v| !v.is_nan());
        let selected = self.selector.map_or(true, |select| select(item));
        let mut state = ItemState::new(new_index, value.unwrap_or(f64::NAN), self.category_offset);
        if value.is_none() || !selected {
            return state;
        }

        let request = ElementRequest {
            component: &self.config.name,
            kind: match self.config.kind {
                SeriesKind::Markers => ElementKind::Marker,
                SeriesKind::Columns { .. } => ElementKind::Column,
            },
            axes: Some((self.config.category_axis.as_str(), self.config.value_axis.as_str())),
            index: Some(new_index),
        };
        let ctx = &mut *self.ctx;
        let (_, handle) = self.recycler.next(&request, |r| ctx.create_element(r));
        // Without an enter animation the element is simply placed on commit.
        let _ = ctx.animation.enter(handle, edge);
        state.element = Some(handle);
        state
    }

    fn exiting_item(&mut self, _index: usize, edge: TransitionEdge, item: ItemState) {
        let Some(handle) = item.element else {
            return;
        };
        if !self.ctx.animation.exit(handle, edge) {
            self.recycler.recycle(handle);
        }
    }
}

impl<T: 'static> Component for ItemSeries<T> {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn role(&self) -> ComponentRole {
        ComponentRole::Series
    }

    fn subscriptions(&self) -> &[MessageKind] {
        SUBSCRIPTIONS
    }

    fn handle(&mut self, message: &Message, ctx: &mut PassContext<'_>) {
        match message {
            Message::LayoutComplete => self.resolve_axes(ctx),
            Message::DataSourceOperation { source, .. } if *source == self.config.data_source => {
                self.apply_operation(source, message, ctx);
            }
            Message::RenderComponents => {
                if let Some(recycler) = self.recycler.take() {
                    ctx.commit(recycler.finish());
                }
                self.report_extents(ctx);
            }
            Message::RenderTransforms => self.render_transforms(ctx),
            _ => {}
        }
    }

    fn data_source(&self) -> Option<&str> {
        Some(&self.config.data_source)
    }

    fn elements(&self) -> Vec<DrawableHandle> {
        self.items.iter().filter_map(|i| i.element).collect()
    }
}
