//! Transform helpers for coordinate projection.
//!
//! Data reaches the screen in two affine stages: the *model* transform maps an
//! axis pair's extents onto the unit square, the *projection* maps the unit
//! square onto a pixel rectangle in one of four orientations. glam uses column
//! vectors, so "model first, then projection" is written `projection * model`.

use crate::data_types::Rect;
use crate::error::ChartError;
use glam::{DAffine2, DVec2};

/// Orientation of the unit square inside the target rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Quadrant {
    /// Up and right from the bottom-left corner.
    First,
    /// Up and left from the bottom-right corner.
    Second,
    /// Down and left from the top-right corner.
    Third,
    /// Down and right from the top-left corner (screen order, no flips).
    Fourth,
}

impl Quadrant {
    /// Picks the quadrant for a pair of growth directions.
    pub fn from_directions(left_to_right: bool, bottom_to_top: bool) -> Self {
        match (left_to_right, bottom_to_top) {
            (true, true) => Quadrant::First,
            (false, true) => Quadrant::Second,
            (false, false) => Quadrant::Third,
            (true, false) => Quadrant::Fourth,
        }
    }

    pub fn number(self) -> u8 {
        match self {
            Quadrant::First => 1,
            Quadrant::Second => 2,
            Quadrant::Third => 3,
            Quadrant::Fourth => 4,
        }
    }
}

impl TryFrom<u8> for Quadrant {
    type Error = ChartError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Quadrant::First),
            2 => Ok(Quadrant::Second),
            3 => Ok(Quadrant::Third),
            4 => Ok(Quadrant::Fourth),
            other => Err(ChartError::InvalidQuadrant(other)),
        }
    }
}

/// Maps `(a1_min, a2_min)` to `(0, 0)` and `(a1_max, a2_max)` to `(1, 1)`.
///
/// Returns `None` when either range is zero or not finite.
pub fn model(a1_min: f64, a1_max: f64, a2_min: f64, a2_max: f64) -> Option<DAffine2> {
    let r1 = a1_max - a1_min;
    let r2 = a2_max - a2_min;
    if !r1.is_finite() || !r2.is_finite() || r1 == 0.0 || r2 == 0.0 {
        return None;
    }
    Some(DAffine2::from_cols(
        DVec2::new(1.0 / r1, 0.0),
        DVec2::new(0.0, 1.0 / r2),
        DVec2::new(-a1_min / r1, -a2_min / r2),
    ))
}

/// Maps the unit square onto `rect`, oriented per `quadrant`.
pub fn projection_for_quadrant(quadrant: Quadrant, rect: Rect) -> DAffine2 {
    let (sx, tx) = match quadrant {
        Quadrant::First | Quadrant::Fourth => (rect.width, rect.left()),
        Quadrant::Second | Quadrant::Third => (-rect.width, rect.right()),
    };
    let (sy, ty) = match quadrant {
        Quadrant::First | Quadrant::Second => (-rect.height, rect.bottom()),
        Quadrant::Third | Quadrant::Fourth => (rect.height, rect.top()),
    };
    DAffine2::from_cols(DVec2::new(sx, 0.0), DVec2::new(0.0, sy), DVec2::new(tx, ty))
}

/// Applies `model` first, then `projection`.
pub fn compose(model: DAffine2, projection: DAffine2) -> DAffine2 {
    projection * model
}

/// Exchanges the two components; used when the category axis runs vertically.
pub fn swap_components() -> DAffine2 {
    DAffine2::from_cols(DVec2::new(0.0, 1.0), DVec2::new(1.0, 0.0), DVec2::ZERO)
}

/// Composed transform memo owned by a component.
///
/// Recomputes only when model or projection differ by value from the last
/// accepted pair, so unchanged passes do no downstream work.
#[derive(Clone, Debug, Default)]
pub struct TransformCache {
    model: Option<DAffine2>,
    projection: Option<DAffine2>,
    composed: Option<DAffine2>,
}

impl TransformCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds a new pair. A degenerate (`None`) model keeps the previous state.
    /// Returns `true` when the composed transform changed.
    pub fn update(&mut self, model: Option<DAffine2>, projection: DAffine2) -> bool {
        let Some(model) = model else {
            tracing::debug!("degenerate model transform, keeping previous state");
            return false;
        };
        if self.model == Some(model) && self.projection == Some(projection) {
            return false;
        }
        self.model = Some(model);
        self.projection = Some(projection);
        let composed = compose(model, projection);
        let changed = self.composed != Some(composed);
        self.composed = Some(composed);
        changed
    }

    /// The composed transform, or identity until a valid pair arrived.
    pub fn composed(&self) -> DAffine2 {
        self.composed.unwrap_or(DAffine2::IDENTITY)
    }

    pub fn is_valid(&self) -> bool {
        self.composed.is_some()
    }

    pub fn invalidate(&mut self) {
        *self = Self::default();
    }

    pub fn data_to_screen(&self, point: DVec2) -> DVec2 {
        self.composed().transform_point2(point)
    }

    pub fn screen_to_data(&self, point: DVec2) -> Option<DVec2> {
        let composed = self.composed?;
        let inverse = composed.inverse();
        inverse.is_finite().then(|| inverse.transform_point2(point))
    }
}
