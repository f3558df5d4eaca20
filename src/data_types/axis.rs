use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum TimeUnit {
    Seconds,
    Milliseconds,
    Microseconds,
    Nanoseconds,
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum AxisFormat {
    #[default]
    Numeric,
    Time(TimeUnit),
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum AxisKind {
    Category,
    #[default]
    Value,
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum AxisOrientation {
    #[default]
    Horizontal,
    Vertical,
}

/// Edge of the layout rectangle an axis attaches to.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum AxisSide {
    Top,
    Right,
    Bottom,
    Left,
    /// Floats over the data area and claims no space.
    Float,
}

impl AxisSide {
    pub fn default_for(orientation: AxisOrientation) -> Self {
        match orientation {
            AxisOrientation::Horizontal => AxisSide::Bottom,
            AxisOrientation::Vertical => AxisSide::Left,
        }
    }
}

/// Running min/max of one axis with optional hard limits.
///
/// A bound only widens while its limit is unset. `NaN` never wins a
/// comparison, so missing data is a no-op.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AxisExtent {
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub limit_minimum: Option<f64>,
    pub limit_maximum: Option<f64>,
    dirty: bool,
}

impl AxisExtent {
    pub fn new(limit_minimum: Option<f64>, limit_maximum: Option<f64>) -> Self {
        let mut extent = Self {
            limit_minimum,
            limit_maximum,
            ..Default::default()
        };
        extent.reset_limits();
        extent
    }

    /// `maximum - minimum`, undefined while either bound is.
    pub fn range(&self) -> Option<f64> {
        Some(self.maximum? - self.minimum?)
    }

    pub fn bounds(&self) -> Option<(f64, f64)> {
        Some((self.minimum?, self.maximum?))
    }

    /// Restores both bounds to the configured limits.
    pub fn reset_limits(&mut self) {
        self.minimum = self.limit_minimum;
        self.maximum = self.limit_maximum;
    }

    pub fn update_limits(&mut self, value: f64) {
        self.widen_minimum(value);
        self.widen_maximum(value);
    }

    pub fn merge_extent(&mut self, reported_minimum: f64, reported_maximum: f64) {
        self.widen_minimum(reported_minimum);
        self.widen_maximum(reported_maximum);
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Reads and clears the dirty flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    fn widen_minimum(&mut self, value: f64) {
        if self.limit_minimum.is_some() {
            return;
        }
        let wins = match self.minimum {
            Some(current) => value < current,
            None => !value.is_nan(),
        };
        if wins {
            self.minimum = Some(value);
            self.dirty = true;
        }
    }

    fn widen_maximum(&mut self, value: f64) {
        if self.limit_maximum.is_some() {
            return;
        }
        let wins = match self.maximum {
            Some(current) => value > current,
            None => !value.is_nan(),
        };
        if wins {
            self.maximum = Some(value);
            self.dirty = true;
        }
    }
}

/// Read-only view of an axis broadcast to other components each pass.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisSnapshot {
    pub name: String,
    pub kind: AxisKind,
    pub orientation: AxisOrientation,
    pub side: AxisSide,
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub reversed: bool,
    /// `false` while the axis is still collecting extents for this pass.
    pub is_final: bool,
    /// Set when the extent widened during this pass.
    pub dirty: bool,
}

impl AxisSnapshot {
    pub fn range(&self) -> Option<f64> {
        Some(self.maximum? - self.minimum?)
    }

    pub fn bounds(&self) -> Option<(f64, f64)> {
        Some((self.minimum?, self.maximum?))
    }

    /// Growth direction of the axis on screen, as used for quadrant lookup.
    pub fn grows_forward(&self) -> bool {
        !self.reversed
    }
}

/// Extent reported by a series for one named axis.
#[derive(Clone, Debug, PartialEq)]
pub struct ExtentReport {
    pub axis: String,
    pub minimum: f64,
    pub maximum: f64,
}
