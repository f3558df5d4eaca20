use super::axis::{AxisFormat, AxisKind, AxisOrientation, AxisSide};
use super::geometry::Thickness;
use eyre::{Result, WrapErr};
use serde::{Deserialize, Serialize};

fn default_quota() -> f64 {
    0.2
}

fn default_axis_size() -> f64 {
    30.0
}

fn default_tick_count() -> usize {
    5
}

/// Chart-level settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(default)]
    pub padding: Thickness,
    /// Largest share of the layout width/height a single space claim may take.
    #[serde(default = "default_quota")]
    pub layout_quota: f64,
    #[serde(default)]
    pub axes: Vec<AxisConfig>,
    #[serde(default)]
    pub gridlines: Option<GridlinesConfig>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            padding: Thickness::default(),
            layout_quota: default_quota(),
            axes: Vec::new(),
            gridlines: None,
        }
    }
}

impl ChartConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).wrap_err("invalid chart configuration")?;
        if !(0.0..=1.0).contains(&config.layout_quota) {
            eyre::bail!(
                "layout_quota must lie in [0, 1], got {}",
                config.layout_quota
            );
        }
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).wrap_err("failed to serialize chart configuration")
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AxisConfig {
    pub name: String,
    #[serde(default)]
    pub kind: AxisKind,
    #[serde(default)]
    pub orientation: AxisOrientation,
    /// Defaults to bottom for horizontal axes and left for vertical ones.
    #[serde(default)]
    pub side: Option<AxisSide>,
    #[serde(default)]
    pub limit_minimum: Option<f64>,
    #[serde(default)]
    pub limit_maximum: Option<f64>,
    #[serde(default)]
    pub reversed: bool,
    /// Pixels claimed on `side` (height for horizontal axes, width for vertical).
    #[serde(default = "default_axis_size")]
    pub size: f64,
    #[serde(default = "default_tick_count")]
    pub tick_count: usize,
    #[serde(default)]
    pub format: AxisFormat,
}

impl AxisConfig {
    pub fn new(name: impl Into<String>, kind: AxisKind, orientation: AxisOrientation) -> Self {
        Self {
            name: name.into(),
            kind,
            orientation,
            side: None,
            limit_minimum: None,
            limit_maximum: None,
            reversed: false,
            size: default_axis_size(),
            tick_count: default_tick_count(),
            format: AxisFormat::Numeric,
        }
    }

    pub fn with_limits(mut self, minimum: Option<f64>, maximum: Option<f64>) -> Self {
        self.limit_minimum = minimum;
        self.limit_maximum = maximum;
        self
    }

    pub fn with_side(mut self, side: AxisSide) -> Self {
        self.side = Some(side);
        self
    }

    pub fn reversed(mut self, reversed: bool) -> Self {
        self.reversed = reversed;
        self
    }

    pub fn effective_side(&self) -> AxisSide {
        self.side
            .unwrap_or_else(|| AxisSide::default_for(self.orientation))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridlinesConfig {
    pub name: String,
    /// Value axis whose ticks produce the lines.
    pub axis: String,
    #[serde(default = "default_tick_count")]
    pub tick_count: usize,
}

/// How a series realizes each item.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum SeriesKind {
    Markers,
    /// Columns `width` categories wide, anchored at a zero baseline.
    Columns { width: f64 },
}

impl Default for SeriesKind {
    fn default() -> Self {
        Self::Markers
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SeriesConfig {
    pub name: String,
    pub data_source: String,
    pub category_axis: String,
    pub value_axis: String,
    #[serde(default)]
    pub kind: SeriesKind,
}
