//! Tick generation and label formatting for axis visuals.

use crate::data_types::{AxisFormat, TimeUnit};
use crate::utils::date_formatter::{determine_date_format, format_timestamp};

/// Upper bound on ticks per axis, whatever the requested count.
pub const MAX_TICKS: usize = 50;

/// Step between "nice" ticks (1, 2 or 5 times a power of ten).
pub fn tick_step(min: f64, max: f64, count: usize) -> Option<f64> {
    let span = (max - min).abs();
    if count == 0 || !span.is_finite() || span == 0.0 {
        return None;
    }
    let raw = span / count as f64;
    let power = 10f64.powf(raw.log10().floor());
    let error = raw / power;
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    Some(factor * power)
}

/// Nice tick values inside `[min, max]`, ascending. Empty for a degenerate range.
pub fn nice_ticks(min: f64, max: f64, count: usize) -> Vec<f64> {
    let Some(step) = tick_step(min, max, count.min(MAX_TICKS)) else {
        return Vec::new();
    };
    let (lo, hi) = if min <= max { (min, max) } else { (max, min) };

    // Dividing by the inverse keeps decimal steps like 0.1 exact.
    let inverse = (step < 1.0).then(|| (1.0 / step).round());
    let (start, end) = match inverse {
        Some(inv) => ((lo * inv).ceil() as i64, (hi * inv).floor() as i64),
        None => ((lo / step).ceil() as i64, (hi / step).floor() as i64),
    };
    (start..=end)
        .map(|i| match inverse {
            Some(inv) => i as f64 / inv,
            None => i as f64 * step,
        })
        .collect()
}

/// Formats a tick value; `span` is the visible range in axis units.
pub fn format_tick(value: f64, span: f64, format: &AxisFormat) -> String {
    match format {
        AxisFormat::Time(unit) => {
            let span_sec = span.abs() / seconds_divisor(*unit);
            let fmt = determine_date_format(span_sec);
            format_timestamp(value, fmt, *unit)
        }
        AxisFormat::Numeric => {
            if value.abs() < 0.001 && value.abs() > 0.0 {
                format!("{:.4}", value)
            } else if value.abs() > 1000.0 {
                format!("{:.0}", value)
            } else {
                format!("{:.2}", value)
            }
        }
    }
}

fn seconds_divisor(unit: TimeUnit) -> f64 {
    match unit {
        TimeUnit::Seconds => 1.0,
        TimeUnit::Milliseconds => 1_000.0,
        TimeUnit::Microseconds => 1_000_000.0,
        TimeUnit::Nanoseconds => 1_000_000_000.0,
    }
}
