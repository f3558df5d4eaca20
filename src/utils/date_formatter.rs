use crate::data_types::TimeUnit;
use chrono::{DateTime, TimeZone, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmartDateFormat {
    Year,       // 2024
    MonthYear,  // Jan 2024
    DayMonth,   // 12 Jan
    HourMin,    // 10:30
    HourMinSec, // 10:30:15
}

impl SmartDateFormat {
    fn pattern(self) -> &'static str {
        match self {
            SmartDateFormat::Year => "%Y",
            SmartDateFormat::MonthYear => "%b %Y",
            SmartDateFormat::DayMonth => "%d %b",
            SmartDateFormat::HourMin => "%H:%M",
            SmartDateFormat::HourMinSec => "%H:%M:%S",
        }
    }
}

/// Picks the coarsest format that still tells ticks apart across `visible_range_sec`.
pub fn determine_date_format(visible_range_sec: f64) -> SmartDateFormat {
    const MINUTE: f64 = 60.0;
    const HOUR: f64 = 3600.0;
    const DAY: f64 = 24.0 * HOUR;
    const MONTH: f64 = 30.0 * DAY;
    const YEAR: f64 = 365.0 * DAY;

    match visible_range_sec {
        s if s > YEAR * 2.0 => SmartDateFormat::Year,
        s if s > MONTH * 2.0 => SmartDateFormat::MonthYear,
        s if s > DAY * 1.5 => SmartDateFormat::DayMonth,
        s if s > MINUTE * 5.0 => SmartDateFormat::HourMin,
        _ => SmartDateFormat::HourMinSec,
    }
}

fn to_datetime(value: f64, unit: TimeUnit) -> Option<DateTime<Utc>> {
    let nanos = match unit {
        TimeUnit::Seconds => value * 1e9,
        TimeUnit::Milliseconds => value * 1e6,
        TimeUnit::Microseconds => value * 1e3,
        TimeUnit::Nanoseconds => value,
    };
    if !nanos.is_finite() {
        return None;
    }
    let seconds = (nanos / 1e9).floor();
    let subsec = (nanos - seconds * 1e9).clamp(0.0, 999_999_999.0) as u32;
    Utc.timestamp_opt(seconds as i64, subsec).single()
}

/// Formats a timestamp in UTC, falling back to plain numbers out of range.
pub fn format_timestamp(value: f64, format: SmartDateFormat, unit: TimeUnit) -> String {
    match to_datetime(value, unit) {
        Some(dt) => dt.format(format.pattern()).to_string(),
        None => format!("{:.2}", value),
    }
}
