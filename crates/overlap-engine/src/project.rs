//! Absolute UTC minutes → 12-hour clock strings in a participant's local time.

use crate::clock::{ClockTime, MINUTES_PER_DAY, MINUTES_PER_HOUR};
use crate::convert::{is_valid_offset, offset_minutes};

/// What non-finite input renders as.
pub const FALLBACK_CLOCK: &str = "12:00 AM";

/// Render a UTC minute value as local clock time at `offset_hours`.
///
/// The value may lie anywhere on the absolute timeline; only its position
/// within the local day matters. Fractional minutes are rounded to the
/// nearest minute. Finite offsets beyond ±24 hours count as 0, as they do
/// for conversion to UTC.
pub fn render_local(utc_minutes: f64, offset_hours: f64) -> String {
    if !utc_minutes.is_finite() || !offset_hours.is_finite() {
        return FALLBACK_CLOCK.to_string();
    }
    let offset = if is_valid_offset(offset_hours) {
        offset_hours * MINUTES_PER_HOUR as f64
    } else {
        0.0
    };
    let local = (utc_minutes + offset).rem_euclid(MINUTES_PER_DAY as f64).round() as i64;
    ClockTime::from_minutes(local).to_string()
}

/// Re-express a clock string read at `from_offset` as clock time at `to_offset`.
///
/// The result wraps within the day; the weekday shift is not reported.
/// Unparseable input reads as midnight.
pub fn convert_time(time: &str, from_offset: f64, to_offset: f64) -> String {
    let clock = ClockTime::parse_lenient(time);
    let shifted =
        clock.minutes_from_midnight() + offset_minutes(to_offset) - offset_minutes(from_offset);
    ClockTime::from_minutes(shifted).to_string()
}

/// Label an offset as `GMT+0`, `GMT-5`, `GMT+5:30`.
pub fn offset_label(offset_hours: f64) -> String {
    let total = offset_minutes(offset_hours);
    if total == 0 {
        return "GMT+0".to_string();
    }
    let sign = if total > 0 { '+' } else { '-' };
    let hours = total.abs() / MINUTES_PER_HOUR;
    let minutes = total.abs() % MINUTES_PER_HOUR;
    if minutes == 0 {
        format!("GMT{sign}{hours}")
    } else {
        format!("GMT{sign}{hours}:{minutes:02}")
    }
}
