//! Local wall-clock + weekday + UTC offset → position on the absolute UTC week.
//!
//! The absolute timeline numbers one rolling week in minutes, anchored at
//! Sunday 00:00 UTC: `weekday_index * 1440 + minute_of_day`, with Sunday = 0.
//! Positions can be compared and subtracted directly without any further
//! weekday arithmetic.

use chrono::Weekday;

use crate::clock::{ClockTime, MINUTES_PER_DAY, MINUTES_PER_HOUR};
use crate::error::{OverlapError, Result};
use crate::interval::AbsoluteInterval;

pub const DAYS_PER_WEEK: i64 = 7;
pub const MINUTES_PER_WEEK: i64 = DAYS_PER_WEEK * MINUTES_PER_DAY;

/// Weekdays in timeline order (index 0 = Sunday).
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

/// Position of `weekday` on the timeline (Sunday = 0 … Saturday = 6).
pub fn weekday_index(weekday: Weekday) -> i64 {
    i64::from(weekday.num_days_from_sunday())
}

/// Weekday for a (possibly negative or out-of-week) day index, wrapping modulo 7.
pub fn weekday_from_index(index: i64) -> Weekday {
    WEEKDAYS[index.rem_euclid(DAYS_PER_WEEK) as usize]
}

/// Canonical English name ("Monday").
pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Parse a weekday label. Accepts full names and chrono's three-letter forms,
/// case-insensitively.
pub fn parse_weekday(label: &str) -> Result<Weekday> {
    label
        .trim()
        .parse::<Weekday>()
        .map_err(|_| OverlapError::InvalidWeekday(label.to_string()))
}

/// Largest offset magnitude, in hours, accepted as a real UTC offset.
pub const MAX_OFFSET_HOURS: f64 = 24.0;

/// Whether `offset_hours` can be used as a UTC offset: finite and within
/// ±[`MAX_OFFSET_HOURS`].
pub fn is_valid_offset(offset_hours: f64) -> bool {
    offset_hours.is_finite() && offset_hours.abs() <= MAX_OFFSET_HOURS
}

/// An offset given in (possibly fractional) hours, expressed in whole minutes.
///
/// Offsets that are not finite or lie beyond ±24 hours count as 0.
pub fn offset_minutes(offset_hours: f64) -> i64 {
    if is_valid_offset(offset_hours) {
        (offset_hours * MINUTES_PER_HOUR as f64).round() as i64
    } else {
        0
    }
}

/// A normalized UTC reading: the weekday it falls on and the minute within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UtcPosition {
    pub weekday: Weekday,
    /// Minute of the UTC day, always in `[0, 1440)`.
    pub minute_of_day: i64,
}

impl UtcPosition {
    /// Monotonic position on the absolute week.
    pub fn absolute(&self) -> i64 {
        weekday_index(self.weekday) * MINUTES_PER_DAY + self.minute_of_day
    }
}

/// Convert a local clock reading on `weekday` at `offset_hours` east of UTC into
/// its UTC weekday and minute.
///
/// The offset is subtracted on the same nominal weekday; results that leave
/// `[0, 1440)` are carried into the previous or next weekday, wrapping
/// Sunday ↔ Saturday.
pub fn to_absolute_utc(local: &ClockTime, offset_hours: f64, weekday: Weekday) -> UtcPosition {
    let minutes = local.minutes_from_midnight() - offset_minutes(offset_hours);
    let day = weekday_index(weekday) + minutes.div_euclid(MINUTES_PER_DAY);

    UtcPosition {
        weekday: weekday_from_index(day),
        minute_of_day: minutes.rem_euclid(MINUTES_PER_DAY),
    }
}

/// Convert a local `start`–`end` window on `weekday` into an absolute interval.
///
/// The end is placed at `start + duration`, where the duration wraps modulo
/// 24 hours. A window whose end reads earlier than its start ("11:00 PM" –
/// "2:00 AM") therefore runs into the next day, and a window whose ends read
/// the same minute spans a full day. The result never has `end <= start`.
pub fn slot_to_interval(
    start: &ClockTime,
    end: &ClockTime,
    offset_hours: f64,
    weekday: Weekday,
) -> AbsoluteInterval {
    let start_pos = to_absolute_utc(start, offset_hours, weekday).absolute();

    let mut duration =
        (end.minutes_from_midnight() - start.minutes_from_midnight()).rem_euclid(MINUTES_PER_DAY);
    if duration == 0 {
        duration = MINUTES_PER_DAY;
    }

    AbsoluteInterval {
        start: start_pos,
        end: start_pos + duration,
    }
}
