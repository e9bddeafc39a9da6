//! Half-open intervals on the absolute UTC week and their overlap algebra.
//!
//! Two intervals overlap when `a.start < b.end && b.start < a.end`.
//! Intervals that only touch (one ends exactly when the other starts) do NOT
//! overlap.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::clock::MINUTES_PER_DAY;
use crate::convert::weekday_from_index;

/// A `[start, end)` range in minutes on the absolute timeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AbsoluteInterval {
    pub start: i64,
    pub end: i64,
}

impl AbsoluteInterval {
    /// Build an interval, rejecting empty or inverted ranges.
    pub fn new(start: i64, end: i64) -> Option<Self> {
        (start < end).then_some(Self { start, end })
    }

    pub fn duration_minutes(&self) -> i64 {
        self.end - self.start
    }

    /// The UTC day index the interval starts on (floored, not wrapped).
    pub fn start_day(&self) -> i64 {
        self.start.div_euclid(MINUTES_PER_DAY)
    }

    /// The UTC weekday the interval starts on.
    pub fn start_weekday(&self) -> Weekday {
        weekday_from_index(self.start_day())
    }

    /// Minute of the UTC day the interval starts at.
    pub fn start_minute_of_day(&self) -> i64 {
        self.start.rem_euclid(MINUTES_PER_DAY)
    }

    pub fn overlaps(&self, other: &AbsoluteInterval) -> bool {
        overlaps(self, other)
    }

    pub fn intersect(&self, other: &AbsoluteInterval) -> Option<AbsoluteInterval> {
        intersect(self, other)
    }
}

/// Whether two intervals share at least one minute.
pub fn overlaps(a: &AbsoluteInterval, b: &AbsoluteInterval) -> bool {
    a.start < b.end && b.start < a.end
}

/// The common part of two intervals, or `None` when they do not overlap.
pub fn intersect(a: &AbsoluteInterval, b: &AbsoluteInterval) -> Option<AbsoluteInterval> {
    if !overlaps(a, b) {
        return None;
    }
    AbsoluteInterval::new(a.start.max(b.start), a.end.min(b.end))
}

/// Fold [`intersect`] across a sequence of intervals.
///
/// Returns `None` for an empty sequence or as soon as the running
/// intersection becomes empty.
pub fn intersect_all<'a, I>(intervals: I) -> Option<AbsoluteInterval>
where
    I: IntoIterator<Item = &'a AbsoluteInterval>,
{
    let mut iter = intervals.into_iter();
    let first = *iter.next()?;
    iter.try_fold(first, |acc, next| intersect(&acc, next))
}
