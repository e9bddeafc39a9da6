//! 12-hour clock parsing ("9:00 AM" → minutes since local midnight).
//!
//! Two entry points:
//!
//! - [`ClockTime::parse_lenient`] never fails. Anything that does not look like
//!   `H:MM AM|PM` (or is out of range) reads as midnight, so one bad record
//!   cannot abort a whole matching run.
//! - [`ClockTime::from_str`] is the strict variant for hosts that want to
//!   reject bad input before it reaches the matcher.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{OverlapError, Result};

pub const MINUTES_PER_HOUR: i64 = 60;
pub const MINUTES_PER_DAY: i64 = 24 * MINUTES_PER_HOUR;
const HALF_DAY: i64 = 12 * MINUTES_PER_HOUR;

static CLOCK_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(\d{1,2}):(\d{2})\s*(AM|PM)\s*$").expect("valid clock regex")
});

/// AM/PM marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Meridiem {
    #[serde(rename = "AM")]
    Am,
    #[serde(rename = "PM")]
    Pm,
}

impl Meridiem {
    pub fn as_str(self) -> &'static str {
        match self {
            Meridiem::Am => "AM",
            Meridiem::Pm => "PM",
        }
    }
}

/// A validated 12-hour clock reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClockTime {
    hour: u8,
    minute: u8,
    meridiem: Meridiem,
}

impl ClockTime {
    /// The reading every unparseable clock string collapses to: hour 0, minute 0, AM.
    pub const FALLBACK: ClockTime = ClockTime {
        hour: 0,
        minute: 0,
        meridiem: Meridiem::Am,
    };

    /// Build a clock reading, validating hour 1–12 and minute 0–59.
    pub fn new(hour: u8, minute: u8, meridiem: Meridiem) -> Option<Self> {
        if (1..=12).contains(&hour) && minute < 60 {
            Some(Self {
                hour,
                minute,
                meridiem,
            })
        } else {
            None
        }
    }

    /// Parse a clock string, resolving malformed input to [`ClockTime::FALLBACK`].
    pub fn parse_lenient(s: &str) -> Self {
        match s.parse() {
            Ok(clock) => clock,
            Err(_) => {
                tracing::debug!(input = s, "unparseable clock time, treating as midnight");
                Self::FALLBACK
            }
        }
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    pub fn meridiem(&self) -> Meridiem {
        self.meridiem
    }

    /// Minutes since local midnight, in `[0, 1440)`.
    ///
    /// PM adds 12 hours unless the hour is 12; 12 AM is midnight.
    pub fn minutes_from_midnight(&self) -> i64 {
        let hour = i64::from(self.hour);
        let mut total = hour * MINUTES_PER_HOUR + i64::from(self.minute);
        match self.meridiem {
            Meridiem::Pm if hour != 12 => total += HALF_DAY,
            Meridiem::Am if hour == 12 => total -= HALF_DAY,
            _ => {}
        }
        total
    }

    /// Build a clock reading from a minute-of-day value, wrapping into `[0, 1440)`.
    pub fn from_minutes(minutes: i64) -> Self {
        let minutes = minutes.rem_euclid(MINUTES_PER_DAY);
        let hour = minutes / MINUTES_PER_HOUR;
        let minute = (minutes % MINUTES_PER_HOUR) as u8;
        let meridiem = if hour < 12 { Meridiem::Am } else { Meridiem::Pm };
        let display_hour = match hour {
            0 => 12,
            h if h > 12 => h - 12,
            h => h,
        };
        Self {
            hour: display_hour as u8,
            minute,
            meridiem,
        }
    }
}

impl FromStr for ClockTime {
    type Err = OverlapError;

    fn from_str(s: &str) -> Result<Self> {
        let caps = CLOCK_PATTERN
            .captures(s)
            .ok_or_else(|| OverlapError::InvalidClock(s.to_string()))?;

        let hour: u8 = caps[1]
            .parse()
            .map_err(|_| OverlapError::InvalidClock(s.to_string()))?;
        let minute: u8 = caps[2]
            .parse()
            .map_err(|_| OverlapError::InvalidClock(s.to_string()))?;
        let meridiem = if caps[3].eq_ignore_ascii_case("PM") {
            Meridiem::Pm
        } else {
            Meridiem::Am
        };

        ClockTime::new(hour, minute, meridiem).ok_or_else(|| OverlapError::InvalidClock(s.to_string()))
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02} {}", self.hour, self.minute, self.meridiem.as_str())
    }
}
