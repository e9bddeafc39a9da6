//! Error types for overlap-engine operations.
//!
//! Matching itself never fails; these errors come from the strict parsers
//! and from the JSON entry points.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum OverlapError {
    #[error("Invalid clock time: {0}")]
    InvalidClock(String),

    #[error("Invalid weekday: {0}")]
    InvalidWeekday(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, OverlapError>;
