//! # overlap-engine
//!
//! Find the weekly windows a group of people can all meet in, when each of them
//! declares availability in their own local time and UTC offset.
//!
//! Each slot ("Monday 9:00 AM – 5:00 PM at UTC-5") is placed on an absolute
//! UTC week, overlapping slots are clustered, and every cluster whose members
//! share a common window is reported with that window translated back into
//! each attendee's local time.
//!
//! ## Quick start
//!
//! ```rust
//! use overlap_engine::{find_matches, ParticipantInput, SlotInput};
//!
//! let slot = |start: &str, end: &str| SlotInput {
//!     day: "Monday".to_string(),
//!     start: start.to_string(),
//!     end: end.to_string(),
//! };
//! let people = vec![
//!     ParticipantInput {
//!         name: "Alice".to_string(),
//!         city: "New York".to_string(),
//!         offset: Some(-5.0),
//!         timeslots: vec![slot("9:00 AM", "5:00 PM")],
//!         ..Default::default()
//!     },
//!     ParticipantInput {
//!         name: "Bob".to_string(),
//!         city: "Chicago".to_string(),
//!         offset: Some(-5.0),
//!         timeslots: vec![slot("10:00 AM", "3:00 PM")],
//!         ..Default::default()
//!     },
//! ];
//!
//! let matches = find_matches(&people);
//! assert_eq!(matches.len(), 1);
//! assert_eq!(matches[0].available[0].local_start_time, "10:00 AM");
//! assert_eq!(matches[0].available[0].local_end_time, "3:00 PM");
//! ```
//!
//! ## Modules
//!
//! - [`clock`] — 12-hour clock strings ↔ minutes since midnight
//! - [`convert`] — local time + weekday + offset → absolute UTC position
//! - [`interval`] — overlap and intersection of absolute intervals
//! - [`participant`] — input schema, validation, legacy offset alias
//! - [`matcher`] — clustering and ranking of shared windows
//! - [`project`] — absolute UTC minutes → local clock strings
//! - [`error`] — Error types

pub mod clock;
pub mod convert;
pub mod error;
pub mod interval;
pub mod matcher;
pub mod participant;
pub mod project;

pub use clock::{ClockTime, Meridiem};
pub use convert::{slot_to_interval, to_absolute_utc, UtcPosition};
pub use error::OverlapError;
pub use interval::{intersect, overlaps, AbsoluteInterval};
pub use matcher::{
    find_matches, find_matches_json, find_matches_with_options, find_matches_with_report,
    match_participants, Grouping, MatchOptions, MatchReport, MatchResult,
};
pub use participant::{
    resolve_participants, DropReason, DroppedParticipant, Participant, ParticipantInput, SlotInput,
};
pub use project::{convert_time, offset_label, render_local};
