//! Participant input schema and its resolution into matchable values.
//!
//! Hosts hand over loosely-typed records (`ParticipantInput`). Resolution
//! settles the legacy offset alias, parses weekdays and clock strings, drops
//! degenerate slots, and drops participants that cannot take part in a match.
//! Nothing here returns an error: every problem becomes either a fallback
//! value or a [`DroppedParticipant`] entry.

use std::collections::HashSet;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::clock::ClockTime;
use crate::convert::{is_valid_offset, parse_weekday};

/// One participant as supplied by a host.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParticipantInput {
    #[serde(default)]
    pub name: String,
    #[serde(default, alias = "location")]
    pub city: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<f64>,
    /// Legacy name for `offset`, still written by older records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone_offset: Option<f64>,
    #[serde(default)]
    pub timeslots: Vec<SlotInput>,
}

/// One weekly availability window in local time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotInput {
    #[serde(default)]
    pub day: String,
    #[serde(default)]
    pub start: String,
    #[serde(default)]
    pub end: String,
}

impl ParticipantInput {
    /// The effective offset: the first of `offset`, `timezone_offset` that is
    /// set, non-zero and a usable offset (finite, within ±24 hours);
    /// otherwise 0.
    pub fn effective_offset(&self) -> f64 {
        [self.offset, self.timezone_offset]
            .into_iter()
            .flatten()
            .find(|o| is_valid_offset(*o) && *o != 0.0)
            .unwrap_or(0.0)
    }
}

/// A resolved availability slot.
#[derive(Debug, Clone, PartialEq)]
pub struct AvailabilitySlot {
    pub weekday: Weekday,
    pub start: ClockTime,
    pub end: ClockTime,
    /// Start text as the participant wrote it, kept for display.
    pub start_text: String,
    pub end_text: String,
}

impl AvailabilitySlot {
    /// Resolve a slot, or `None` when its start and end are textually identical.
    ///
    /// An absent or unknown weekday reads as Monday; unparseable times read as
    /// midnight.
    pub fn resolve(input: &SlotInput) -> Option<Self> {
        if input.start == input.end {
            tracing::debug!(day = %input.day, start = %input.start, "dropping zero-length slot");
            return None;
        }

        let weekday = parse_weekday(&input.day).unwrap_or_else(|_| {
            tracing::debug!(day = %input.day, "unknown weekday, using Monday");
            Weekday::Mon
        });

        Some(Self {
            weekday,
            start: ClockTime::parse_lenient(&input.start),
            end: ClockTime::parse_lenient(&input.end),
            start_text: input.start.clone(),
            end_text: input.end.clone(),
        })
    }
}

/// A participant that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct Participant {
    pub name: String,
    pub city: String,
    pub timezone: Option<String>,
    /// Hours east of UTC.
    pub offset: f64,
    pub slots: Vec<AvailabilitySlot>,
}

/// Why a participant was left out of a matching run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropReason {
    MissingName,
    MissingCity,
    /// No slots at all, or none that survived slot validation.
    NoSlots,
    /// An earlier participant in the same run already uses this name.
    DuplicateName,
}

/// A participant excluded from matching, with its position in the input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DroppedParticipant {
    pub index: usize,
    pub name: String,
    pub reason: DropReason,
}

impl Participant {
    /// Resolve a single input record, ignoring name uniqueness.
    pub fn resolve(input: &ParticipantInput) -> Result<Self, DropReason> {
        if input.name.is_empty() {
            return Err(DropReason::MissingName);
        }
        if input.city.is_empty() {
            return Err(DropReason::MissingCity);
        }

        let slots: Vec<AvailabilitySlot> = input
            .timeslots
            .iter()
            .filter_map(AvailabilitySlot::resolve)
            .collect();
        if slots.is_empty() {
            return Err(DropReason::NoSlots);
        }

        Ok(Self {
            name: input.name.clone(),
            city: input.city.clone(),
            timezone: input.timezone.clone(),
            offset: input.effective_offset(),
            slots,
        })
    }
}

/// Resolve every input, splitting them into valid participants (in input order)
/// and dropped ones.
pub fn resolve_participants(
    inputs: &[ParticipantInput],
) -> (Vec<Participant>, Vec<DroppedParticipant>) {
    let mut valid = Vec::with_capacity(inputs.len());
    let mut dropped = Vec::new();
    let mut seen_names: HashSet<&str> = HashSet::new();

    for (index, input) in inputs.iter().enumerate() {
        let outcome = Participant::resolve(input).and_then(|participant| {
            if seen_names.insert(input.name.as_str()) {
                Ok(participant)
            } else {
                Err(DropReason::DuplicateName)
            }
        });

        match outcome {
            Ok(participant) => valid.push(participant),
            Err(reason) => {
                tracing::debug!(index, name = %input.name, ?reason, "dropping participant");
                dropped.push(DroppedParticipant {
                    index,
                    name: input.name.clone(),
                    reason,
                });
            }
        }
    }

    (valid, dropped)
}
