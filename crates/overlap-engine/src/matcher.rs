//! Group participants' weekly availability into shared meeting windows.
//!
//! Every slot of every valid participant becomes an [`AbsoluteInterval`].
//! Overlapping intervals are clustered, each cluster is reduced to the window
//! all of its members share, and clusters with at least two distinct
//! participants become [`MatchResult`]s, complete matches first.
//!
//! Clustering is O(n²) in the number of slots per cluster bucket under
//! [`Grouping::StartDay`], which is fine for the tens of slots a meeting
//! collects but is not meant for thousands.

use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet, VecDeque};

use serde::{Deserialize, Serialize};

use crate::convert::{slot_to_interval, weekday_name};
use crate::error::Result;
use crate::interval::{intersect_all, overlaps, AbsoluteInterval};
use crate::participant::{resolve_participants, DroppedParticipant, Participant, ParticipantInput};
use crate::project::render_local;

/// Fewest distinct participants a match may have.
pub const MIN_MATCH_PARTICIPANTS: usize = 2;

/// How slots are clustered before their common window is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Grouping {
    /// Only slots starting on the same UTC day are clustered together. Two
    /// slots that overlap across a UTC midnight but start on different days
    /// never match.
    #[default]
    StartDay,
    /// One sort-and-sweep pass over the whole week, so overlaps across a UTC
    /// midnight are found too.
    Sweep,
}

/// Tuning for a matching run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MatchOptions {
    pub grouping: Grouping,
    /// Shared windows shorter than this are discarded.
    #[serde(alias = "min_duration_minutes")]
    pub min_duration_minutes: i64,
}

/// A participant who can attend a match, with the window in their local time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableParticipant {
    pub name: String,
    pub city: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    pub offset: f64,
    pub local_start_time: String,
    pub local_end_time: String,
    /// The slot as the participant declared it.
    pub original_start: String,
    pub original_end: String,
}

/// A valid participant with no slot in a match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnavailableParticipant {
    pub name: String,
    pub city: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    pub offset: f64,
}

/// A window shared by two or more participants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    /// UTC weekday the shared window starts on.
    pub day: String,
    pub utc_start: String,
    pub utc_end: String,
    /// Window bounds in the local time of the cluster's first slot owner.
    pub start: String,
    pub end: String,
    pub duration_minutes: i64,
    pub available: Vec<AvailableParticipant>,
    pub unavailable: Vec<UnavailableParticipant>,
    pub match_count: usize,
    pub total_count: usize,
    /// The shared window on the absolute timeline.
    #[serde(skip)]
    pub window: AbsoluteInterval,
}

impl MatchResult {
    /// Every valid participant can attend.
    pub fn is_complete(&self) -> bool {
        self.match_count == self.total_count
    }
}

/// Matches plus the bookkeeping needed to explain an empty result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchReport {
    pub matches: Vec<MatchResult>,
    pub valid_participants: usize,
    pub dropped: Vec<DroppedParticipant>,
}

impl MatchReport {
    /// Whether enough participants survived validation for any match to exist.
    pub fn has_enough_participants(&self) -> bool {
        self.valid_participants >= MIN_MATCH_PARTICIPANTS
    }
}

/// A slot's interval, tagged with the participant and slot it came from.
#[derive(Debug, Clone, Copy)]
struct SlotEntry {
    participant: usize,
    slot: usize,
    interval: AbsoluteInterval,
}

/// Find shared availability windows with default options.
pub fn find_matches(participants: &[ParticipantInput]) -> Vec<MatchResult> {
    find_matches_with_options(participants, &MatchOptions::default())
}

/// Find shared availability windows.
pub fn find_matches_with_options(
    participants: &[ParticipantInput],
    options: &MatchOptions,
) -> Vec<MatchResult> {
    find_matches_with_report(participants, options).matches
}

/// Find shared availability windows and report which inputs were dropped.
pub fn find_matches_with_report(
    participants: &[ParticipantInput],
    options: &MatchOptions,
) -> MatchReport {
    let (valid, dropped) = resolve_participants(participants);
    let matches = match_participants(&valid, options);
    MatchReport {
        matches,
        valid_participants: valid.len(),
        dropped,
    }
}

/// Parse a JSON array of participants and return the matches as JSON.
pub fn find_matches_json(participants_json: &str, options: &MatchOptions) -> Result<String> {
    let inputs: Vec<ParticipantInput> = serde_json::from_str(participants_json)?;
    let matches = find_matches_with_options(&inputs, options);
    Ok(serde_json::to_string(&matches)?)
}

/// Match already-resolved participants.
///
/// Participants are assumed valid and uniquely named; see
/// [`resolve_participants`] for how raw input gets there.
pub fn match_participants(participants: &[Participant], options: &MatchOptions) -> Vec<MatchResult> {
    if participants.len() < MIN_MATCH_PARTICIPANTS {
        return Vec::new();
    }

    let entries = build_entries(participants);
    let clusters = match options.grouping {
        Grouping::StartDay => cluster_by_start_day(&entries),
        Grouping::Sweep => cluster_by_sweep(&entries),
    };
    tracing::trace!(
        slots = entries.len(),
        clusters = clusters.len(),
        "clustered availability slots"
    );

    let mut matches: Vec<MatchResult> = clusters
        .iter()
        .filter_map(|cluster| build_match(participants, &entries, cluster, options))
        .collect();

    // Complete matches first, then by attendance. The sort is stable, so ties
    // keep discovery order.
    matches.sort_by_key(|m| (!m.is_complete(), Reverse(m.match_count)));
    matches
}

fn build_entries(participants: &[Participant]) -> Vec<SlotEntry> {
    participants
        .iter()
        .enumerate()
        .flat_map(|(p_idx, participant)| {
            participant
                .slots
                .iter()
                .enumerate()
                .map(move |(s_idx, slot)| SlotEntry {
                    participant: p_idx,
                    slot: s_idx,
                    interval: slot_to_interval(
                        &slot.start,
                        &slot.end,
                        participant.offset,
                        slot.weekday,
                    ),
                })
        })
        .collect()
}

/// Bucket entries by the UTC day their interval starts on, then split each
/// bucket into connected components of the overlap graph.
fn cluster_by_start_day(entries: &[SlotEntry]) -> Vec<Vec<usize>> {
    let mut buckets: BTreeMap<i64, Vec<usize>> = BTreeMap::new();
    for (idx, entry) in entries.iter().enumerate() {
        buckets
            .entry(entry.interval.start_day())
            .or_default()
            .push(idx);
    }

    buckets
        .values()
        .flat_map(|members| connected_components(entries, members))
        .collect()
}

/// Breadth-first walk of the overlap graph restricted to `members`.
///
/// Each component lists entry indices in ascending order, so its first element
/// is the earliest declared slot.
fn connected_components(entries: &[SlotEntry], members: &[usize]) -> Vec<Vec<usize>> {
    let mut visited = vec![false; members.len()];
    let mut components = Vec::new();

    for seed in 0..members.len() {
        if visited[seed] {
            continue;
        }
        visited[seed] = true;

        let mut component = Vec::new();
        let mut queue = VecDeque::from([seed]);
        while let Some(current) = queue.pop_front() {
            component.push(members[current]);
            let current_interval = &entries[members[current]].interval;
            for other in 0..members.len() {
                if !visited[other] && overlaps(current_interval, &entries[members[other]].interval) {
                    visited[other] = true;
                    queue.push_back(other);
                }
            }
        }

        component.sort_unstable();
        components.push(component);
    }

    components
}

/// Sort all entries by start and sweep, closing a cluster whenever the next
/// interval starts at or after the furthest end seen so far.
fn cluster_by_sweep(entries: &[SlotEntry]) -> Vec<Vec<usize>> {
    let mut order: Vec<usize> = (0..entries.len()).collect();
    order.sort_by_key(|&idx| (entries[idx].interval.start, entries[idx].interval.end, idx));

    let mut clusters: Vec<Vec<usize>> = Vec::new();
    let mut current: Vec<usize> = Vec::new();
    let mut reach = i64::MIN;

    for idx in order {
        let interval = entries[idx].interval;
        if !current.is_empty() && interval.start >= reach {
            clusters.push(std::mem::take(&mut current));
        }
        reach = if current.is_empty() {
            interval.end
        } else {
            reach.max(interval.end)
        };
        current.push(idx);
    }
    if !current.is_empty() {
        clusters.push(current);
    }

    for cluster in &mut clusters {
        cluster.sort_unstable();
    }
    clusters
}

fn build_match(
    participants: &[Participant],
    entries: &[SlotEntry],
    cluster: &[usize],
    options: &MatchOptions,
) -> Option<MatchResult> {
    let Some(window) = intersect_all(cluster.iter().map(|&idx| &entries[idx].interval)) else {
        tracing::debug!(size = cluster.len(), "cluster has no common window");
        return None;
    };

    let attending: BTreeSet<usize> = cluster.iter().map(|&idx| entries[idx].participant).collect();
    if attending.len() < MIN_MATCH_PARTICIPANTS {
        tracing::debug!(
            participant = %participants[entries[cluster[0]].participant].name,
            "cluster has a single participant"
        );
        return None;
    }

    if window.duration_minutes() < options.min_duration_minutes {
        tracing::debug!(
            duration = window.duration_minutes(),
            min = options.min_duration_minutes,
            "shared window too short"
        );
        return None;
    }

    let start = window.start as f64;
    let end = window.end as f64;

    let mut available = Vec::with_capacity(attending.len());
    let mut unavailable = Vec::new();
    for (p_idx, participant) in participants.iter().enumerate() {
        let first_slot = cluster
            .iter()
            .map(|&idx| &entries[idx])
            .find(|entry| entry.participant == p_idx);

        match first_slot {
            Some(entry) => {
                let slot = &participant.slots[entry.slot];
                available.push(AvailableParticipant {
                    name: participant.name.clone(),
                    city: participant.city.clone(),
                    timezone: participant.timezone.clone(),
                    offset: participant.offset,
                    local_start_time: render_local(start, participant.offset),
                    local_end_time: render_local(end, participant.offset),
                    original_start: slot.start_text.clone(),
                    original_end: slot.end_text.clone(),
                });
            }
            None => unavailable.push(UnavailableParticipant {
                name: participant.name.clone(),
                city: participant.city.clone(),
                timezone: participant.timezone.clone(),
                offset: participant.offset,
            }),
        }
    }

    let lead_offset = participants[entries[cluster[0]].participant].offset;

    Some(MatchResult {
        day: weekday_name(window.start_weekday()).to_string(),
        utc_start: render_local(start, 0.0),
        utc_end: render_local(end, 0.0),
        start: render_local(start, lead_offset),
        end: render_local(end, lead_offset),
        duration_minutes: window.duration_minutes(),
        match_count: available.len(),
        total_count: participants.len(),
        available,
        unavailable,
        window,
    })
}
