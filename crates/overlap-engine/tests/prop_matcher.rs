//! Property-based tests for the interval algebra and the matcher.
//!
//! These check invariants that should hold for *any* input, not just the
//! scenarios in `matcher_tests.rs`.

use chrono::Weekday;
use overlap_engine::clock::ClockTime;
use overlap_engine::convert::{offset_minutes, slot_to_interval, to_absolute_utc};
use overlap_engine::interval::{intersect, overlaps, AbsoluteInterval};
use overlap_engine::project::{convert_time, offset_label, render_local};
use overlap_engine::{find_matches, ParticipantInput, SlotInput};
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn arb_interval() -> impl Strategy<Value = AbsoluteInterval> {
    (0i64..10_080, 1i64..=1440).prop_map(|(start, len)| AbsoluteInterval {
        start,
        end: start + len,
    })
}

fn arb_weekday() -> impl Strategy<Value = Weekday> {
    prop_oneof![
        Just(Weekday::Mon),
        Just(Weekday::Tue),
        Just(Weekday::Wed),
        Just(Weekday::Thu),
        Just(Weekday::Fri),
        Just(Weekday::Sat),
        Just(Weekday::Sun),
    ]
}

/// Offsets in quarter hours between UTC-12 and UTC+14.
fn arb_offset() -> impl Strategy<Value = f64> {
    (-48i32..=56).prop_map(|q| f64::from(q) / 4.0)
}

/// Clock strings on a 15-minute grid.
fn arb_clock() -> impl Strategy<Value = String> {
    (0i64..96).prop_map(|q| ClockTime::from_minutes(q * 15).to_string())
}

fn arb_day_name() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Monday".to_string()),
        Just("Tuesday".to_string()),
        Just("Wednesday".to_string()),
    ]
}

fn arb_participants() -> impl Strategy<Value = Vec<ParticipantInput>> {
    prop::collection::vec(
        (
            arb_offset(),
            prop::collection::vec((arb_day_name(), arb_clock(), arb_clock()), 1..4),
        ),
        0..6,
    )
    .prop_map(|people| {
        people
            .into_iter()
            .enumerate()
            .map(|(i, (offset, slots))| ParticipantInput {
                name: format!("p{i}"),
                city: "Somewhere".to_string(),
                offset: Some(offset),
                timeslots: slots
                    .into_iter()
                    .map(|(day, start, end)| SlotInput { day, start, end })
                    .collect(),
                ..Default::default()
            })
            .collect()
    })
}

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Interval algebra
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn overlap_is_symmetric(a in arb_interval(), b in arb_interval()) {
        prop_assert_eq!(overlaps(&a, &b), overlaps(&b, &a));
        prop_assert_eq!(intersect(&a, &b), intersect(&b, &a));
    }

    #[test]
    fn intersection_lies_within_both(a in arb_interval(), b in arb_interval()) {
        if let Some(i) = intersect(&a, &b) {
            prop_assert!(i.start < i.end);
            prop_assert!(i.start >= a.start && i.end <= a.end);
            prop_assert!(i.start >= b.start && i.end <= b.end);
        } else {
            prop_assert!(!overlaps(&a, &b));
        }
    }
}

// ---------------------------------------------------------------------------
// Conversion
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn local_to_utc_and_back_round_trips(
        clock in arb_clock(),
        offset in arb_offset(),
        weekday in arb_weekday(),
    ) {
        let parsed: ClockTime = clock.parse().unwrap();
        let pos = to_absolute_utc(&parsed, offset, weekday);
        prop_assert!((0..1440).contains(&pos.minute_of_day));
        prop_assert_eq!(render_local(pos.absolute() as f64, offset), clock);
    }

    #[test]
    fn slot_interval_is_never_empty(
        start in arb_clock(),
        end in arb_clock(),
        offset in arb_offset(),
        weekday in arb_weekday(),
    ) {
        let interval = slot_to_interval(
            &start.parse().unwrap(),
            &end.parse().unwrap(),
            offset,
            weekday,
        );
        prop_assert!(interval.end > interval.start);
        prop_assert!(interval.duration_minutes() <= 1440);
        prop_assert!((0..10_080).contains(&interval.start));
    }

    #[test]
    fn offset_minutes_matches_quarter_hours(offset in arb_offset()) {
        prop_assert_eq!(offset_minutes(offset) % 15, 0);
    }

    #[test]
    fn any_offset_converts_without_overflow(
        clock in arb_clock(),
        offset in prop::num::f64::ANY,
        other in prop::num::f64::ANY,
        weekday in arb_weekday(),
    ) {
        let parsed: ClockTime = clock.parse().unwrap();
        let pos = to_absolute_utc(&parsed, offset, weekday);
        prop_assert!((0..1440).contains(&pos.minute_of_day));
        prop_assert!(offset_minutes(offset).abs() <= 1440);
        let _ = render_local(pos.absolute() as f64, offset);
        let _ = convert_time(&clock, offset, other);
        prop_assert!(offset_label(offset).starts_with("GMT"));
    }
}

// ---------------------------------------------------------------------------
// Matcher
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn matching_is_deterministic(people in arb_participants()) {
        prop_assert_eq!(find_matches(&people), find_matches(&people));
    }

    #[test]
    fn every_match_has_two_distinct_attendees(people in arb_participants()) {
        for m in find_matches(&people) {
            prop_assert!(m.match_count >= 2);
            prop_assert_eq!(m.match_count, m.available.len());
            prop_assert_eq!(m.match_count + m.unavailable.len(), m.total_count);
            prop_assert!(m.duration_minutes > 0);
        }
    }

    #[test]
    fn complete_matches_come_first(people in arb_participants()) {
        let matches = find_matches(&people);
        for pair in matches.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            prop_assert!(a.is_complete() || !b.is_complete());
            if a.is_complete() == b.is_complete() {
                prop_assert!(a.match_count >= b.match_count);
            }
        }
    }

    #[test]
    fn matching_survives_any_offset(
        offsets in prop::collection::vec(prop::num::f64::ANY, 2..5),
    ) {
        let people: Vec<ParticipantInput> = offsets
            .into_iter()
            .enumerate()
            .map(|(i, offset)| ParticipantInput {
                name: format!("p{i}"),
                city: "Somewhere".to_string(),
                offset: Some(offset),
                timeslots: vec![SlotInput {
                    day: "Monday".to_string(),
                    start: "9:00 AM".to_string(),
                    end: "5:00 PM".to_string(),
                }],
                ..Default::default()
            })
            .collect();
        for m in find_matches(&people) {
            prop_assert!(m.duration_minutes > 0);
        }
    }

    #[test]
    fn fewer_than_two_people_never_match(people in arb_participants()) {
        let few: Vec<ParticipantInput> = people.into_iter().take(1).collect();
        prop_assert!(find_matches(&few).is_empty());
    }
}
