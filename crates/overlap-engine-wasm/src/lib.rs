//! WASM bindings for overlap-engine.
//!
//! Exposes availability matching and clock conversion to JavaScript via
//! `wasm-bindgen`. Participant lists, options and results cross the boundary
//! as JSON strings using the same field names the web client already stores
//! (`timezone_offset`, `timeslots`, `matchCount`, ...).
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p overlap-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir packages/timematch-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/overlap_engine_wasm.wasm
//! ```

use overlap_engine::{MatchOptions, ParticipantInput};
use serde::Serialize;
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// JSON helpers
// ---------------------------------------------------------------------------

fn parse_participants(json: &str) -> Result<Vec<ParticipantInput>, String> {
    serde_json::from_str(json).map_err(|e| format!("Invalid participants JSON: {}", e))
}

/// An empty or whitespace-only string means default options.
fn parse_options(json: &str) -> Result<MatchOptions, String> {
    if json.trim().is_empty() {
        return Ok(MatchOptions::default());
    }
    serde_json::from_str(json).map_err(|e| format!("Invalid options JSON: {}", e))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization error: {}", e))
}

fn matches_json(participants_json: &str, options_json: &str) -> Result<String, String> {
    let participants = parse_participants(participants_json)?;
    let options = parse_options(options_json)?;
    to_json(&overlap_engine::find_matches_with_options(&participants, &options))
}

fn report_json(participants_json: &str, options_json: &str) -> Result<String, String> {
    let participants = parse_participants(participants_json)?;
    let options = parse_options(options_json)?;
    to_json(&overlap_engine::find_matches_with_report(&participants, &options))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Find shared availability windows.
///
/// `participants_json` is a JSON array of
/// `{name, city, offset | timezone_offset, timeslots: [{day, start, end}]}`.
/// Returns a JSON array of match objects, complete matches first.
#[wasm_bindgen(js_name = "findMatches")]
pub fn find_matches(participants_json: &str) -> Result<String, JsValue> {
    matches_json(participants_json, "").map_err(|e| JsValue::from_str(&e))
}

/// Like [`find_matches`], with a JSON options object
/// (`{"grouping": "start-day" | "sweep", "minDurationMinutes": n}`;
/// `min_duration_minutes` is also accepted).
#[wasm_bindgen(js_name = "findMatchesWithOptions")]
pub fn find_matches_with_options(
    participants_json: &str,
    options_json: &str,
) -> Result<String, JsValue> {
    matches_json(participants_json, options_json).map_err(|e| JsValue::from_str(&e))
}

/// Matches together with the count of valid participants and the list of
/// dropped ones, so the UI can tell "no overlap" from "not enough people".
#[wasm_bindgen(js_name = "matchReport")]
pub fn match_report(participants_json: &str, options_json: &str) -> Result<String, JsValue> {
    report_json(participants_json, options_json).map_err(|e| JsValue::from_str(&e))
}

/// Re-express a 12-hour clock string from one UTC offset in another.
#[wasm_bindgen(js_name = "convertTime")]
pub fn convert_time(time: &str, from_offset: f64, to_offset: f64) -> String {
    overlap_engine::convert_time(time, from_offset, to_offset)
}

/// Render an offset as `GMT+5:30`.
#[wasm_bindgen(js_name = "offsetLabel")]
pub fn offset_label(offset: f64) -> String {
    overlap_engine::offset_label(offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARTICIPANTS: &str = r#"[
        {"name": "Alice", "city": "New York", "timezone_offset": -5,
         "timeslots": [{"day": "Monday", "start": "9:00 AM", "end": "5:00 PM"}]},
        {"name": "Bob", "city": "London", "offset": 0,
         "timeslots": [{"day": "Monday", "start": "3:00 PM", "end": "6:00 PM"}]}
    ]"#;

    #[test]
    fn matches_round_trip_through_json() {
        let out = matches_json(PARTICIPANTS, "").unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 1);
        assert_eq!(value[0]["utcStart"], "3:00 PM");
        assert_eq!(value[0]["utcEnd"], "6:00 PM");
        assert_eq!(value[0]["available"][0]["localStartTime"], "10:00 AM");
    }

    #[test]
    fn options_are_parsed() {
        let out = matches_json(PARTICIPANTS, r#"{"minDurationMinutes": 240}"#).unwrap();
        assert_eq!(out, "[]");
        let out = matches_json(PARTICIPANTS, r#"{"min_duration_minutes": 240}"#).unwrap();
        assert_eq!(out, "[]");
        let out = matches_json(PARTICIPANTS, r#"{"minDurationMinutes": 60}"#).unwrap();
        assert_ne!(out, "[]");
        assert!(matches_json(PARTICIPANTS, r#"{"grouping": "sideways"}"#).is_err());
    }

    #[test]
    fn report_lists_dropped_participants() {
        let json = r#"[{"name": "", "city": "Nowhere", "timeslots": []}]"#;
        let out = report_json(json, "").unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["validParticipants"], 0);
        assert_eq!(value["dropped"][0]["reason"], "missing_name");
    }

    #[test]
    fn malformed_participants_are_rejected() {
        assert!(matches_json("{", "").is_err());
    }

    #[test]
    fn helpers_pass_through() {
        assert_eq!(convert_time("9:00 AM", -5.0, 0.0), "2:00 PM");
        assert_eq!(offset_label(5.5), "GMT+5:30");
    }
}
