//! Normalization of the skills-tracker payload.
//!
//! The upstream response has no schema contract: fields move between
//! wrapper objects, get renamed, or disappear. Every extractor here searches
//! for its field by key pattern and falls back to a sentinel, so a single odd
//! field never prevents the rest of the payload from rendering.

use std::fmt;
use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::coerce::{first_present, first_truthy_text, is_scalar_text_or_number, to_number};
use crate::domain::format_number;
use crate::log::debug;
use crate::traverse::pick_deep;

pub const DISABLED_MESSAGE: &str = "TryHackMe integration is disabled.";

/// Upper bound on nested `data` envelopes that are unwrapped.
pub const MAX_ENVELOPE_DEPTH: usize = 5;

/// How many completed rooms a panel lists before summarizing the rest.
pub const ROOM_DISPLAY_LIMIT: usize = 20;

const SKILL_NAME_KEYS: [&str; 4] = ["name", "skill", "category", "title"];
const SKILL_VALUE_KEYS: [&str; 5] = ["score", "level", "value", "percent", "percentage"];
const ROOM_NAME_KEYS: [&str; 4] = ["title", "name", "roomName", "slug"];

static RANK_KEY: LazyLock<Regex> =
    LazyLock::new(|| key_pattern(r"(global.?rank|world.?rank|^rank$|ranking)"));
static ROOM_COUNT_KEY: LazyLock<Regex> = LazyLock::new(|| {
    key_pattern(r"(completedroomsnumber|rooms?completed|completedrooms|roomcount|rooms_count)")
});
static ROOM_LIST_KEY: LazyLock<Regex> =
    LazyLock::new(|| key_pattern(r"(completedrooms|roomscompleted|roomslist|rooms)"));
static SKILLS_KEY: LazyLock<Regex> =
    LazyLock::new(|| key_pattern(r"(skills?matrix|skillmatrix|skills?$)"));

#[allow(clippy::expect_used)]
fn key_pattern(pattern: &str) -> Regex {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .expect("key patterns are static literals")
}

/// A rank as reported upstream, without unit conversion.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Rank {
    Number(f64),
    /// A numeric string, kept exactly as sent.
    Text(String),
    #[default]
    Unknown,
}

impl Rank {
    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(number) => f.write_str(&format_number(*number)),
            Self::Text(text) => match text.trim().parse::<f64>() {
                Ok(number) if number.is_finite() => f.write_str(&format_number(number)),
                _ => f.write_str(text),
            },
            Self::Unknown => f.write_str("Unknown"),
        }
    }
}

impl Serialize for Rank {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Number(number) => serializer.serialize_f64(*number),
            Self::Text(text) => serializer.serialize_str(text),
            Self::Unknown => serializer.serialize_str("Unknown"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Skill {
    pub name: String,
    /// Proficiency on a 0-100 scale.
    pub value: f64,
}

impl Skill {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Canonical tracker record. Every field is always populated; absence is
/// expressed through sentinels (`Rank::Unknown`, `None`, empty lists).
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedStats {
    pub disabled: bool,
    /// Only set when `disabled`; the other fields are then meaningless.
    pub message: Option<String>,
    pub rank: Rank,
    pub room_count: Option<f64>,
    pub rooms: Vec<String>,
    /// Sorted by descending value, ties in discovery order.
    pub skills: Vec<Skill>,
    /// Upstream note explaining why the skills matrix may be empty.
    pub sync_note: Option<String>,
}

impl NormalizedStats {
    pub fn disabled(message: impl Into<String>) -> Self {
        Self {
            disabled: true,
            message: Some(message.into()),
            ..Self::default()
        }
    }

    /// Completed-room figure for summary panels: the explicit count, else the
    /// number of listed rooms, else "Unknown".
    pub fn rooms_completed_display(&self) -> String {
        match self.room_count {
            Some(count) => format_number(count),
            None if !self.rooms.is_empty() => format_number(self.rooms.len() as f64),
            None => "Unknown".to_string(),
        }
    }

    /// The first `limit` room names and how many were left out.
    pub fn visible_rooms(&self, limit: usize) -> (&[String], usize) {
        let shown = self.rooms.len().min(limit);
        (&self.rooms[..shown], self.rooms.len() - shown)
    }

    pub fn top_skills(&self, count: usize) -> &[Skill] {
        &self.skills[..self.skills.len().min(count)]
    }

    pub fn max_skill_value(&self) -> f64 {
        self.skills.iter().map(|skill| skill.value).fold(1.0, f64::max)
    }
}

/// Normalizes a raw tracker response. Never fails.
pub fn normalize(raw: &Value) -> NormalizedStats {
    if raw.get("enabled") == Some(&Value::Bool(false)) {
        let message = raw
            .get("message")
            .and_then(Value::as_str)
            .filter(|message| !message.is_empty())
            .unwrap_or(DISABLED_MESSAGE);
        debug!(reason = message, "tracker integration disabled upstream");
        return NormalizedStats::disabled(message);
    }

    let node = unwrap_envelope(raw);

    let stats = NormalizedStats {
        disabled: false,
        message: None,
        rank: extract_rank(node),
        room_count: extract_room_count(node),
        rooms: extract_rooms(node),
        skills: extract_skills(node),
        sync_note: extract_sync_note(node),
    };

    debug!(
        rank_known = stats.rank.is_known(),
        room_count = ?stats.room_count,
        rooms = stats.rooms.len(),
        skills = stats.skills.len(),
        "tracker payload normalized"
    );
    stats
}

/// Descends through nested `data` containers, at most [`MAX_ENVELOPE_DEPTH`]
/// levels. An array `data` is taken as the node; it has no `data` of its own.
pub fn unwrap_envelope(payload: &Value) -> &Value {
    let mut node = payload;
    for _ in 0..MAX_ENVELOPE_DEPTH {
        match node.get("data") {
            Some(inner @ (Value::Object(_) | Value::Array(_))) => node = inner,
            _ => break,
        }
    }
    node
}

pub fn extract_rank(data: &Value) -> Rank {
    let found = pick_deep(data, |key, value| {
        RANK_KEY.is_match(key)
            && match value {
                Value::Number(_) => true,
                Value::String(_) => to_number(value).is_some(),
                _ => false,
            }
    });

    match found {
        Some(Value::Number(number)) => number.as_f64().map_or(Rank::Unknown, Rank::Number),
        Some(Value::String(text)) => Rank::Text(text.clone()),
        _ => Rank::Unknown,
    }
}

/// Explicit completed-room count. `None` when absent or not numeric, which
/// keeps a real zero distinguishable from a missing field.
pub fn extract_room_count(data: &Value) -> Option<f64> {
    pick_deep(data, |key, value| {
        ROOM_COUNT_KEY.is_match(key) && is_scalar_text_or_number(value)
    })
    .and_then(to_number)
}

pub fn extract_rooms(data: &Value) -> Vec<String> {
    // empty lists are rejected so a more specific key further down can win
    let found = pick_deep(data, |key, value| {
        ROOM_LIST_KEY.is_match(key) && value.as_array().is_some_and(|rooms| !rooms.is_empty())
    });

    let Some(Value::Array(rooms)) = found else {
        return Vec::new();
    };

    rooms.iter().filter_map(room_name).collect()
}

fn room_name(room: &Value) -> Option<String> {
    match room {
        Value::String(name) if !name.is_empty() => Some(name.clone()),
        Value::Object(_) => first_truthy_text(room, &ROOM_NAME_KEYS),
        _ => None,
    }
}

pub fn extract_skills(data: &Value) -> Vec<Skill> {
    let matrix = direct_skills_matrix(data).or_else(|| {
        pick_deep(data, |key, value| {
            SKILLS_KEY.is_match(key) && (value.is_array() || value.is_object())
        })
    });

    let mut skills: Vec<Skill> = match matrix {
        Some(Value::Array(items)) => items.iter().filter_map(skill_from_item).collect(),
        Some(Value::Object(entries)) => entries
            .iter()
            .filter_map(|(name, value)| skill_from_entry(name, value))
            .collect(),
        _ => return Vec::new(),
    };

    debug!(count = skills.len(), "skills matrix extracted");

    // stable: equal values keep discovery order
    skills.sort_by(|a, b| b.value.total_cmp(&a.value));
    skills
}

fn direct_skills_matrix(data: &Value) -> Option<&Value> {
    data.as_object()?
        .iter()
        .find(|(key, value)| {
            let key = key.to_ascii_lowercase();
            (key == "skillsmatrix" || key == "skills_matrix")
                && (value.is_array() || value.is_object())
        })
        .map(|(_, value)| value)
}

fn skill_from_item(item: &Value) -> Option<Skill> {
    if !item.is_object() {
        return None;
    }
    let name = first_truthy_text(item, &SKILL_NAME_KEYS)?;
    let value = coerce_skill_value(first_present(item, &SKILL_VALUE_KEYS));
    Some(Skill { name, value })
}

fn skill_from_entry(name: &str, value: &Value) -> Option<Skill> {
    if name.is_empty() {
        return None;
    }
    let value = match value {
        Value::Number(_) | Value::String(_) => coerce_skill_value(Some(value)),
        // arrays carry no value keys and count as zero
        Value::Object(_) | Value::Array(_) => {
            coerce_skill_value(first_present(value, &SKILL_VALUE_KEYS))
        }
        Value::Null | Value::Bool(_) => return None,
    };
    Some(Skill::new(name, value))
}

fn coerce_skill_value(raw: Option<&Value>) -> f64 {
    normalize_value(raw.and_then(to_number).unwrap_or(f64::NAN))
}

/// Maps a raw proficiency onto the 0-100 scale.
///
/// Non-finite, negative and zero inputs (including `-0.0`) become `0.0`. Values up to 1 are fractions and
/// are scaled by 100; anything larger is already a percentage.
pub fn normalize_value(raw: f64) -> f64 {
    if !raw.is_finite() || raw <= 0.0 {
        return 0.0;
    }
    if raw <= 1.0 {
        raw * 100.0
    } else {
        raw
    }
}

fn extract_sync_note(data: &Value) -> Option<String> {
    data.get("skillsError")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|note| !note.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn assert_close(actual: f64, expected: f64) {
        let diff = (actual - expected).abs();
        assert!(diff < 1e-9, "expected {expected}, got {actual}, diff {diff}");
    }

    fn names(skills: &[Skill]) -> Vec<&str> {
        skills.iter().map(|skill| skill.name.as_str()).collect()
    }

    #[test]
    fn value_normalization_handles_both_conventions() {
        assert_close(normalize_value(0.8), 80.0);
        assert_close(normalize_value(80.0), 80.0);
        assert_close(normalize_value(1.0), 100.0);
        assert_close(normalize_value(0.0), 0.0);
        assert_close(normalize_value(-5.0), 0.0);
        assert!(normalize_value(-0.0).is_sign_positive());
        assert_close(normalize_value(f64::NAN), 0.0);
        assert_close(normalize_value(f64::INFINITY), 0.0);
    }

    #[test]
    fn disabled_payload_short_circuits() {
        let stats = normalize(&json!({
            "enabled": false,
            "message": "Set THM_USERNAME to enable TryHackMe stats.",
            "data": { "rank": 5 }
        }));

        assert!(stats.disabled);
        assert_eq!(
            stats.message.as_deref(),
            Some("Set THM_USERNAME to enable TryHackMe stats.")
        );
        assert_eq!(stats.rank, Rank::Unknown);
    }

    #[test]
    fn disabled_payload_without_message_uses_default() {
        let stats = normalize(&json!({ "enabled": false }));
        assert_eq!(stats.message.as_deref(), Some(DISABLED_MESSAGE));
    }

    #[test]
    fn enabled_true_is_not_disabled() {
        let stats = normalize(&json!({ "enabled": true, "data": { "rank": 10 } }));
        assert!(!stats.disabled);
        assert_eq!(stats.rank, Rank::Number(10.0));
    }

    #[test]
    fn rank_patterns_match_variants() {
        assert_eq!(extract_rank(&json!({ "globalRank": 1234 })), Rank::Number(1234.0));
        assert_eq!(extract_rank(&json!({ "world_rank": "77" })), Rank::Text("77".into()));
        assert_eq!(extract_rank(&json!({ "RANK": 3 })), Rank::Number(3.0));
        assert_eq!(extract_rank(&json!({ "ranking": 9 })), Rank::Number(9.0));
        assert_eq!(extract_rank(&json!({ "userRank": 9 })), Rank::Unknown);
        assert_eq!(extract_rank(&json!({ "rank": "top" })), Rank::Unknown);
        assert_eq!(extract_rank(&json!({ "rank": { "value": 1 } })), Rank::Unknown);
    }

    #[test]
    fn room_count_distinguishes_zero_from_missing() {
        assert_eq!(extract_room_count(&json!({ "completedRoomsNumber": 0 })), Some(0.0));
        assert_eq!(extract_room_count(&json!({ "roomsCompleted": "31" })), Some(31.0));
        assert_eq!(extract_room_count(&json!({ "completedRoomsNumber": "lots" })), None);
        assert_eq!(extract_room_count(&json!({ "other": 3 })), None);
    }

    #[test]
    fn room_names_come_from_strings_and_objects() {
        let rooms = extract_rooms(&json!({
            "completedRooms": [
                "Intro to Linux",
                { "title": "OWASP Top 10" },
                { "roomName": "Blue" },
                { "slug": "vulnversity" },
                { "difficulty": "easy" },
                "",
                42
            ]
        }));

        assert_eq!(rooms, ["Intro to Linux", "OWASP Top 10", "Blue", "vulnversity"]);
    }

    #[test]
    fn empty_room_list_defers_to_a_deeper_match() {
        let rooms = extract_rooms(&json!({
            "rooms": [],
            "profile": { "completedRooms": ["Pickle Rick"] }
        }));

        assert_eq!(rooms, ["Pickle Rick"]);
    }

    #[test]
    fn duplicate_room_names_are_kept() {
        let rooms = extract_rooms(&json!({ "rooms": ["Blue", "Blue"] }));
        assert_eq!(rooms, ["Blue", "Blue"]);
    }

    #[test]
    fn array_matrix_uses_field_precedence() {
        let skills = extract_skills(&json!({
            "skillsMatrix": [
                { "name": "Web", "score": 0.9, "level": 3 },
                { "skill": "Crypto", "level": 40 },
                { "category": "Forensics", "percent": "0.5" },
                { "title": "Network", "percentage": null, "value": 55 },
                { "value": 99 },
                "not an object"
            ]
        }));

        assert_eq!(names(&skills), ["Web", "Network", "Forensics", "Crypto"]);
        assert_close(skills[0].value, 90.0);
        assert_close(skills[1].value, 55.0);
        assert_close(skills[2].value, 50.0);
        assert_close(skills[3].value, 40.0);
    }

    #[test]
    fn array_entry_without_value_counts_as_zero() {
        let skills = extract_skills(&json!({ "skillsMatrix": [ { "name": "Recon" } ] }));
        assert_eq!(skills, [Skill::new("Recon", 0.0)]);
    }

    #[test]
    fn map_matrix_accepts_direct_and_nested_values() {
        let skills = extract_skills(&json!({
            "skills_matrix": {
                "Offense": 0.7,
                "Defense": "65",
                "Web": { "percentage": 0.2 },
                "Listed": [1, 2],
                "Ignored": null,
                "AlsoIgnored": true
            }
        }));

        assert_eq!(names(&skills), ["Offense", "Defense", "Web", "Listed"]);
        assert_close(skills[0].value, 70.0);
        assert_close(skills[1].value, 65.0);
        assert_close(skills[2].value, 20.0);
        assert_close(skills[3].value, 0.0);
    }

    #[test]
    fn direct_matrix_key_is_case_insensitive() {
        let skills = extract_skills(&json!({
            "SKILLSMATRIX": { "Web": 10 },
            "nested": { "skills": { "Other": 99 } }
        }));
        assert_eq!(names(&skills), ["Web"]);
    }

    #[test]
    fn deep_search_finds_nested_skills() {
        let skills = extract_skills(&json!({
            "profile": { "stats": { "userSkills": [ { "name": "Linux", "value": 12 } ] } }
        }));
        assert_eq!(skills, [Skill::new("Linux", 12.0)]);
    }

    #[test]
    fn skills_sort_descending_and_stable() {
        let skills = extract_skills(&json!({
            "skillsMatrix": [
                { "name": "a", "value": 50 },
                { "name": "b", "value": 80 },
                { "name": "c", "value": 80 }
            ]
        }));

        assert_eq!(names(&skills), ["b", "c", "a"]);
    }

    #[test]
    fn negative_zero_ties_with_zero() {
        let skills = extract_skills(&json!({ "skillsMatrix": { "A": "-0", "B": 0, "C": -0.0 } }));

        assert_eq!(names(&skills), ["A", "B", "C"]);
        assert!(skills.iter().all(|skill| skill.value.to_bits() == 0));

        let report = serde_json::to_string(&skills).unwrap_or_default();
        assert!(!report.contains("-0"), "{report}");
    }

    #[test]
    fn negative_and_garbage_values_clamp_to_zero() {
        let skills = extract_skills(&json!({
            "skillsMatrix": { "Neg": -5, "Junk": "abc", "Real": 3 }
        }));
        assert_eq!(
            skills,
            [Skill::new("Real", 3.0), Skill::new("Neg", 0.0), Skill::new("Junk", 0.0)]
        );
    }

    #[test]
    fn non_object_payloads_yield_sentinels() {
        for raw in [json!(null), json!(17), json!("text"), json!([1, 2, 3])] {
            let stats = normalize(&raw);
            assert!(!stats.disabled);
            assert_eq!(stats.rank, Rank::Unknown);
            assert_eq!(stats.room_count, None);
            assert!(stats.rooms.is_empty());
            assert!(stats.skills.is_empty());
        }
    }

    #[test]
    fn envelope_unwrapping_stops_at_bound() {
        let mut payload = json!({ "marker": 10 });
        for level in (0..10).rev() {
            payload = json!({ "marker": level, "data": payload });
        }

        assert_eq!(unwrap_envelope(&payload)["marker"], json!(5));
    }

    #[test]
    fn envelope_unwrapping_takes_array_data() {
        let payload = json!({ "data": [1, 2], "rank": 4 });
        assert_eq!(unwrap_envelope(&payload), &json!([1, 2]));

        let payload = json!({ "data": { "data": [ { "rank": 9 } ] } });
        assert_eq!(extract_rank(unwrap_envelope(&payload)), Rank::Number(9.0));
    }

    #[test]
    fn envelope_unwrapping_ignores_scalar_data() {
        for data in [json!("text"), json!(3), json!(null), json!(false)] {
            let payload = json!({ "data": data, "rank": 4 });
            assert_eq!(unwrap_envelope(&payload), &payload);
        }
    }

    #[test]
    fn sync_note_is_surfaced() {
        let stats = normalize(&json!({
            "enabled": true,
            "data": { "skillsError": "Skills endpoint returned no parsable matrix values." }
        }));
        assert_eq!(
            stats.sync_note.as_deref(),
            Some("Skills endpoint returned no parsable matrix values.")
        );
    }

    #[test]
    fn room_display_prefers_count_then_list_length() {
        let mut stats = NormalizedStats::default();
        assert_eq!(stats.rooms_completed_display(), "Unknown");

        stats.rooms = vec!["A".into(), "B".into()];
        assert_eq!(stats.rooms_completed_display(), "2");

        stats.room_count = Some(1250.0);
        assert_eq!(stats.rooms_completed_display(), "1,250");
    }

    #[test]
    fn visible_rooms_reports_overflow() {
        let stats = NormalizedStats {
            rooms: (0..25).map(|i| format!("Room {i}")).collect(),
            ..NormalizedStats::default()
        };

        let (shown, hidden) = stats.visible_rooms(ROOM_DISPLAY_LIMIT);
        assert_eq!(shown.len(), 20);
        assert_eq!(hidden, 5);
    }

    #[test]
    fn rank_display_formats_numbers() {
        assert_eq!(Rank::Number(123_456.0).to_string(), "123,456");
        assert_eq!(Rank::Text("98765".into()).to_string(), "98,765");
        assert_eq!(Rank::Unknown.to_string(), "Unknown");
    }

    #[test]
    fn stats_serialize_with_camel_case_and_sentinels() {
        let value = serde_json::to_value(NormalizedStats::default()).unwrap_or_default();
        assert_eq!(value["rank"], json!("Unknown"));
        assert_eq!(value["roomCount"], json!(null));
        assert_eq!(value["rooms"], json!([]));
        assert_eq!(value["disabled"], json!(false));
    }
}
