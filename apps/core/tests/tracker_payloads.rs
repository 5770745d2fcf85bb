use portfolio_core::{normalize, NormalizedStats, Rank, RadarLayout, Skill};
use serde_json::{json, Value};

/// Shape produced by the portfolio backend when both upstream calls succeed.
fn backend_payload() -> Value {
    json!({
        "enabled": true,
        "data": {
            "publicProfile": {
                "status": "success",
                "data": {
                    "username": "phantom",
                    "rank": 48213,
                    "completedRoomsNumber": 112,
                    "badgesNumber": 19,
                    "completedRooms": [
                        { "roomName": "Pre Security", "code": "presecurity" },
                        { "title": "Nmap", "code": "furthernmap" },
                        { "code": "unnamed" }
                    ]
                }
            },
            "skillsResponse": {
                "role": "Foundational",
                "segment": "entry",
                "data": { "skills": { "securityOperations": 3 } }
            },
            "skillsMatrix": [
                { "name": "Security Operations", "value": 0.62 },
                { "name": "Incident Response", "value": 0.41 },
                { "name": "Malware Analysis", "value": 0.0 },
                { "name": "Penetration Testing", "value": 0.88 },
                { "name": "Exploitation", "value": 0.41 },
                { "name": "Red Teaming", "value": 0.15 }
            ]
        }
    })
}

fn assert_close(actual: f64, expected: f64) {
    let diff = (actual - expected).abs();
    assert!(diff < 1e-9, "expected {expected}, got {actual}, diff {diff}");
}

#[test]
fn backend_payload_normalizes_every_field() {
    let stats = normalize(&backend_payload());

    assert!(!stats.disabled);
    assert_eq!(stats.rank, Rank::Number(48213.0));
    assert_eq!(stats.room_count, Some(112.0));
    assert_eq!(stats.rooms, ["Pre Security", "Nmap"]);

    let names: Vec<&str> = stats.skills.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(
        names,
        [
            "Penetration Testing",
            "Security Operations",
            "Incident Response",
            "Exploitation",
            "Red Teaming",
            "Malware Analysis",
        ]
    );
    assert_close(stats.skills[0].value, 88.0);
    assert_close(stats.skills[5].value, 0.0);
}

#[test]
fn count_without_room_names_is_still_reported() {
    let stats = normalize(&json!({ "completedRoomsNumber": 12 }));
    assert_eq!(stats.room_count, Some(12.0));
    assert!(stats.rooms.is_empty());
    assert_eq!(stats.rooms_completed_display(), "12");
}

#[test]
fn ten_envelopes_unwrap_only_five_levels() {
    // rank sits between the 3rd and 4th wrapper, above where unwrapping stops
    let mut payload = json!({ "skillsMatrix": { "Deep": 50 } });
    for level in (0..10).rev() {
        payload = if level == 3 {
            json!({ "rank": 7, "data": payload })
        } else {
            json!({ "data": payload })
        };
    }

    let stats = normalize(&payload);
    assert_eq!(stats.rank, Rank::Unknown);
    // deeper fields are still reachable by the deep search from level five
    assert_eq!(stats.skills, [Skill::new("Deep", 50.0)]);
}

#[test]
fn odd_fields_never_block_the_rest() {
    let stats = normalize(&json!({
        "data": {
            "rank": { "nested": true },
            "ranking": "n/a",
            "worldRank": "1502",
            "rooms": "not a list",
            "roomsList": [ null, 3, { "slug": "intro" } ],
            "skills": "none",
            "userSkills": { "Web": "0.5", "Bad": { "score": "x" } }
        }
    }));

    assert_eq!(stats.rank, Rank::Text("1502".to_string()));
    assert_eq!(stats.rooms, ["intro"]);
    assert_eq!(stats.skills, [Skill::new("Web", 50.0), Skill::new("Bad", 0.0)]);
    assert_eq!(stats.room_count, None);
}

#[test]
fn normalizing_twice_gives_identical_results() {
    let payload = backend_payload();
    assert_eq!(normalize(&payload), normalize(&payload));
}

#[test]
fn normalized_skills_feed_the_radar() {
    let stats = normalize(&backend_payload());
    let layout = RadarLayout::new(stats.top_skills(5));

    assert_eq!(layout.points.len(), 5);
    assert_eq!(layout.points[0].name, "Penetration Testing");
    assert_close(layout.points[0].fraction, 1.0);
    assert_close(layout.max_value, 88.0);
    assert!(layout
        .points
        .iter()
        .all(|point| point.fraction >= 0.15 && point.fraction <= 1.0));
}

#[test]
fn disabled_payload_renders_only_its_message() {
    let stats = normalize(&json!({ "enabled": false, "message": "off for now" }));
    assert_eq!(
        stats,
        NormalizedStats::disabled("off for now"),
    );
}
