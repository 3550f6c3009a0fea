//! Serde roundtrip tests for the mission snapshot format.
//!
//! Snapshots are the JSON files callers persist between a pull and a push,
//! so every aggregate type must survive a roundtrip unchanged.

use chrono::{TimeZone, Utc};
use msn_core::*;
use pretty_assertions::assert_eq;

fn sample_mission() -> MissionData {
    MissionData {
        mission_repo_data: MissionRepoData::new(
            &RepoCoordinates::new("cs1101s", "mission-runes"),
            Some(Utc.with_ymd_and_hms(2026, 8, 1, 9, 0, 0).unwrap()),
        ),
        mission_briefing: "# Rune Reading\n\nDraw the runes.".into(),
        mission_metadata: MissionMetadata {
            title: "Rune Reading".into(),
            number: 1,
            ..MissionMetadata::default()
        },
        tasks_data: vec![
            TaskData {
                question_number: 1,
                task_description: "Write `mosaic`.".into(),
                starter_code: "function mosaic(a, b, c, d) {\n}\n".into(),
                saved_code: "function mosaic(a, b, c, d) {\n  return a;\n}\n".into(),
                test_prepend: String::new(),
                test_postpend: String::new(),
                test_cases: vec![TestCase {
                    answer: "true".into(),
                    program: "is_rune(mosaic(r, r, r, r));".into(),
                    score: Some(2_i64.into()),
                    kind: TestcaseKind::Opaque,
                }],
            },
            TaskData {
                question_number: 2,
                task_description: mcq::encode(&McqQuestion {
                    choices: vec![McqChoice {
                        content: "heart".into(),
                        hint: String::new(),
                    }],
                    answer: 0,
                    solution: 0,
                })
                .unwrap(),
                ..TaskData::new(2)
            },
        ],
    }
}

#[test]
fn mission_snapshot_roundtrip() {
    let mission = sample_mission();
    let json = serde_json::to_string_pretty(&mission).unwrap();
    let recovered: MissionData = serde_json::from_str(&json).unwrap();
    assert_eq!(recovered, mission);
}

#[test]
fn sparse_snapshot_fills_defaults() {
    let json = r#"{
        "mission_repo_data": {"repo_owner": "o", "repo_name": "r"},
        "tasks_data": [{"question_number": 1, "starter_code": "x"}]
    }"#;
    let mission: MissionData = serde_json::from_str(json).unwrap();
    assert_eq!(mission.mission_metadata, MissionMetadata::default());
    assert_eq!(mission.mission_repo_data.date_of_creation, None);
    assert_eq!(mission.tasks_data[0].starter_code, "x");
    assert!(mission.tasks_data[0].test_cases.is_empty());
    assert!(mission.validate_task_order().is_ok());
}

#[test]
fn embedded_mcq_decodes_from_snapshot_task() {
    let mission = sample_mission();
    let question = mcq::try_decode(&mission.tasks_data[1].task_description).unwrap();
    assert_eq!(question.choices[0].content, "heart");
    assert!(mcq::try_decode(&mission.tasks_data[0].task_description).is_none());
}
