//! Integration tests for campus CLI commands.
//!
//! Uses tempfile for scenario files.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use campus::cli::{CliError, cmd_grade, cmd_run, cmd_standing, load_scenario};
use campus::scenario::ScenarioError;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Create a temporary directory for tests.
fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Write `content` as a scenario file.
fn write_scenario(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("scenario.json");
    std::fs::write(&path, content).unwrap();
    path
}

/// The demo scenario shipped with the repository.
fn sample_scenario() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos/sample_scenario.json")
}

const CAPACITY_TWO: &str = r#"{
    "today": "2024-09-02",
    "courses": [
        {"code": "CS101", "name": "Intro", "department": "CS", "credits": 3, "capacity": 2}
    ],
    "students": [
        {"key": "a", "first_name": "Ann", "last_name": "A", "email": "a@uni.edu", "major": "CS"},
        {"key": "b", "first_name": "Ben", "last_name": "B", "email": "b@uni.edu", "major": "CS"},
        {"key": "c", "first_name": "Cat", "last_name": "C", "email": "c@uni.edu", "major": "CS"}
    ],
    "actions": [
        {"action": "enroll", "student": "a", "course": "CS101"},
        {"action": "enroll", "student": "b", "course": "CS101"},
        {"action": "enroll", "student": "c", "course": "CS101"},
        {"action": "enroll", "student": "a", "course": "CS101"},
        {"action": "grade", "student": "a", "course": "CS101", "grade": "A"},
        {"action": "grade", "student": "c", "course": "CS101", "grade": "B"}
    ]
}"#;

// =============================================================================
// RUN COMMAND TESTS
// =============================================================================

#[test]
fn test_run_prints_transcripts() {
    let temp = create_temp_dir();
    let path = write_scenario(&temp, CAPACITY_TWO);

    let output = cmd_run(&path, false).unwrap();

    assert!(output.contains("OFFICIAL TRANSCRIPT"));
    assert!(output.contains("Student ID: STU00001"));
    assert!(output.contains("Student ID: STU00003"));
    assert!(output.contains("Generated: 2024-09-02"));
    assert!(output.contains("Enrollment: 2/2"));
    assert!(output.contains("REJECTED:"));
    assert!(output.contains("#2 enroll c in CS101"));
}

#[test]
fn test_run_json_output() {
    let temp = create_temp_dir();
    let path = write_scenario(&temp, CAPACITY_TWO);

    let output = cmd_run(&path, true).unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();

    let transcripts = value["transcripts"].as_array().unwrap();
    assert_eq!(transcripts.len(), 3);
    assert_eq!(transcripts[0]["student_id"], "STU00001");
    assert_eq!(transcripts[0]["gpa"], "4.00");
    assert_eq!(transcripts[0]["enrollments"][0]["final_grade"], "A");
    assert_eq!(transcripts[2]["total_credits"], 0);

    let steps: Vec<u64> = value["rejected"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["step"].as_u64().unwrap())
        .collect();
    // c is refused a seat, a's second attempt hits the full course, and
    // c has nothing to grade.
    assert_eq!(steps, vec![2, 3, 5]);
}

#[test]
fn test_run_sample_scenario() {
    let output = cmd_run(&sample_scenario(), true).unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();

    let alice = &value["transcripts"][0];
    assert_eq!(alice["student_name"], "Alice Murphy");
    assert_eq!(alice["gpa"], "3.65");
    assert_eq!(alice["total_credits"], 9);
    assert_eq!(value["honor_roll"][0], "Alice Murphy");

    let reasons: Vec<&str> = value["rejected"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["reason"].as_str().unwrap())
        .collect();
    assert_eq!(reasons.len(), 4);
    assert!(reasons[3].contains("not active"));
}

#[test]
fn test_run_missing_file() {
    let temp = create_temp_dir();
    let result = cmd_run(&temp.path().join("nope.json"), false);
    assert!(matches!(result, Err(CliError::Io { .. })));
}

#[test]
fn test_run_invalid_json() {
    let temp = create_temp_dir();
    let path = write_scenario(&temp, "{ not json");
    assert!(matches!(cmd_run(&path, false), Err(CliError::Json(_))));
}

#[test]
fn test_run_unknown_field_rejected() {
    let temp = create_temp_dir();
    let path = write_scenario(&temp, r#"{"teachers": []}"#);
    assert!(matches!(load_scenario(&path), Err(CliError::Json(_))));
}

#[test]
fn test_run_unknown_course_aborts() {
    let temp = create_temp_dir();
    let path = write_scenario(
        &temp,
        r#"{
            "students": [{"key": "a", "first_name": "A", "last_name": "A", "email": "a@u.edu", "major": "CS"}],
            "actions": [{"action": "enroll", "student": "a", "course": "CS999"}]
        }"#,
    );
    match cmd_run(&path, false) {
        Err(CliError::Scenario(ScenarioError::UnknownCourse(code))) => assert_eq!(code, "CS999"),
        other => panic!("expected unknown course, got {other:?}"),
    }
}

#[test]
fn test_run_bad_department_aborts() {
    let temp = create_temp_dir();
    let path = write_scenario(
        &temp,
        r#"{"students": [{"key": "a", "first_name": "A", "last_name": "A", "email": "a@u.edu", "major": "Astrology"}]}"#,
    );
    assert!(matches!(
        cmd_run(&path, false),
        Err(CliError::Scenario(ScenarioError::Enrollment(_)))
    ));
}

// =============================================================================
// GRADE COMMAND TESTS
// =============================================================================

#[test]
fn test_grade_text() {
    let output = cmd_grade(82, false).unwrap();
    assert!(output.starts_with("B-PLUS [GOOD] (3.3)"));
    assert!(output.contains("Passing: yes"));
}

#[test]
fn test_grade_json() {
    let output = cmd_grade(49, true).unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value["grade"], "F");
    assert_eq!(value["passing"], false);
    assert_eq!(value["points"], "0.00");
}

#[test]
fn test_grade_out_of_range() {
    assert!(matches!(cmd_grade(101, false), Err(CliError::Grade(_))));
    assert!(matches!(cmd_grade(-1, false), Err(CliError::Grade(_))));
}

// =============================================================================
// STANDING COMMAND TESTS
// =============================================================================

#[test]
fn test_standing_honor_roll_boundary() {
    let output = cmd_standing("3.5", false).unwrap();
    assert!(output.starts_with("GPA 3.50: HONOR ROLL"));
    assert!(output.contains("Honor roll: yes"));

    let output = cmd_standing("3.49", false).unwrap();
    assert!(output.starts_with("GPA 3.49: GOOD STANDING"));
    assert!(output.contains("Honor roll: no"));
}

#[test]
fn test_standing_json() {
    let output = cmd_standing("1.99", true).unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value["gpa"], "1.99");
    assert_eq!(value["standing"], "ACADEMIC PROBATION");
    assert_eq!(value["passing"], false);
}

#[test]
fn test_standing_rejects_garbage() {
    assert!(matches!(cmd_standing("4.5", false), Err(CliError::Gpa(_))));
    assert!(matches!(cmd_standing("abc", false), Err(CliError::Gpa(_))));
}
