//! Integration tests running the crate binary against the fixture registry: the full E2E path.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use crate::fixture_path;

fn run(working_dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_mavis-testdata"))
        .args(args)
        .env("MAVIS_FILE_MAPPING", fixture_path("file_mapping.csv"))
        .env("MAVIS_WORKING_DIR", working_dir)
        .env("MAVIS_WORKER_ID", "cli")
        .env("MAVIS_SEED", "42")
        .env_remove("MAVIS_PROGRAMME_GROUP")
        .output()
        .expect("failed to execute binary")
}

fn stdout_of(output: &Output) -> String {
    assert!(
        output.status.success(),
        "binary exited with non-zero status.\nstderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout.clone()).expect("binary output was not valid UTF-8")
}

#[test]
fn render_prints_the_rendered_path() {
    let dir = tempfile::tempdir().unwrap();

    let stdout = stdout_of(&run(dir.path(), &["render", "COHORT_POSITIVE"]));
    let path = PathBuf::from(stdout.trim());

    assert!(path.exists(), "{} does not exist", path.display());
    assert_eq!(path.parent().unwrap(), dir.path().join("cli"));
    let content = std::fs::read_to_string(&path).unwrap();
    assert!(!content.contains("<<"));
}

#[test]
fn render_with_session_id_round_trips() {
    let dir = tempfile::tempdir().unwrap();

    let stdout = stdout_of(&run(dir.path(), &["render", "VACCS_HPV_POSITIVE", "2718"]));
    let rendered = stdout.trim().to_string();

    let session = stdout_of(&run(dir.path(), &["session-id", &rendered]));
    assert_eq!(session.trim(), "2718");

    let children = stdout_of(&run(dir.path(), &["children", &rendered, "--vaccinations"]));
    assert_eq!(children.lines().count(), 3);
}

#[test]
fn same_seed_renders_same_file_scoped_values() {
    let dir = tempfile::tempdir().unwrap();

    let first = stdout_of(&run(dir.path(), &["render", "COHORT_ORG_CODE"]));
    let second = stdout_of(&run(dir.path(), &["render", "COHORT_ORG_CODE"]));

    assert_ne!(first.trim(), second.trim());
    assert_eq!(
        std::fs::read_to_string(first.trim()).unwrap(),
        std::fs::read_to_string(second.trim()).unwrap()
    );
}

#[test]
fn expected_prints_lines_in_order() {
    let dir = tempfile::tempdir().unwrap();

    let stdout = stdout_of(&run(dir.path(), &["expected", "VACCS_HPV_NEGATIVE"]));
    let expected = std::fs::read_to_string(fixture_path("vaccs/o_hpv_negative.txt")).unwrap();

    assert_eq!(stdout, expected);
}

#[test]
fn expected_prints_nothing_without_output_file() {
    let dir = tempfile::tempdir().unwrap();

    let stdout = stdout_of(&run(dir.path(), &["expected", "COHORT_POSITIVE"]));
    assert!(stdout.is_empty());
}

#[test]
fn onboarding_prints_json() {
    let dir = tempfile::tempdir().unwrap();

    let stdout = stdout_of(&run(dir.path(), &["onboarding"]));
    let document: serde_json::Value = serde_json::from_str(&stdout).unwrap();

    assert_eq!(document["programmes"], serde_json::json!(["hpv"]));
    assert_eq!(document["users"].as_array().unwrap().len(), 2);
}

#[test]
fn unknown_scenario_fails() {
    let dir = tempfile::tempdir().unwrap();

    let output = run(dir.path(), &["render", "NOT_A_REAL_ID"]);

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("NOT_A_REAL_ID"));
}

#[test]
fn missing_command_prints_usage() {
    let dir = tempfile::tempdir().unwrap();

    let output = run(dir.path(), &[]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Usage: mavis-testdata"));
}
