//! Integration tests for scenario lookup through the file generator

use claims::{assert_matches, assert_none, assert_ok, assert_some};
use mavis_testdata::{Error, Expectation};

use crate::{file_generator, fixture_path};

#[test]
fn lookup_returns_all_three_fields() {
    let dir = tempfile::tempdir().unwrap();
    let files = file_generator(&dir);

    let mapping = assert_ok!(files.get_file_paths("COHORT_NEGATIVE"));

    assert_eq!(
        mapping.input_template_path,
        fixture_path("cohorts/i_negative.csv")
    );
    assert_eq!(
        mapping.output_path.as_deref(),
        Some(fixture_path("cohorts/o_negative.txt").as_path())
    );
    assert_eq!(mapping.file_name_prefix, "cohort_negative");
}

#[test]
fn unknown_scenario_is_a_lookup_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut files = file_generator(&dir);

    assert_matches!(
        files.get_file_paths("NOT_A_REAL_ID"),
        Err(Error::UnknownScenario { .. })
    );
    assert_matches!(
        files.create_file_from_template("NOT_A_REAL_ID"),
        Err(Error::UnknownScenario { .. })
    );
    assert_matches!(
        files.get_expected_errors("NOT_A_REAL_ID"),
        Err(Error::UnknownScenario { .. })
    );
}

#[test]
fn scenario_without_output_has_no_expected_errors() {
    let dir = tempfile::tempdir().unwrap();
    let files = file_generator(&dir);

    assert_none!(assert_ok!(files.get_expected_errors("COHORT_POSITIVE")));
}

#[test]
fn expected_errors_keep_file_order() {
    let dir = tempfile::tempdir().unwrap();
    let files = file_generator(&dir);

    let lines = assert_some!(assert_ok!(files.get_expected_errors("COHORT_NEGATIVE")));

    assert_eq!(lines.len(), 10);
    assert_eq!(lines[0], "Row 2");
    assert_eq!(lines[1], "CHILD_FIRST_NAME: is required but missing");
    assert_eq!(lines[9], "!Import processing started");
}

#[test]
fn expected_errors_split_into_checks() {
    let dir = tempfile::tempdir().unwrap();
    let files = file_generator(&dir);

    let expected = assert_some!(assert_ok!(files.expected_errors("COHORT_NEGATIVE")));
    let checks = expected.checks();

    assert_eq!(
        checks[8],
        Expectation::Documented("You need to fix the errors before you can continue".to_string())
    );
    assert_eq!(
        checks[9],
        Expectation::Absent("Import processing started".to_string())
    );
    assert!(!expected.combined_text().contains("You need to fix"));

    let page = format!(
        "You need to fix the errors before you can continue\n{}",
        expected.combined_text()
    );
    assert_ok!(expected.verify(&page));
    assert_matches!(
        expected.verify("Import processing started"),
        Err(Error::ExpectationFailed { .. })
    );
}
