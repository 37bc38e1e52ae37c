//! Integration tests rendering the registered fixture templates

use std::collections::HashSet;

use claims::{assert_matches, assert_ok};
use mavis_testdata::{Error, academic_year_window, domain::is_valid_nhs_number};

use crate::{file_generator, fixture_path, today};

fn read_records(path: &std::path::Path) -> Vec<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)
        .unwrap();
    reader
        .records()
        .map(|record| record.unwrap().iter().map(str::to_string).collect())
        .collect()
}

#[test]
fn positive_cohort_rows_are_distinct_and_valid() {
    let dir = tempfile::tempdir().unwrap();
    let mut files = file_generator(&dir);

    let output = assert_ok!(files.create_file_from_template("COHORT_POSITIVE"));
    let rows = read_records(&output);

    assert_eq!(rows.len(), 5);
    let random_rows = &rows[1..4];
    let distinct: HashSet<_> = random_rows.iter().collect();
    assert_eq!(distinct.len(), 3);

    let (start, end) = academic_year_window(files.test_data().fixed_year_group, today());
    for row in random_rows {
        assert!(is_valid_nhs_number(&row[4]), "{}", row[4]);
        let dob = chrono::NaiveDate::parse_from_str(&row[3], "%Y-%m-%d").unwrap();
        assert!(start <= dob && dob <= end, "{dob} outside {start}..={end}");
    }
}

#[test]
fn child_tokens_use_the_generated_child() {
    let dir = tempfile::tempdir().unwrap();
    let mut files = file_generator(&dir);
    let child = files.test_data().children[0].clone();
    let school_urn = files.test_data().schools[1].urn_and_site();

    let output = assert_ok!(files.create_file_from_template("COHORT_POSITIVE"));
    let rows = read_records(&output);

    assert_eq!(
        rows[4],
        vec![
            school_urn,
            child.first_name.clone(),
            child.last_name.clone(),
            child.date_of_birth.format("%Y-%m-%d").to_string(),
            child.nhs_number.clone(),
            child.address.postcode.clone(),
            child.parents.0.full_name.clone(),
            child.parents.0.relationship.to_string(),
            child.parents.0.email_address.clone(),
        ]
    );
}

#[test]
fn org_code_is_substituted_everywhere() {
    let dir = tempfile::tempdir().unwrap();
    let mut files = file_generator(&dir);
    files.test_data_mut().organisation.ods_code = "A123B".to_string();

    let output = assert_ok!(files.create_file_from_template("COHORT_ORG_CODE"));
    let content = std::fs::read_to_string(&output).unwrap();

    assert_eq!(content.matches("A123B").count(), 5);
    assert!(!content.contains("<<ORG_CODE>>"));
}

#[test]
fn empty_template_gives_empty_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut files = file_generator(&dir);

    let output = assert_ok!(files.create_file_from_template("EMPTY_FILE"));

    assert_eq!(std::fs::metadata(&output).unwrap().len(), 0);
    assert!(output.file_name().unwrap().to_string_lossy().starts_with("empty"));
}

#[test]
fn mistyped_token_fails_loudly() {
    let dir = tempfile::tempdir().unwrap();
    let mut files = file_generator(&dir);

    assert_matches!(
        files.create_file_from_template("COHORT_MISTYPED_TOKEN"),
        Err(Error::UnresolvedPlaceholder { token, row: 2, .. }) if token == "RANDOM_NHS_NUMBER"
    );
}

#[test]
fn vaccination_file_needs_a_session_id() {
    let dir = tempfile::tempdir().unwrap();
    let mut files = file_generator(&dir);

    assert_matches!(
        files.create_file_from_template("VACCS_HPV_POSITIVE"),
        Err(Error::UnresolvedPlaceholder { token, .. }) if token == "SESSION_ID"
    );
}

#[test]
fn vaccination_file_uses_run_values() {
    let dir = tempfile::tempdir().unwrap();
    let mut files = file_generator(&dir);
    files.test_data_mut().session_id = Some("5150".to_string());
    let data = files.test_data().clone();

    let output = assert_ok!(files.create_file_from_template("VACCS_HPV_POSITIVE"));
    let rows = read_records(&output);

    assert_eq!(rows.len(), 4);
    let first = &rows[1];
    assert_eq!(first[0], data.organisation.ods_code);
    assert_eq!(first[2], data.schools[0].name);
    assert_eq!(first[8], "20261016");
    assert_eq!(first[10], data.batch.name);
    assert_eq!(first[13], "5150");
    assert_eq!(first[14], data.nurse.email);
    assert_eq!(rows[3][13], "");
    assert_eq!(rows[3][15], data.clinics[0].name);
}

#[test]
fn repeated_renders_share_file_scoped_values() {
    let dir = tempfile::tempdir().unwrap();
    let mut files = file_generator(&dir);
    files.test_data_mut().session_id = Some("1".to_string());

    let first = read_records(&assert_ok!(files.create_file_from_template("VACCS_HPV_NEGATIVE")));
    let second = read_records(&assert_ok!(files.create_file_from_template("VACCS_HPV_NEGATIVE")));

    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(&second) {
        // ORGANISATION_CODE, SCHOOL_URN, PERSON_DATE_OF_BIRTH, DATE_OF_VACCINATION
        for column in [0, 1, 5, 6] {
            assert_eq!(a[column], b[column]);
        }
    }
    assert_ne!(first[1][2], second[1][2]);
}

#[test]
fn text_templates_are_rendered_line_by_line() {
    let dir = tempfile::tempdir().unwrap();
    let mut files = file_generator(&dir);
    let data = files.test_data().clone();

    let output = assert_ok!(files.create_file_from_template("VACCS_HPV_HISTORICAL"));
    let content = std::fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = content.lines().collect();

    assert_eq!(
        lines[0],
        format!("# Historical HPV vaccinations for {}", data.organisation.ods_code)
    );
    assert_eq!(
        lines[1],
        format!(
            "{}|{}|20241016",
            data.children[0].nhs_number, data.children[0].last_name
        )
    );
    assert!(output.extension().is_some_and(|e| e == "txt"));
}

#[test]
fn rendered_files_land_in_the_worker_directory() {
    let dir = tempfile::tempdir().unwrap();
    let mut files = file_generator(&dir);

    let output = assert_ok!(files.create_file_from_template("COHORT_POSITIVE"));

    assert_eq!(output.parent().unwrap(), dir.path().join("gw1"));
    assert_eq!(
        std::fs::read_to_string(fixture_path("cohorts/i_positive.csv"))
            .unwrap()
            .matches("<<RANDOM_FNAME>>")
            .count(),
        3
    );
}

#[test]
fn replacement_child_from_the_run_generator_is_rendered() {
    let dir = tempfile::tempdir().unwrap();
    let mut files = file_generator(&dir);
    let year_group = files.test_data().fixed_year_group;
    let replacement = files.generator_mut().generate_child(year_group);
    assert_ne!(replacement, files.test_data().children[0]);
    files.test_data_mut().children[0] = replacement.clone();

    let rows = read_records(&assert_ok!(files.create_file_from_template("COHORT_POSITIVE")));

    assert_eq!(rows[4][1], replacement.first_name);
    assert_eq!(rows[4][4], replacement.nhs_number);
}
