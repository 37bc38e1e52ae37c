//! Integration tests reading values back out of rendered files

use claims::{assert_matches, assert_ok};
use mavis_testdata::{Error, create_child_list_from_file, get_session_id};

use crate::file_generator;

#[test]
fn session_id_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let mut files = file_generator(&dir);
    files.test_data_mut().session_id = Some("8086".to_string());

    let output = assert_ok!(files.create_file_from_template("VACCS_HPV_POSITIVE"));

    assert_eq!(assert_ok!(get_session_id(&output)), "8086");
}

#[test]
fn cohort_file_lists_children_in_row_order() {
    let dir = tempfile::tempdir().unwrap();
    let mut files = file_generator(&dir);
    let child = files.test_data().children[0].clone();

    let output = assert_ok!(files.create_file_from_template("COHORT_POSITIVE"));
    let children = assert_ok!(create_child_list_from_file(&output, false));

    assert_eq!(children.len(), 4);
    assert_eq!(children[3], child.list_name());
    for name in &children {
        let (surname, _) = name.split_once(", ").unwrap();
        assert_eq!(surname, surname.to_uppercase());
    }
}

#[test]
fn vaccination_file_lists_vaccinated_children() {
    let dir = tempfile::tempdir().unwrap();
    let mut files = file_generator(&dir);
    files.test_data_mut().session_id = Some("1".to_string());
    let expected: Vec<String> = files.test_data().children[..3]
        .iter()
        .map(|c| c.list_name())
        .collect();

    let output = assert_ok!(files.create_file_from_template("VACCS_HPV_POSITIVE"));

    assert_eq!(
        assert_ok!(create_child_list_from_file(&output, true)),
        expected
    );
}

#[test]
fn cohort_file_has_no_session_id() {
    let dir = tempfile::tempdir().unwrap();
    let mut files = file_generator(&dir);

    let output = assert_ok!(files.create_file_from_template("COHORT_POSITIVE"));

    assert_matches!(
        get_session_id(&output),
        Err(Error::MissingColumn { column, .. }) if column == "SESSION_ID"
    );
}
