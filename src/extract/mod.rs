//! Module recovering values from rendered or downloaded files, to cross-check them against the application.

use std::path::Path;

use crate::{
    error::{Error, Result, missing_column},
    input::{self, Row, column_index},
};


/// Sheet of offline recording workbooks holding the vaccination rows
pub const VACCINATIONS_SHEET: &str = "Vaccinations";
pub const SESSION_ID_COLUMN: &str = "SESSION_ID";

const VACCINATION_SURNAME_COLUMN: &str = "PERSON_SURNAME";
const VACCINATION_FORENAME_COLUMN: &str = "PERSON_FORENAME";
const CHILD_LAST_NAME_COLUMN: &str = "CHILD_LAST_NAME";
const CHILD_FIRST_NAME_COLUMN: &str = "CHILD_FIRST_NAME";

const ZERO_WIDTH_JOINER: char = '\u{200d}';
const NO_BREAK_SPACE: char = '\u{a0}';

/// Returns the first non-blank session id of the file, read from the `Vaccinations` sheet of a workbook or from a CSV
pub fn get_session_id(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let rows = input::read_table(path, Some(VACCINATIONS_SHEET))?;
    let (header, records) = split_header(&rows, path, SESSION_ID_COLUMN)?;
    let column = column_index(header, SESSION_ID_COLUMN)
        .ok_or_else(|| missing_column(SESSION_ID_COLUMN, path))?;

    records
        .iter()
        .filter_map(|row| row.get(column))
        .map(|cell| cell.trim())
        .find(|cell| !cell.is_empty())
        .map(str::to_string)
        .ok_or_else(|| Error::NoSessionId {
            path: path.to_path_buf(),
        })
}

/// Returns `"SURNAME, Forename"` for every child of the file, in row order.
///
/// Vaccination files name children in `PERSON_SURNAME`/`PERSON_FORENAME`, cohort and class list files in
/// `CHILD_LAST_NAME`/`CHILD_FIRST_NAME`. Rows without any name are skipped. The order is the file's and
/// says nothing about the order in which the application lists the children.
pub fn create_child_list_from_file(
    path: impl AsRef<Path>,
    is_vaccination_file: bool,
) -> Result<Vec<String>> {
    let path = path.as_ref();
    let (surname_column, forename_column, sheet) = if is_vaccination_file {
        (
            VACCINATION_SURNAME_COLUMN,
            VACCINATION_FORENAME_COLUMN,
            Some(VACCINATIONS_SHEET),
        )
    } else {
        (CHILD_LAST_NAME_COLUMN, CHILD_FIRST_NAME_COLUMN, None)
    };

    let rows = input::read_table(path, sheet)?;
    let (header, records) = split_header(&rows, path, surname_column)?;
    let surname = column_index(header, surname_column)
        .ok_or_else(|| missing_column(surname_column, path))?;
    let forename = column_index(header, forename_column)
        .ok_or_else(|| missing_column(forename_column, path))?;

    let names = records
        .iter()
        .filter_map(|row| {
            let last = normalize_name(row.get(surname).map_or("", String::as_str));
            let first = normalize_name(row.get(forename).map_or("", String::as_str));
            if last.is_empty() && first.is_empty() {
                None
            } else {
                Some(format!("{}, {first}", last.to_uppercase()))
            }
        })
        .collect();
    Ok(names)
}

/// Removes zero-width joiners and no-break spaces, collapses whitespace runs into single spaces and trims
pub fn normalize_name(raw: &str) -> String {
    raw.chars()
        .filter(|c| *c != ZERO_WIDTH_JOINER && *c != NO_BREAK_SPACE)
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn split_header<'a>(
    rows: &'a [Row],
    path: &Path,
    wanted_column: &str,
) -> Result<(&'a Row, &'a [Row])> {
    rows.split_first()
        .ok_or_else(|| missing_column(wanted_column, path))
}
