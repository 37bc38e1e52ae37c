//! Module reading templates and downloaded files into plain rows of text cells.

use std::{fs::File, path::Path};

use calamine::{Data, Reader, open_workbook_auto};

use crate::error::{Error, Result, io_error};


/// How a file is read and written, derived from its extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FileFormat {
    /// Tabular, read with the `csv` crate
    Csv,
    /// Excel workbook with named sheets
    Xlsx,
    /// Anything else, handled line by line
    Text,
}

impl FileFormat {
    pub(crate) fn of(path: &Path) -> Self {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("csv") => FileFormat::Csv,
            Some("xlsx" | "xlsm" | "xls" | "ods") => FileFormat::Xlsx,
            _ => FileFormat::Text,
        }
    }
}

pub(crate) type Row = Vec<String>;

/// One worksheet, with its rows anchored at cell A1. Cells keep their type: numbers, dates and booleans stay
/// what they are, only text cells can hold tokens.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Sheet {
    pub(crate) name: String,
    pub(crate) rows: Vec<Vec<Data>>,
}

impl Sheet {
    #[cfg(test)]
    pub(crate) fn from_text(name: &str, rows: &[&[&str]]) -> Self {
        Self {
            name: name.to_string(),
            rows: rows
                .iter()
                .map(|cells| cells.iter().map(|cell| Data::String(cell.to_string())).collect())
                .collect(),
        }
    }

    /// The cells as displayed text, for header-driven lookups
    pub(crate) fn text_rows(&self) -> Vec<Row> {
        self.rows
            .iter()
            .map(|cells| cells.iter().map(ToString::to_string).collect())
            .collect()
    }
}

/// Reads every record of a CSV file, header included. All rows must have the same number of fields.
pub(crate) fn read_csv(path: &Path) -> Result<Vec<Row>> {
    let file = File::open(path).map_err(io_error(path))?;
    let reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(file);

    reader
        .into_records()
        .map(|record| -> Result<Row> { Ok(record?.iter().map(str::to_string).collect()) })
        .collect()
}

/// Reads all sheets of a workbook in their original order
pub(crate) fn read_workbook(path: &Path) -> Result<Vec<Sheet>> {
    let mut workbook = open_workbook_auto(path)?;

    workbook
        .sheet_names()
        .into_iter()
        .map(|name| -> Result<Sheet> {
            let range = workbook.worksheet_range(&name)?;
            let mut rows: Vec<Vec<Data>> = Vec::new();

            // calamine trims leading empty rows and columns; restore them so cell positions survive a round trip
            let (first_row, first_column) = range.start().unwrap_or((0, 0));
            rows.extend((0..first_row).map(|_| Vec::new()));
            rows.extend(range.rows().map(|cells| {
                std::iter::repeat_n(Data::Empty, first_column as usize)
                    .chain(cells.iter().cloned())
                    .collect()
            }));

            Ok(Sheet { name, rows })
        })
        .collect()
}

pub(crate) fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(io_error(path))
}

/// Reads the rows of a CSV file, or of the sheet named `sheet` of a workbook.
/// Workbooks are read from their first sheet when `sheet` is `None`.
pub(crate) fn read_table(path: &Path, sheet: Option<&str>) -> Result<Vec<Row>> {
    match FileFormat::of(path) {
        FileFormat::Csv | FileFormat::Text => read_csv(path),
        FileFormat::Xlsx => {
            let mut sheets = read_workbook(path)?.into_iter();
            let found = match sheet {
                Some(wanted) => sheets.find(|s| s.name == wanted),
                None => sheets.next(),
            };
            found.map(|s| s.text_rows()).ok_or_else(|| Error::MissingSheet {
                sheet: sheet.unwrap_or("<first>").to_string(),
                path: path.to_path_buf(),
            })
        }
    }
}

/// Returns the index of the header cell equal to `column`, ignoring surrounding whitespace
pub(crate) fn column_index(header: &[String], column: &str) -> Option<usize> {
    header.iter().position(|cell| cell.trim() == column)
}
