//! Module defining the errors which are exposed to the users of the crate

use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No row of the file mapping registry carries the requested id
    #[error("unknown scenario id: {id}")]
    UnknownScenario { id: String },

    /// The registry backing file lists the same id twice
    #[error("duplicate scenario id in file mapping: {id}")]
    DuplicateScenario { id: String },

    /// Invalid settings, e.g., an unparsable seed in the environment
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Invalid CSV, e.g., rows with differing numbers of fields
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("spreadsheet read error: {0}")]
    SpreadsheetRead(#[from] calamine::Error),

    #[error("spreadsheet write error: {0}")]
    SpreadsheetWrite(#[from] rust_xlsxwriter::XlsxError),

    /// A file lacks a column the caller relies on
    #[error("column {column} not found in {}", path.display())]
    MissingColumn { column: String, path: PathBuf },

    #[error("sheet {sheet} not found in {}", path.display())]
    MissingSheet { sheet: String, path: PathBuf },

    #[error("no session id found in {}", path.display())]
    NoSessionId { path: PathBuf },

    /// A `<<TOKEN>>` in a template without a value to substitute
    #[error("unresolved placeholder <<{token}>> in {} (row {row}): {reason}", template.display())]
    UnresolvedPlaceholder {
        token: String,
        template: PathBuf,
        row: usize,
        reason: String,
    },

    /// A generator produced no usable value
    #[error("generation error: {0}")]
    Generation(String),

    /// Expected texts missing from (or forbidden texts present in) the checked output
    #[error("expectation failed:\n{}", failures.join("\n"))]
    ExpectationFailed { failures: Vec<String> },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

pub(crate) fn io_error(path: impl AsRef<Path>) -> impl FnOnce(std::io::Error) -> Error {
    let path = path.as_ref().to_path_buf();
    move |source| Error::Io { path, source }
}

pub(crate) fn missing_column(column: impl Into<String>, path: impl AsRef<Path>) -> Error {
    Error::MissingColumn {
        column: column.into(),
        path: path.as_ref().to_path_buf(),
    }
}

pub(crate) fn configuration_error(message: impl Into<String>) -> Error {
    Error::Configuration(message.into())
}
