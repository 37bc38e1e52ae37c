//! Module loading the messages a scenario expects the application to show, and checking them against page text.
//!
//! Every non-empty line of an expected-output file is one check:
//!
//! - a plain line must appear in the page text; all plain lines must also appear together, joined by newlines,
//! - a line starting with [`COMMENT_MARKER`] must appear, but is left out of the joined block,
//! - a line starting with [`NEGATION_MARKER`] must NOT appear, and is left out of the joined block.

use std::path::Path;

use crate::{
    error::{Error, Result},
    input,
};


pub const COMMENT_MARKER: char = '#';
pub const NEGATION_MARKER: char = '!';

/// Returns the non-empty lines of `output_path` in file order, `None` if no output file is registered
pub fn get_expected_errors(output_path: Option<&Path>) -> Result<Option<Vec<String>>> {
    let Some(path) = output_path else {
        return Ok(None);
    };
    let content = input::read_text(path)?;
    let lines = content
        .lines()
        .map(|line| line.trim_end().to_string())
        .filter(|line| !line.is_empty())
        .collect();
    Ok(Some(lines))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expectation {
    /// Must be present, and is part of the joined block
    Present(String),
    /// Must be present, checked on its own only
    Documented(String),
    /// Must be absent
    Absent(String),
}

impl Expectation {
    fn from_line(line: &str) -> Self {
        if let Some(text) = line.strip_prefix(NEGATION_MARKER) {
            Expectation::Absent(text.trim_start().to_string())
        } else if let Some(text) = line.strip_prefix(COMMENT_MARKER) {
            Expectation::Documented(text.trim_start().to_string())
        } else {
            Expectation::Present(line.to_string())
        }
    }

    fn check(&self, page_text: &str) -> Option<String> {
        match self {
            Expectation::Present(text) | Expectation::Documented(text) => {
                (!page_text.contains(text.as_str())).then(|| format!("missing: {text}"))
            }
            Expectation::Absent(text) => {
                page_text.contains(text.as_str()).then(|| format!("unexpected: {text}"))
            }
        }
    }
}

/// The expected-error lines of a scenario
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpectedErrors {
    lines: Vec<String>,
}

impl ExpectedErrors {
    pub fn new(lines: Vec<String>) -> Self {
        Self { lines }
    }

    pub fn load(path: &Path) -> Result<Self> {
        Ok(Self::new(
            get_expected_errors(Some(path))?.unwrap_or_default(),
        ))
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn checks(&self) -> Vec<Expectation> {
        self.lines
            .iter()
            .map(|line| Expectation::from_line(line))
            .collect()
    }

    /// The plain lines joined by newlines, expected to appear as one block
    pub fn combined_text(&self) -> String {
        self.checks()
            .into_iter()
            .filter_map(|check| match check {
                Expectation::Present(text) => Some(text),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Checks every expectation against `page_text` and reports all failures at once
    pub fn verify(&self, page_text: &str) -> Result<()> {
        let mut failures: Vec<String> = self
            .checks()
            .iter()
            .filter_map(|check| check.check(page_text))
            .collect();

        let combined = self.combined_text();
        if !combined.is_empty() && !page_text.contains(&combined) {
            failures.push(format!("missing block:\n{combined}"));
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(Error::ExpectationFailed { failures })
        }
    }
}
