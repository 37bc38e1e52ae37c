//! Module defining children and their parents as they appear in cohort and consent files

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::YearGroup;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Child {
    pub first_name: String,
    /// Upper-case, as the application displays surnames
    pub last_name: String,
    pub nhs_number: String,
    pub address: Address,
    pub date_of_birth: NaiveDate,
    pub year_group: YearGroup,
    pub parents: (Parent, Parent),
}

impl Child {
    /// The name as listed by the application, e.g. `SMITH, Jane`
    pub fn list_name(&self) -> String {
        format!("{}, {}", self.last_name, self.first_name)
    }

    /// Returns the parent with the 1-based `number`, as numbered in import file columns
    pub fn parent(&self, number: usize) -> Option<&Parent> {
        match number {
            1 => Some(&self.parents.0),
            2 => Some(&self.parents.1),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parent {
    pub full_name: String,
    pub relationship: Relationship,
    pub email_address: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Relationship {
    Dad,
    Mum,
    Guardian,
    Carer,
    Other,
}

impl Relationship {
    pub const ALL: [Relationship; 5] = [
        Relationship::Dad,
        Relationship::Mum,
        Relationship::Guardian,
        Relationship::Carer,
        Relationship::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Relationship::Dad => "Dad",
            Relationship::Mum => "Mum",
            Relationship::Guardian => "Guardian",
            Relationship::Carer => "Carer",
            Relationship::Other => "Other",
        }
    }
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Address {
    pub line_1: String,
    pub line_2: String,
    pub town: String,
    /// Canonical form, see [`crate::normalize_postcode`]
    pub postcode: String,
}
