//! Module for the types describing the entities placed into rendered test files.

use std::{fmt, ops::RangeInclusive, str::FromStr};

use serde::Serialize;

mod nhs_number;
mod onboarding;
mod person;

pub use nhs_number::is_valid_nhs_number;
pub(crate) use nhs_number::check_digit;
pub use onboarding::{Clinic, Onboarding, Role, Subteam, Team, User, VaccineBatch};
pub use person::{Address, Child, Parent, Relationship};

/// School year of a child, from reception (0) to year 13.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct YearGroup(u8);

impl YearGroup {
    pub const RECEPTION: YearGroup = YearGroup(0);
    pub const MAX: YearGroup = YearGroup(13);

    pub fn new(year: u8) -> Result<Self, String> {
        if year > Self::MAX.0 {
            return Err(format!(
                "year group {year} is outside of the supported range 0..={}",
                Self::MAX.0
            ));
        }
        Ok(Self(year))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// All supported year groups in ascending order
    pub fn all() -> impl Iterator<Item = YearGroup> {
        (Self::RECEPTION.0..=Self::MAX.0).map(YearGroup)
    }
}

impl fmt::Display for YearGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Vaccination programmes sharing eligibility rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgrammeGroup {
    Hpv,
    /// MenACWY and Td/IPV, given together
    Doubles,
    Flu,
    Mmr,
}

impl ProgrammeGroup {
    pub fn as_str(self) -> &'static str {
        match self {
            ProgrammeGroup::Hpv => "hpv",
            ProgrammeGroup::Doubles => "doubles",
            ProgrammeGroup::Flu => "flu",
            ProgrammeGroup::Mmr => "mmr",
        }
    }

    pub fn programmes(self) -> &'static [&'static str] {
        match self {
            ProgrammeGroup::Hpv => &["hpv"],
            ProgrammeGroup::Doubles => &["menacwy", "td_ipv"],
            ProgrammeGroup::Flu => &["flu"],
            ProgrammeGroup::Mmr => &["mmr"],
        }
    }

    /// Year groups eligible for the programmes of this group
    pub fn year_groups(self) -> RangeInclusive<u8> {
        match self {
            ProgrammeGroup::Hpv => 8..=11,
            ProgrammeGroup::Doubles => 9..=11,
            ProgrammeGroup::Flu => 0..=11,
            ProgrammeGroup::Mmr => 0..=11,
        }
    }

    /// The year group used for single-year fixtures of this group
    pub fn default_year_group(self) -> YearGroup {
        YearGroup(*self.year_groups().start())
    }
}

impl FromStr for ProgrammeGroup {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hpv" => Ok(ProgrammeGroup::Hpv),
            "doubles" => Ok(ProgrammeGroup::Doubles),
            "flu" => Ok(ProgrammeGroup::Flu),
            "mmr" => Ok(ProgrammeGroup::Mmr),
            other => Err(format!("unknown programme group: {other}")),
        }
    }
}

impl fmt::Display for ProgrammeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Organisation {
    pub ods_code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct School {
    pub name: String,
    pub urn: String,
    /// Present when the school is split over several sites
    pub site: Option<String>,
}

impl School {
    /// The identifier the application shows for a school: the URN followed by the site letter, if any.
    pub fn urn_and_site(&self) -> String {
        match &self.site {
            Some(site) => format!("{}{site}", self.urn),
            None => self.urn.clone(),
        }
    }
}
