//! Module defining the entities used to set up an organisation before a test run, and their onboarding projections

use std::{collections::BTreeMap, fmt};

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{Value, json};

use crate::domain::{Organisation, ProgrammeGroup, School};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Team {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub workgroup: String,
    pub careplus_venue_code: String,
    pub privacy_notice_url: String,
    pub privacy_policy_url: String,
}

impl Team {
    pub fn to_onboarding(&self) -> Value {
        json!(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Subteam {
    /// Key referencing the subteam from the schools and clinics sections
    #[serde(skip)]
    pub key: String,
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl Subteam {
    pub fn to_onboarding(&self) -> Value {
        let mut keyed = serde_json::Map::new();
        keyed.insert(self.key.clone(), json!(self));
        Value::Object(keyed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Nurse,
    MedicalSecretary,
    HealthcareAssistant,
    Superuser,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Nurse => "nurse",
            Role::MedicalSecretary => "medical_secretary",
            Role::HealthcareAssistant => "healthcare_assistant",
            Role::Superuser => "superuser",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub given_name: String,
    pub family_name: String,
    pub email: String,
    pub password: String,
    #[serde(rename = "fallback_role")]
    pub role: Role,
}

impl User {
    pub fn to_onboarding(&self) -> Value {
        json!(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Clinic {
    pub name: String,
    pub address_line_1: String,
    pub address_town: String,
    pub address_postcode: String,
}

impl Clinic {
    pub fn to_onboarding(&self) -> Value {
        json!(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VaccineBatch {
    pub name: String,
    pub expiry: NaiveDate,
}

/// Everything needed to set up one organisation, in the shape accepted by the onboarding endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Onboarding {
    pub organisation: Organisation,
    pub programme_group: ProgrammeGroup,
    pub team: Team,
    pub subteams: Vec<Subteam>,
    pub users: Vec<User>,
    /// Schools keyed by the subteam running their sessions
    pub schools: BTreeMap<String, Vec<School>>,
    /// Clinics keyed by the subteam running them
    pub clinics: BTreeMap<String, Vec<Clinic>>,
}

impl Onboarding {
    pub fn to_onboarding(&self) -> Value {
        let subteams: serde_json::Map<String, Value> = self
            .subteams
            .iter()
            .filter_map(|s| match s.to_onboarding() {
                Value::Object(map) => Some(map),
                _ => None,
            })
            .flatten()
            .collect();

        let schools: BTreeMap<&String, Vec<String>> = self
            .schools
            .iter()
            .map(|(key, schools)| (key, schools.iter().map(School::urn_and_site).collect()))
            .collect();

        let clinics: BTreeMap<&String, Vec<Value>> = self
            .clinics
            .iter()
            .map(|(key, clinics)| (key, clinics.iter().map(Clinic::to_onboarding).collect()))
            .collect();

        json!({
            "organisation": { "ods_code": self.organisation.ods_code },
            "team": self.team.to_onboarding(),
            "programmes": self.programme_group.programmes(),
            "subteams": subteams,
            "users": self.users.iter().map(User::to_onboarding).collect::<Vec<_>>(),
            "schools": schools,
            "clinics": clinics,
        })
    }
}
