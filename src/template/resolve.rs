//! Module resolving tokens against the test data of a run and the generator.

use std::path::Path;

use chrono::NaiveDate;

use crate::{
    Error,
    domain::{Child, Clinic, School, YearGroup},
    fixture::TestData,
    generate::Generator,
    template::token::{ChildField, Scope, Segment, Token, tokenize},
};

/// Format of vaccination dates in import files
pub(crate) const VACCS_DATE_FORMAT: &str = "%Y%m%d";
/// Format of dates of birth in import files
pub(crate) const DOB_FORMAT: &str = "%Y-%m-%d";

/// Where a piece of text sits in a template, for error reporting
#[derive(Debug, Clone, Copy)]
pub(crate) struct Location<'a> {
    pub(crate) template: &'a Path,
    /// 1-based
    pub(crate) row: usize,
}

pub(crate) struct Resolver<'a> {
    data: &'a TestData,
    generator: &'a mut Generator,
}

impl<'a> Resolver<'a> {
    pub(crate) fn new(data: &'a TestData, generator: &'a mut Generator) -> Self {
        Self { data, generator }
    }

    /// Replaces every token of `text`. Tokens scoped to the occurrence draw a new value each time they appear.
    pub(crate) fn substitute(
        &mut self,
        text: &str,
        location: Location<'_>,
    ) -> Result<String, Error> {
        let mut resolved = String::with_capacity(text.len());
        for segment in tokenize(text) {
            match segment {
                Segment::Literal(literal) => resolved.push_str(literal),
                Segment::Token(name) => resolved.push_str(&self.resolve_name(name, location)?),
            }
        }
        Ok(resolved)
    }

    /// Substitutes a table cell. A cell holding nothing but one token, padding aside, becomes exactly the
    /// token's value.
    pub(crate) fn substitute_cell(
        &mut self,
        cell: &str,
        location: Location<'_>,
    ) -> Result<String, Error> {
        let trimmed = cell.trim();
        match tokenize(trimmed).as_slice() {
            [Segment::Token(name)] => self.resolve_name(name, location),
            _ => self.substitute(cell, location),
        }
    }

    fn resolve_name(&mut self, name: &str, location: Location<'_>) -> Result<String, Error> {
        let unresolved = |reason: String| Error::UnresolvedPlaceholder {
            token: name.to_string(),
            template: location.template.to_path_buf(),
            row: location.row,
            reason,
        };

        let token = Token::parse(name).ok_or_else(|| unresolved("unknown token".to_string()))?;
        let value = self.resolve(token).map_err(unresolved)?;

        if token.scope() == Scope::Occurrence && value.is_empty() {
            return Err(Error::Generation(format!(
                "empty value generated for <<{name}>> in {} (row {})",
                location.template.display(),
                location.row
            )));
        }
        Ok(value)
    }

    fn resolve(&mut self, token: Token) -> Result<String, String> {
        let data = self.data;
        match token {
            Token::OrgCode => Ok(data.organisation.ods_code.clone()),
            Token::SchoolName(index) => school(data, index).map(|s| s.name.clone()),
            Token::SchoolUrn(index) => school(data, index).map(School::urn_and_site),
            Token::SessionId => data
                .session_id
                .clone()
                .ok_or_else(|| "no session id set for this run".to_string()),
            Token::VaccsDate => Ok(data.vaccination_date.format(VACCS_DATE_FORMAT).to_string()),
            Token::HistVaccsDate => Ok(data
                .historical_vaccination_date
                .format(VACCS_DATE_FORMAT)
                .to_string()),
            Token::FixedYearGroup => Ok(data.fixed_year_group.to_string()),
            Token::DobYear(year) => {
                let year_group = YearGroup::new(year)?;
                data.dates_of_birth
                    .get(&year_group)
                    .map(|dob| format_dob(*dob))
                    .ok_or_else(|| format!("no date of birth generated for year group {year}"))
            }
            Token::Child { index, field } => child(data, index).and_then(|c| child_field(c, field)),
            Token::Clinic(index) => clinic(data, index).map(|c| c.name.clone()),
            Token::NurseEmail => Ok(data.nurse.email.clone()),
            Token::BatchName => Ok(data.batch.name.clone()),

            Token::RandomFirstName => Ok(self.generator.generate_first_name()),
            Token::RandomLastName => Ok(self.generator.generate_last_name().to_uppercase()),
            Token::RandomNhsNumber => Ok(self.generator.generate_nhs_number(true)),
            Token::InvalidNhsNumber => Ok(self.generator.generate_nhs_number(false)),
            Token::RandomPostcode => Ok(self.generator.generate_postcode()),
            Token::FixedYearGroupDob => Ok(format_dob(
                self.generator
                    .generate_date_of_birth_for_year_group(data.fixed_year_group),
            )),
        }
    }
}

pub(crate) fn format_dob(date: NaiveDate) -> String {
    date.format(DOB_FORMAT).to_string()
}

fn school(data: &TestData, index: usize) -> Result<&School, String> {
    data.schools
        .get(index)
        .ok_or_else(|| out_of_range("school", index, data.schools.len()))
}

fn clinic(data: &TestData, index: usize) -> Result<&Clinic, String> {
    data.clinics
        .get(index)
        .ok_or_else(|| out_of_range("clinic", index, data.clinics.len()))
}

fn child(data: &TestData, index: usize) -> Result<&Child, String> {
    data.children
        .get(index)
        .ok_or_else(|| out_of_range("child", index, data.children.len()))
}

fn child_field(child: &Child, field: ChildField) -> Result<String, String> {
    let parent = |number: usize| {
        child
            .parent(number)
            .ok_or_else(|| format!("children have parents 1 and 2, not {number}"))
    };

    let value = match field {
        ChildField::FirstName => child.first_name.clone(),
        ChildField::LastName => child.last_name.clone(),
        ChildField::NhsNumber => child.nhs_number.clone(),
        ChildField::DateOfBirth => format_dob(child.date_of_birth),
        ChildField::YearGroup => child.year_group.to_string(),
        ChildField::AddressLine1 => child.address.line_1.clone(),
        ChildField::AddressLine2 => child.address.line_2.clone(),
        ChildField::Town => child.address.town.clone(),
        ChildField::Postcode => child.address.postcode.clone(),
        ChildField::ParentName(number) => parent(number)?.full_name.clone(),
        ChildField::ParentRelationship(number) => parent(number)?.relationship.to_string(),
        ChildField::ParentEmail(number) => parent(number)?.email_address.clone(),
    };
    Ok(value)
}

fn out_of_range(kind: &str, index: usize, available: usize) -> String {
    format!("{kind} {index} requested but only {available} generated")
}
