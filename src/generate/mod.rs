//! Module for the generation of synthetic, plausible domain values

use std::collections::BTreeMap;

use chrono::{Datelike, Days, Months, NaiveDate};
use fake::{
    Fake,
    faker::{
        address::en::{CityName, SecondaryAddress, StreetName},
        name::en::{FirstName, LastName},
    },
};
use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::debug;

use crate::domain::{
    Address, Child, Clinic, Onboarding, Organisation, Parent, ProgrammeGroup, Relationship, Role,
    School, Subteam, Team, User, VaccineBatch, YearGroup, check_digit,
};

mod corpus;

use corpus::*;

/// Prefix of the NHS number range reserved for testing
const TEST_NHS_PREFIX: [u8; 3] = [9, 9, 9];

/// Source of random domain values.
///
/// Every draw consumes the internal random number generator, so two calls never promise the same value.
/// A value that must stay stable across several rendered files has to be generated once and reused.
/// Runs are reproducible by constructing the generator with [`Generator::seeded`] and a fixed "today".
#[derive(Debug)]
pub struct Generator {
    rng: StdRng,
    seed: u64,
    today: NaiveDate,
}

impl Generator {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
            today: chrono::Local::now().date_naive(),
        }
    }

    /// Creates a generator with a random seed. The seed is still available via [`Generator::seed`] to reproduce a run.
    pub fn from_entropy() -> Self {
        Self::seeded(rand::random())
    }

    /// Overrides the date used as "today" for academic year and vaccination date computations
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn generate_first_name(&mut self) -> String {
        FirstName().fake_with_rng(&mut self.rng)
    }

    pub fn generate_last_name(&mut self) -> String {
        LastName().fake_with_rng(&mut self.rng)
    }

    /// Returns a ten digit NHS number from the test range.
    /// Valid numbers carry the correct modulus 11 check digit, invalid ones a wrong last digit.
    pub fn generate_nhs_number(&mut self, valid: bool) -> String {
        loop {
            let mut prefix = [0u8; 9];
            prefix[..3].copy_from_slice(&TEST_NHS_PREFIX);
            for digit in &mut prefix[3..] {
                *digit = self.rng.gen_range(0..=9);
            }

            let last = match (check_digit(&prefix), valid) {
                (Some(check), true) => check,
                // prefixes without a check digit can't be made valid
                (None, true) => continue,
                (Some(check), false) => (check + self.rng.gen_range(1..=9)) % 10,
                (None, false) => self.rng.gen_range(0..=9),
            };

            return prefix
                .iter()
                .chain(std::iter::once(&last))
                .map(|d| char::from(b'0' + d))
                .collect();
        }
    }

    /// Draws a date of birth uniformly from the academic year window of `year_group`
    pub fn generate_date_of_birth_for_year_group(&mut self, year_group: YearGroup) -> NaiveDate {
        let (start, end) = academic_year_window(year_group, self.today);
        let span = (end - start).num_days() as u64;
        start + Days::new(self.rng.gen_range(0..=span))
    }

    pub fn generate_postcode(&mut self) -> String {
        let outward = self.pick(POSTCODE_OUTWARD);
        let sector = self.rng.gen_range(0..=9);
        let unit: String = (0..2)
            .map(|_| char::from(self.pick_byte(POSTCODE_UNIT_LETTERS)))
            .collect();
        normalize_postcode(&format!("{outward}{sector}{unit}"))
    }

    pub fn generate_address(&mut self) -> Address {
        let number = self.rng.gen_range(1..=220);
        let street: String = StreetName().fake_with_rng(&mut self.rng);
        Address {
            line_1: format!("{number} {street}"),
            line_2: SecondaryAddress().fake_with_rng(&mut self.rng),
            town: CityName().fake_with_rng(&mut self.rng),
            postcode: self.generate_postcode(),
        }
    }

    /// Returns an organisation with an ODS-like code, e.g. `A9A5A`
    pub fn generate_organisation(&mut self) -> Organisation {
        let ods_code = (0..5)
            .map(|i| {
                if i % 2 == 0 {
                    char::from(self.rng.gen_range(b'A'..=b'Z'))
                } else {
                    char::from(self.rng.gen_range(b'0'..=b'9'))
                }
            })
            .collect();
        Organisation { ods_code }
    }

    pub fn generate_school(&mut self, programme_group: ProgrammeGroup) -> School {
        let kinds = if *programme_group.year_groups().start() >= 7 {
            SECONDARY_SCHOOL_KINDS
        } else {
            PRIMARY_SCHOOL_KINDS
        };
        let name = format!("{} {}", self.pick(SCHOOL_STEMS), self.pick(kinds));
        let urn = self.rng.gen_range(100_000..=999_999u32).to_string();
        let site = self
            .rng
            .gen_bool(0.25)
            .then(|| char::from(self.rng.gen_range(b'A'..=b'C')).to_string());
        School { name, urn, site }
    }

    /// Returns `count` schools with pairwise distinct URNs
    pub fn generate_schools(
        &mut self,
        programme_group: ProgrammeGroup,
        count: usize,
    ) -> Vec<School> {
        let mut schools: Vec<School> = Vec::with_capacity(count);
        while schools.len() < count {
            let school = self.generate_school(programme_group);
            if schools.iter().all(|s| s.urn != school.urn) {
                schools.push(school);
            }
        }
        schools
    }

    /// Returns a parent whose first name matches the relationship, e.g. a male name for `Dad`
    pub fn generate_parent(&mut self, relationship: Relationship) -> Parent {
        let first_name = match relationship {
            Relationship::Dad => self.pick(MALE_FIRST_NAMES),
            Relationship::Mum => self.pick(FEMALE_FIRST_NAMES),
            Relationship::Guardian | Relationship::Carer | Relationship::Other => {
                self.pick(NEUTRAL_FIRST_NAMES)
            }
        };
        let last_name = self.generate_last_name();
        let email_address = self.generate_email(first_name, &last_name);
        Parent {
            full_name: format!("{first_name} {last_name}"),
            relationship,
            email_address,
        }
    }

    pub fn generate_child(&mut self, year_group: YearGroup) -> Child {
        let first_name = self.generate_first_name();
        let last_name = self.generate_last_name().to_uppercase();
        let nhs_number = self.generate_nhs_number(true);
        let address = self.generate_address();
        let date_of_birth = self.generate_date_of_birth_for_year_group(year_group);

        let first_relationship = if self.rng.gen_bool(0.5) {
            Relationship::Mum
        } else {
            Relationship::Dad
        };
        let second_relationship = self.pick_relationship();
        let parents = (
            self.generate_parent(first_relationship),
            self.generate_parent(second_relationship),
        );

        debug!(%first_name, %last_name, %nhs_number, %date_of_birth, "generated child");
        Child {
            first_name,
            last_name,
            nhs_number,
            address,
            date_of_birth,
            year_group,
            parents,
        }
    }

    pub fn generate_team(&mut self, organisation: &Organisation) -> Team {
        let area = self.pick(TEAM_AREAS);
        let workgroup = format!("{}{}", area.to_lowercase(), organisation.ods_code.to_lowercase());
        Team {
            name: format!("SAIS {area} Team {}", organisation.ods_code),
            email: format!("{workgroup}@example.com"),
            phone: self.generate_phone(),
            careplus_venue_code: organisation.ods_code.clone(),
            privacy_notice_url: format!("https://example.com/{workgroup}/privacy-notice"),
            privacy_policy_url: format!("https://example.com/{workgroup}/privacy-policy"),
            workgroup,
        }
    }

    pub fn generate_subteam(&mut self, team: &Team) -> Subteam {
        let area = self.pick(LOCALITIES);
        let key = area.to_lowercase();
        Subteam {
            name: format!("{} {area}", team.name),
            email: format!("{}.{key}@example.com", team.workgroup),
            phone: self.generate_phone(),
            key,
        }
    }

    pub fn generate_user(&mut self, role: Role) -> User {
        let given_name = self.generate_first_name();
        let family_name = self.generate_last_name().to_uppercase();
        let email = self.generate_email(&given_name, &family_name);
        let password = self.generate_identifier(16);
        User {
            given_name,
            family_name,
            email,
            password,
            role,
        }
    }

    pub fn generate_clinic(&mut self) -> Clinic {
        let address = self.generate_address();
        Clinic {
            name: format!("{} Community Clinic", address.town),
            address_line_1: address.line_1,
            address_town: address.town,
            address_postcode: address.postcode,
        }
    }

    /// Returns a batch expiring between six months and two years from today
    pub fn generate_vaccine_batch(&mut self) -> VaccineBatch {
        let name = self.generate_identifier(6);
        let expiry = self.today + Days::new(self.rng.gen_range(180..=730));
        VaccineBatch { name, expiry }
    }

    /// Returns a complete onboarding document: one team with two subteams, a nurse and a medical secretary,
    /// and two schools plus one clinic per subteam.
    pub fn generate_onboarding(&mut self, programme_group: ProgrammeGroup) -> Onboarding {
        let organisation = self.generate_organisation();
        let team = self.generate_team(&organisation);

        let mut subteams: Vec<Subteam> = Vec::with_capacity(2);
        while subteams.len() < 2 {
            let subteam = self.generate_subteam(&team);
            if subteams.iter().all(|s| s.key != subteam.key) {
                subteams.push(subteam);
            }
        }

        let users = vec![
            self.generate_user(Role::Nurse),
            self.generate_user(Role::MedicalSecretary),
        ];

        let mut schools = BTreeMap::new();
        let mut clinics = BTreeMap::new();
        for subteam in &subteams {
            schools.insert(
                subteam.key.clone(),
                self.generate_schools(programme_group, 2),
            );
            clinics.insert(subteam.key.clone(), vec![self.generate_clinic()]);
        }

        Onboarding {
            organisation,
            programme_group,
            team,
            subteams,
            users,
            schools,
            clinics,
        }
    }

    fn generate_email(&mut self, first_name: &str, last_name: &str) -> String {
        let local: String = format!("{first_name}.{last_name}")
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '.')
            .collect::<String>()
            .to_lowercase();
        let number = self.rng.gen_range(10..=99);
        format!("{local}{number}@{}", self.pick(EMAIL_DOMAINS))
    }

    fn generate_phone(&mut self) -> String {
        format!(
            "0{:04} {:06}",
            self.rng.gen_range(1000..=9999),
            self.rng.gen_range(0..=999_999)
        )
    }

    fn generate_identifier(&mut self, len: usize) -> String {
        (0..len)
            .map(|_| char::from(self.pick_byte(IDENTIFIER_CHARS)))
            .collect()
    }

    fn pick_relationship(&mut self) -> Relationship {
        Relationship::ALL[self.rng.gen_range(0..Relationship::ALL.len())]
    }

    fn pick(&mut self, pool: &'static [&'static str]) -> &'static str {
        pool[self.rng.gen_range(0..pool.len())]
    }

    fn pick_byte(&mut self, pool: &'static [u8]) -> u8 {
        pool[self.rng.gen_range(0..pool.len())]
    }
}

/// Returns the first and last date of birth (both inclusive) of children in `year_group` on `today`.
///
/// The academic year starts on 1 September: a child in year group `n` during the academic year starting in
/// September of year `Y` was born between 1 September `Y - n - 5` and 31 August `Y - n - 4`.
pub fn academic_year_window(year_group: YearGroup, today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let mut birth_year = today.year() - i32::from(year_group.value()) - 6;
    if today >= first_of_september(today.year()) {
        birth_year += 1;
    }

    let start = first_of_september(birth_year);
    let end = start + Months::new(12) - Days::new(1);
    (start, end)
}

fn first_of_september(year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, 9, 1).expect("1 September exists in every supported year")
}

/// Brings a postcode into its canonical form: upper-case, with a single space before the three character
/// inward code. Input too short to contain an inward code is only upper-cased.
pub fn normalize_postcode(raw: &str) -> String {
    let compact: String = raw
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase();

    if compact.len() <= 3 || !compact.is_ascii() {
        return compact;
    }
    let (outward, inward) = compact.split_at(compact.len() - 3);
    format!("{outward} {inward}")
}
