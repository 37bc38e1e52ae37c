//! Module wiring the registry, the generator and the renderer together for one test run.

use std::{collections::BTreeMap, path::PathBuf};

use chrono::{Months, NaiveDate};
use tracing::info;

use crate::{
    Config, ExpectedErrors,
    domain::{
        Child, Clinic, Organisation, ProgrammeGroup, Role, School, User, VaccineBatch, YearGroup,
    },
    error::Result,
    expected,
    generate::Generator,
    registry::{FileMappingRegistry, ScenarioMapping},
    template::TemplateRenderer,
};

const SCHOOL_COUNT: usize = 2;
const CHILD_COUNT: usize = 4;
const CLINIC_COUNT: usize = 2;
const HISTORICAL_VACCINATION_MONTHS: u32 = 24;

/// Values generated once per test run and substituted identically into every rendered file.
///
/// Fields are public so tests can pin values, e.g. an organisation code they later look for in the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestData {
    pub organisation: Organisation,
    pub schools: Vec<School>,
    pub children: Vec<Child>,
    pub clinics: Vec<Clinic>,
    pub nurse: User,
    pub batch: VaccineBatch,
    pub session_id: Option<String>,
    pub vaccination_date: NaiveDate,
    pub historical_vaccination_date: NaiveDate,
    pub fixed_year_group: YearGroup,
    /// One date of birth per year group, used by `<<DOB_YEAR_{n}>>`
    pub dates_of_birth: BTreeMap<YearGroup, NaiveDate>,
}

impl TestData {
    pub fn generate(generator: &mut Generator, programme_group: ProgrammeGroup) -> Self {
        let today = generator.today();
        let fixed_year_group = programme_group.default_year_group();

        let organisation = generator.generate_organisation();
        let schools = generator.generate_schools(programme_group, SCHOOL_COUNT);
        let children = (0..CHILD_COUNT)
            .map(|_| generator.generate_child(fixed_year_group))
            .collect();
        let clinics = (0..CLINIC_COUNT)
            .map(|_| generator.generate_clinic())
            .collect();
        let nurse = generator.generate_user(Role::Nurse);
        let batch = generator.generate_vaccine_batch();
        let dates_of_birth = YearGroup::all()
            .map(|year_group| {
                (
                    year_group,
                    generator.generate_date_of_birth_for_year_group(year_group),
                )
            })
            .collect();

        Self {
            organisation,
            schools,
            children,
            clinics,
            nurse,
            batch,
            session_id: None,
            vaccination_date: today,
            historical_vaccination_date: today - Months::new(HISTORICAL_VACCINATION_MONTHS),
            fixed_year_group,
            dates_of_birth,
        }
    }

    /// Sets the session id substituted for `<<SESSION_ID>>`, usually read from the application after creating a session
    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }
}

/// Creates the input files of a test from registered scenarios.
///
/// Owns its collaborators; construct one per test run (or per worker) and pass it to whatever needs files.
#[derive(Debug)]
pub struct FileGenerator {
    registry: FileMappingRegistry,
    renderer: TemplateRenderer,
    generator: Generator,
    data: TestData,
}

impl FileGenerator {
    pub fn new(
        registry: FileMappingRegistry,
        renderer: TemplateRenderer,
        generator: Generator,
        data: TestData,
    ) -> Self {
        Self {
            registry,
            renderer,
            generator,
            data,
        }
    }

    /// Builds all collaborators from `config`: loads the registry, seeds the generator and generates the test data
    pub fn from_config(config: &Config) -> Result<Self> {
        let registry = FileMappingRegistry::from_path(&config.file_mapping)?;
        let renderer = TemplateRenderer::new(&config.working_dir, &config.worker_id);
        let mut generator = match config.seed {
            Some(seed) => Generator::seeded(seed),
            None => Generator::from_entropy(),
        };
        info!(
            seed = generator.seed(),
            worker = %config.worker_id,
            "initialised test data generator"
        );
        let data = TestData::generate(&mut generator, config.programme_group);
        Ok(Self::new(registry, renderer, generator, data))
    }

    pub fn test_data(&self) -> &TestData {
        &self.data
    }

    pub fn test_data_mut(&mut self) -> &mut TestData {
        &mut self.data
    }

    pub fn generator_mut(&mut self) -> &mut Generator {
        &mut self.generator
    }

    pub fn registry(&self) -> &FileMappingRegistry {
        &self.registry
    }

    pub fn get_file_paths(&self, scenario_id: &str) -> Result<&ScenarioMapping> {
        self.registry.get_file_paths(scenario_id)
    }

    /// Renders the input template of `scenario_id` and returns the path of the rendered file
    pub fn create_file_from_template(&mut self, scenario_id: &str) -> Result<PathBuf> {
        let mapping = self.registry.get_file_paths(scenario_id)?;
        self.renderer.render(
            &mapping.input_template_path,
            &mapping.file_name_prefix,
            &self.data,
            &mut self.generator,
        )
    }

    /// Returns the expected-error lines of `scenario_id`, `None` when the scenario registers no output file
    pub fn get_expected_errors(&self, scenario_id: &str) -> Result<Option<Vec<String>>> {
        let mapping = self.registry.get_file_paths(scenario_id)?;
        expected::get_expected_errors(mapping.output_path.as_deref())
    }

    /// Like [`FileGenerator::get_expected_errors`], split into individual checks
    pub fn expected_errors(&self, scenario_id: &str) -> Result<Option<ExpectedErrors>> {
        let mapping = self.registry.get_file_paths(scenario_id)?;
        mapping
            .output_path
            .as_deref()
            .map(ExpectedErrors::load)
            .transpose()
    }
}
