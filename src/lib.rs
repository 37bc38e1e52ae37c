pub mod domain;

mod config;
mod error;
mod expected;
mod extract;
mod fixture;
mod generate;
mod input;
mod output;
mod registry;
mod telemetry;
mod template;

pub use config::{
    Config, FILE_MAPPING_VAR, PROGRAMME_GROUP_VAR, SEED_VAR, WORKER_ID_VAR, WORKING_DIR_VAR,
};
pub use error::{Error, Result};
pub use expected::{
    COMMENT_MARKER, Expectation, ExpectedErrors, NEGATION_MARKER, get_expected_errors,
};
pub use extract::{
    SESSION_ID_COLUMN, VACCINATIONS_SHEET, create_child_list_from_file, get_session_id,
    normalize_name,
};
pub use fixture::{FileGenerator, TestData};
pub use generate::{Generator, academic_year_window, normalize_postcode};
pub use registry::{FileMappingRegistry, ScenarioMapping};
pub use telemetry::setup_logging;
pub use template::TemplateRenderer;

/// Renders the input template registered for `scenario_id` and returns the path of the new file.
///
/// This is the entry point test suites use. Scenarios are looked up in the file mapping registry, every
/// `<<TOKEN>>` of the template is replaced and the result is written below the worker's directory.
/// Values such as the organisation code are generated once per [`FileGenerator`] and are identical in
/// every file it renders; tokens like `<<RANDOM_NHS_NO>>` get a fresh value on each occurrence.
///
/// A template containing a token that cannot be resolved is an error and produces no file.
///
/// # Example
///
/// ```no_run
/// use mavis_testdata::{Config, FileGenerator, create_file_from_template};
///
/// let config = Config::from_env().unwrap();
/// let mut files = FileGenerator::from_config(&config).unwrap();
/// files.test_data_mut().session_id = Some("1234".to_string());
///
/// let path = create_file_from_template(&mut files, "VACCS_HPV_POSITIVE").unwrap();
/// let expected = files.get_expected_errors("VACCS_HPV_POSITIVE").unwrap();
/// println!("upload {} and check for {expected:?}", path.display());
/// ```
pub fn create_file_from_template(
    files: &mut FileGenerator,
    scenario_id: &str,
) -> Result<std::path::PathBuf> {
    files.create_file_from_template(scenario_id)
}
