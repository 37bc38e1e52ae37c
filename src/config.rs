//! Module reading the settings of a run from the environment

use std::path::PathBuf;

use crate::{
    domain::ProgrammeGroup,
    error::{Result, configuration_error},
};

pub const FILE_MAPPING_VAR: &str = "MAVIS_FILE_MAPPING";
pub const WORKING_DIR_VAR: &str = "MAVIS_WORKING_DIR";
pub const WORKER_ID_VAR: &str = "MAVIS_WORKER_ID";
pub const SEED_VAR: &str = "MAVIS_SEED";
pub const PROGRAMME_GROUP_VAR: &str = "MAVIS_PROGRAMME_GROUP";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// CSV file listing the scenarios
    pub file_mapping: PathBuf,
    /// Root of the per-worker output directories
    pub working_dir: PathBuf,
    pub worker_id: String,
    /// Fixed seed for a reproducible run
    pub seed: Option<u64>,
    pub programme_group: ProgrammeGroup,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            file_mapping: PathBuf::from("test_data/file_mapping.csv"),
            working_dir: PathBuf::from("working"),
            worker_id: "main".to_string(),
            seed: None,
            programme_group: ProgrammeGroup::Hpv,
        }
    }
}

impl Config {
    /// Reads the configuration from the `MAVIS_*` environment variables, falling back to the defaults for unset ones
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, which maps a variable name to its value
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Config::default();

        if let Some(path) = lookup(FILE_MAPPING_VAR) {
            config.file_mapping = PathBuf::from(path);
        }
        if let Some(path) = lookup(WORKING_DIR_VAR) {
            config.working_dir = PathBuf::from(path);
        }
        if let Some(worker_id) = lookup(WORKER_ID_VAR) {
            config.worker_id = validate_worker_id(worker_id)?;
        }
        if let Some(seed) = lookup(SEED_VAR) {
            let seed = seed
                .trim()
                .parse()
                .map_err(|e| configuration_error(format!("{SEED_VAR}={seed}: {e}")))?;
            config.seed = Some(seed);
        }
        if let Some(group) = lookup(PROGRAMME_GROUP_VAR) {
            config.programme_group = group
                .parse()
                .map_err(|e| configuration_error(format!("{PROGRAMME_GROUP_VAR}: {e}")))?;
        }

        Ok(config)
    }
}

// The worker id becomes a directory name below the working directory
fn validate_worker_id(worker_id: String) -> Result<String> {
    let invalid = worker_id.is_empty()
        || worker_id == "."
        || worker_id == ".."
        || worker_id.contains(['/', '\\']);
    if invalid {
        return Err(configuration_error(format!(
            "{WORKER_ID_VAR}={worker_id:?} is not a valid directory name"
        )));
    }
    Ok(worker_id)
}
