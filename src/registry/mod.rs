//! Module mapping scenario ids to their template, expected output and file name prefix.

use std::{
    collections::HashMap,
    fs::File,
    io::Read,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use tracing::info;

use crate::error::{Error, Result, io_error};


/// One registered scenario
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioMapping {
    pub id: String,
    pub input_template_path: PathBuf,
    /// File with the expected errors, if the scenario asserts on specific messages
    pub output_path: Option<PathBuf>,
    pub file_name_prefix: String,
}

/// Immutable lookup table of scenarios, loaded once per run.
#[derive(Debug, Clone, Default)]
pub struct FileMappingRegistry {
    mappings: HashMap<String, ScenarioMapping>,
}

// Intermediate type mirroring the CSV columns
#[derive(Deserialize)]
struct RawMapping {
    id: String,
    input_template: String,
    output_template: Option<String>,
    file_name_prefix: String,
}

impl FileMappingRegistry {
    /// Loads the registry from a CSV file with the columns `id`, `input_template`, `output_template` and
    /// `file_name_prefix`. Relative template paths are resolved against the directory of the CSV file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(io_error(path))?;
        let base_dir = path.parent().unwrap_or(Path::new(""));
        let registry = Self::from_reader(file, base_dir)?;
        info!(path = %path.display(), scenarios = registry.len(), "loaded file mapping");
        Ok(registry)
    }

    /// Loads the registry from CSV provided by `reader`, resolving relative paths against `base_dir`
    pub fn from_reader(reader: impl Read, base_dir: &Path) -> Result<Self> {
        let csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut mappings = HashMap::new();
        for result in csv_reader.into_deserialize::<RawMapping>() {
            let raw = result?;
            if mappings.contains_key(&raw.id) {
                return Err(Error::DuplicateScenario { id: raw.id });
            }
            let mapping = ScenarioMapping {
                id: raw.id.clone(),
                input_template_path: base_dir.join(raw.input_template),
                output_path: raw
                    .output_template
                    .filter(|p| !p.is_empty())
                    .map(|p| base_dir.join(p)),
                file_name_prefix: raw.file_name_prefix,
            };
            mappings.insert(raw.id, mapping);
        }

        Ok(Self { mappings })
    }

    /// Returns the registered paths of `scenario_id`; unknown ids are an error, never an empty mapping
    pub fn get_file_paths(&self, scenario_id: &str) -> Result<&ScenarioMapping> {
        self.mappings
            .get(scenario_id)
            .ok_or_else(|| Error::UnknownScenario {
                id: scenario_id.to_string(),
            })
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    /// Registered ids in ascending order
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.mappings.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}
