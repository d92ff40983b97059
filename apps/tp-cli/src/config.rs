//! YAML run configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tp_core::SimConstants;
use tp_sim::ReferencePlantParams;

use crate::error::{CliError, CliResult};

/// Everything a run can be configured with. Missing keys take the
/// reference plant's values.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlantConfig {
    pub constants: SimConstants,
    pub plant: ReferencePlantParams,
}

impl PlantConfig {
    pub fn from_yaml(text: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(text)
    }

    /// Load `path`, or the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> CliResult<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path).map_err(|source| CliError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&text).map_err(|source| CliError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }
}
