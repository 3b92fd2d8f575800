//! Scenario file loading.

use std::fs;
use std::path::Path;

use crate::error::{HarnessError, Result};
use crate::scenario::schema::ScenarioConfig;

/// Load a scenario from a YAML file.
///
/// # Errors
///
/// - `ScenarioNotFound` if the file does not exist
/// - `ScenarioParseError` if the YAML does not match the schema
pub fn load_scenario(path: &Path) -> Result<ScenarioConfig> {
    if !path.exists() {
        return Err(HarnessError::ScenarioNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path)?;
    parse_scenario_at(&content, path)
}

/// Parse a scenario from YAML text.
pub fn parse_scenario(content: &str) -> Result<ScenarioConfig> {
    parse_scenario_at(content, Path::new("<inline>"))
}

fn parse_scenario_at(content: &str, path: &Path) -> Result<ScenarioConfig> {
    serde_yaml::from_str(content).map_err(|e| HarnessError::ScenarioParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
