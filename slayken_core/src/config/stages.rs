//! Stage definition loading

use super::ConfigError;
use crate::catalog::StageNode;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StagesConfig {
    #[serde(rename = "stages")]
    pub stages: Vec<StageNode>,
}

/// Load stage definitions from a TOML file
pub fn load_stage_configs(path: &Path) -> Result<Vec<StageNode>, ConfigError> {
    let config: StagesConfig = super::load_toml(path)?;
    Ok(config.stages)
}

/// Load stage definitions from a TOML string
pub fn parse_stage_configs(content: &str) -> Result<Vec<StageNode>, ConfigError> {
    let config: StagesConfig = super::parse_toml(content)?;
    Ok(config.stages)
}

/// Get the bundled stage definitions
pub fn default_stages() -> Result<Vec<StageNode>, ConfigError> {
    parse_stage_configs(include_str!("../../config/stages.toml"))
}
