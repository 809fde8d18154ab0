//! Boss template loading

use super::ConfigError;
use crate::catalog::BossTemplate;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BossesConfig {
    #[serde(rename = "bosses")]
    pub bosses: Vec<BossTemplate>,
}

/// Load boss templates from a TOML file
pub fn load_boss_configs(path: &Path) -> Result<Vec<BossTemplate>, ConfigError> {
    let config: BossesConfig = super::load_toml(path)?;
    Ok(config.bosses)
}

/// Load boss templates from a TOML string
pub fn parse_boss_configs(content: &str) -> Result<Vec<BossTemplate>, ConfigError> {
    let config: BossesConfig = super::parse_toml(content)?;
    Ok(config.bosses)
}

/// Get the bundled boss templates
pub fn default_bosses() -> Result<Vec<BossTemplate>, ConfigError> {
    parse_boss_configs(include_str!("../../config/bosses.toml"))
}
