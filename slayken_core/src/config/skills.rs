//! Skill pool loading

use super::ConfigError;
use crate::catalog::Skill;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Container for skill configurations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillsConfig {
    #[serde(rename = "skills")]
    pub skills: Vec<Skill>,
}

/// Load the skill pool from a TOML file, in file order
pub fn load_skill_configs(path: &Path) -> Result<Vec<Skill>, ConfigError> {
    let config: SkillsConfig = super::load_toml(path)?;
    Ok(config.skills)
}

/// Load the skill pool from a TOML string, in file order
pub fn parse_skill_configs(content: &str) -> Result<Vec<Skill>, ConfigError> {
    let config: SkillsConfig = super::parse_toml(content)?;
    Ok(config.skills)
}

/// Get the bundled skill pool
pub fn default_skills() -> Result<Vec<Skill>, ConfigError> {
    parse_skill_configs(include_str!("../../config/skills.toml"))
}
