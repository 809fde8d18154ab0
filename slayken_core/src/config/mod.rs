//! Configuration loading from TOML files

mod bosses;
mod constants;
mod equipment;
mod skills;
mod stages;

pub use bosses::{default_bosses, load_boss_configs, parse_boss_configs};
pub use constants::{BossConstants, DamageConstants, GameConstants, ProgressionConstants, RewardConstants};
pub use equipment::{default_equipment, load_equipment_configs, parse_equipment_configs};
pub use skills::{default_skills, load_skill_configs, parse_skill_configs};
pub use stages::{default_stages, load_stage_configs, parse_stage_configs};

use std::fs;
use std::path::Path;
use thiserror::Error;

/// Configuration loading error
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Configuration validation error: {0}")]
    ValidationError(String),
}

/// Load a TOML file and deserialize it
pub fn load_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: T = toml::from_str(&content)?;
    Ok(config)
}

/// Load a TOML string and deserialize it
pub fn parse_toml<T: serde::de::DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    let config: T = toml::from_str(content)?;
    Ok(config)
}

/// Load game constants from a TOML file
pub fn load_constants(path: &Path) -> Result<GameConstants, ConfigError> {
    let constants: GameConstants = load_toml(path)?;
    validate_constants(&constants)?;
    Ok(constants)
}

fn validate_constants(constants: &GameConstants) -> Result<(), ConfigError> {
    let progression = &constants.progression;
    if progression.level_cap == 0 {
        return Err(ConfigError::ValidationError("level_cap must be at least 1".to_string()));
    }
    if progression.base_exp_to_next_level == 0 {
        return Err(ConfigError::ValidationError(
            "base_exp_to_next_level must be positive".to_string(),
        ));
    }
    if progression.exp_growth_factor < 1.0 {
        return Err(ConfigError::ValidationError(format!(
            "exp_growth_factor {} would shrink the level curve",
            progression.exp_growth_factor
        )));
    }
    if !(0.0..=1.0).contains(&constants.rewards.drop_chance) {
        return Err(ConfigError::ValidationError(format!(
            "drop_chance {} is not a probability",
            constants.rewards.drop_chance
        )));
    }
    if constants.boss.hp_per_level < 0.0 || constants.boss.defense_per_level < 0.0 {
        return Err(ConfigError::ValidationError(
            "boss scaling must not decrease with level".to_string(),
        ));
    }
    Ok(())
}
