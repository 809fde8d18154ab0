//! Game constants configuration

use crate::stat_block::StatBlock;
use crate::types::StatKind;
use serde::{Deserialize, Serialize};

/// Tunable game constants
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameConstants {
    #[serde(default)]
    pub progression: ProgressionConstants,
    #[serde(default)]
    pub damage: DamageConstants,
    #[serde(default)]
    pub boss: BossConstants,
    #[serde(default)]
    pub rewards: RewardConstants,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressionConstants {
    /// Highest reachable character level
    #[serde(default = "default_level_cap")]
    pub level_cap: u32,
    /// Experience needed to go from level 1 to 2
    #[serde(default = "default_base_exp")]
    pub base_exp_to_next_level: u64,
    /// Multiplier applied to the threshold after every level-up
    #[serde(default = "default_exp_growth")]
    pub exp_growth_factor: f64,
    /// Fraction of the base stat gained per level above 1
    #[serde(default = "default_stat_growth")]
    pub stat_growth_per_level: f64,
    /// Used when a character has no recorded base stats
    #[serde(default = "default_base_stats")]
    pub default_base_stats: StatBlock,
}

impl Default for ProgressionConstants {
    fn default() -> Self {
        ProgressionConstants {
            level_cap: default_level_cap(),
            base_exp_to_next_level: default_base_exp(),
            exp_growth_factor: default_exp_growth(),
            stat_growth_per_level: default_stat_growth(),
            default_base_stats: default_base_stats(),
        }
    }
}

fn default_level_cap() -> u32 {
    50
}
fn default_base_exp() -> u64 {
    100
}
fn default_exp_growth() -> f64 {
    1.2
}
fn default_stat_growth() -> f64 {
    0.1
}
fn default_base_stats() -> StatBlock {
    StatBlock::from_pairs(&[
        (StatKind::Hp, 100.0),
        (StatKind::Attack, 20.0),
        (StatKind::Defense, 10.0),
        (StatKind::Strength, 10.0),
        (StatKind::Agility, 10.0),
        (StatKind::Intelligence, 10.0),
    ])
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DamageConstants {
    /// Attack increase per strength point, in percent
    #[serde(default = "default_one_percent")]
    pub strength_attack_percent: f64,
    /// Attack increase per level above 1, in percent
    #[serde(default = "default_one_percent")]
    pub level_attack_percent: f64,
}

impl Default for DamageConstants {
    fn default() -> Self {
        DamageConstants {
            strength_attack_percent: 1.0,
            level_attack_percent: 1.0,
        }
    }
}

fn default_one_percent() -> f64 {
    1.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BossConstants {
    /// HP multiplier gained per attacker level above 1
    #[serde(default = "default_hp_per_level")]
    pub hp_per_level: f64,
    /// Defense multiplier gained per attacker level above 1
    #[serde(default = "default_defense_per_level")]
    pub defense_per_level: f64,
}

impl Default for BossConstants {
    fn default() -> Self {
        BossConstants {
            hp_per_level: default_hp_per_level(),
            defense_per_level: default_defense_per_level(),
        }
    }
}

fn default_hp_per_level() -> f64 {
    0.15
}
fn default_defense_per_level() -> f64 {
    0.05
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewardConstants {
    #[serde(default = "default_coins")]
    pub coins: u64,
    #[serde(default = "default_crystals")]
    pub crystals: u64,
    /// Account-level experience
    #[serde(default = "default_account_exp")]
    pub account_exp: u64,
    /// Experience granted to the fighting character
    #[serde(default = "default_character_exp")]
    pub character_exp: i64,
    /// Chance of an item drop when no skill was unlocked
    #[serde(default = "default_drop_chance")]
    pub drop_chance: f64,
}

impl Default for RewardConstants {
    fn default() -> Self {
        RewardConstants {
            coins: default_coins(),
            crystals: default_crystals(),
            account_exp: default_account_exp(),
            character_exp: default_character_exp(),
            drop_chance: default_drop_chance(),
        }
    }
}

fn default_coins() -> u64 {
    100
}
fn default_crystals() -> u64 {
    10
}
fn default_account_exp() -> u64 {
    50
}
fn default_character_exp() -> i64 {
    60
}
fn default_drop_chance() -> f64 {
    0.5
}
