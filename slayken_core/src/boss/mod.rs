//! Boss scaling - adjusting a boss template to the attacker's level

use crate::catalog::BossTemplate;
use crate::config::BossConstants;
use crate::types::BossId;
use serde::{Deserialize, Serialize};

/// A boss with stats adjusted for one encounter. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaledBoss {
    pub id: BossId,
    pub name: String,
    pub hp: f64,
    pub defense: f64,
    /// Attacker level the stats were scaled for
    pub level: u32,
    pub image: String,
    pub background: String,
}

/// Scale a template's hp and defense to the attacker's level
///
/// Each stat grows linearly per level above 1, so the result is monotonic
/// non-decreasing in `attacker_level`. Levels below 1 are treated as 1.
pub fn scale(template: &BossTemplate, attacker_level: u32, constants: &BossConstants) -> ScaledBoss {
    let level = attacker_level.max(1);
    let steps = (level - 1) as f64;

    let hp_multiplier = 1.0 + steps * constants.hp_per_level;
    let defense_multiplier = 1.0 + steps * constants.defense_per_level;

    ScaledBoss {
        id: template.id.clone(),
        name: template.name.clone(),
        hp: (template.hp * hp_multiplier).round().max(1.0),
        defense: (template.defense * defense_multiplier).round(),
        level,
        image: template.image.clone(),
        background: template.background.clone(),
    }
}
