//! Static definitions read from the bundled data files

use crate::types::{BonusType, BossId, Element, EquipmentSlot, ItemId, SkillId, StageId, StatKind};
use serde::{Deserialize, Serialize};

/// One stat modifier granted by an item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemBonus {
    pub stat: StatKind,
    pub value: f64,
    #[serde(rename = "type")]
    pub bonus_type: BonusType,
}

impl ItemBonus {
    pub fn flat(stat: StatKind, value: f64) -> Self {
        ItemBonus {
            stat,
            value,
            bonus_type: BonusType::Flat,
        }
    }

    pub fn percent(stat: StatKind, value: f64) -> Self {
        ItemBonus {
            stat,
            value,
            bonus_type: BonusType::Percent,
        }
    }
}

/// An equippable item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentItem {
    pub id: ItemId,
    pub name: String,
    pub slot: EquipmentSlot,
    #[serde(default)]
    pub bonuses: Vec<ItemBonus>,
}

/// A skill from the skill pool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub id: SkillId,
    pub name: String,
    /// Minimum character level to unlock
    #[serde(default = "default_unlock_level")]
    pub unlock_level: u32,
    /// Required elements; empty means any element may learn it
    #[serde(default)]
    pub elements: Vec<Element>,
    /// Damage as a percentage of attack (None = 100%)
    #[serde(default)]
    pub skill_dmg: Option<f64>,
    /// Flat damage added after the multiplier (None = 0)
    #[serde(default)]
    pub base_power: Option<f64>,
    /// Turns between uses. Carried as data, not enforced.
    #[serde(default)]
    pub cooldown: u32,
}

fn default_unlock_level() -> u32 {
    1
}

impl Skill {
    /// Whether a character of this level and element may learn the skill
    pub fn is_unlocked_for(&self, level: u32, element: Element) -> bool {
        self.unlock_level <= level && (self.elements.is_empty() || self.elements.contains(&element))
    }

    /// Negative power represents healing
    pub fn is_healing(&self) -> bool {
        self.skill_dmg.unwrap_or(100.0) < 0.0
    }
}

/// Static boss definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BossTemplate {
    pub id: BossId,
    pub name: String,
    pub hp: f64,
    pub defense: f64,
    /// Asset reference for the boss portrait
    #[serde(default)]
    pub image: String,
    /// Asset reference for the battle background
    #[serde(default)]
    pub background: String,
}

/// Kind of encounter a stage node holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageKind {
    Normal,
    Boss,
}

/// One node in the stage graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageNode {
    pub id: StageId,
    pub name: String,
    pub kind: StageKind,
    pub boss: BossId,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fire_skill() -> Skill {
        Skill {
            id: SkillId::from("fireball"),
            name: "Fireball".to_string(),
            unlock_level: 5,
            elements: vec![Element::Fire],
            skill_dmg: Some(170.0),
            base_power: Some(10.0),
            cooldown: 2,
        }
    }

    #[test]
    fn test_unlock_requires_level() {
        let skill = fire_skill();
        assert!(!skill.is_unlocked_for(4, Element::Fire));
        assert!(skill.is_unlocked_for(5, Element::Fire));
    }

    #[test]
    fn test_unlock_requires_element() {
        let skill = fire_skill();
        assert!(!skill.is_unlocked_for(20, Element::Water));
    }

    #[test]
    fn test_no_element_requirement() {
        let mut skill = fire_skill();
        skill.elements.clear();
        assert!(skill.is_unlocked_for(5, Element::Dark));
        assert!(!skill.is_healing());
        skill.skill_dmg = Some(-50.0);
        assert!(skill.is_healing());
    }
}
