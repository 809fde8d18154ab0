//! Core types shared across the engine

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                $name(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                $name(s)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(
    /// Identifier of a roster character
    CharacterId
);
string_id!(
    /// Identifier of an equipment catalog entry
    ItemId
);
string_id!(
    /// Identifier of a skill pool entry
    SkillId
);
string_id!(
    /// Identifier of a boss template
    BossId
);

/// Identifier of a stage node. Stage ids are dense and start at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StageId(pub u32);

impl StageId {
    pub const FIRST: StageId = StageId(1);

    /// The node unlocked by completing this one
    pub fn successor(self) -> StageId {
        StageId(self.0 + 1)
    }
}

impl fmt::Display for StageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A numeric attribute that can appear in a stat block or an item bonus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatKind {
    Hp,
    Attack,
    Defense,
    Strength,
    Agility,
    Intelligence,
    /// Only meaningful as a percent bonus (boosts experience rewards)
    ExpGain,
}

impl StatKind {
    /// Stats that make up a character's stat block
    pub fn core() -> &'static [StatKind] {
        &[
            StatKind::Hp,
            StatKind::Attack,
            StatKind::Defense,
            StatKind::Strength,
            StatKind::Agility,
            StatKind::Intelligence,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            StatKind::Hp => "HP",
            StatKind::Attack => "Attack",
            StatKind::Defense => "Defense",
            StatKind::Strength => "Strength",
            StatKind::Agility => "Agility",
            StatKind::Intelligence => "Intelligence",
            StatKind::ExpGain => "EXP Gain",
        }
    }
}

/// Elemental affinity of a character or skill requirement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Element {
    Fire,
    Water,
    Wind,
    Earth,
    Light,
    Dark,
}

/// Equipment slot on a character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentSlot {
    Weapon,
    Armor,
    Accessory,
}

impl EquipmentSlot {
    /// Get all equipment slots
    pub fn all() -> &'static [EquipmentSlot] {
        &[
            EquipmentSlot::Weapon,
            EquipmentSlot::Armor,
            EquipmentSlot::Accessory,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            EquipmentSlot::Weapon => "Weapon",
            EquipmentSlot::Armor => "Armor",
            EquipmentSlot::Accessory => "Accessory",
        }
    }
}

/// How an item bonus combines with a stat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BonusType {
    /// Added directly to the stat
    Flat,
    /// Accumulated as a percentage modifier
    Percent,
}
