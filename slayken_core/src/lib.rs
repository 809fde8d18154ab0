//! slayken_core - Battle resolution and progression engine
//!
//! This library provides:
//! - Catalog: equipment, skills, bosses and stages loaded from TOML
//! - Stat resolution: character stats merged with equipment bonuses
//! - Damage: the layered attack formula against a scaled boss
//! - Progression: experience, level-ups, stat growth and skill unlocks
//! - Encounter: the battle state machine that applies victory rewards once
//! - Persistence: JSON documents behind a key-value store

pub mod boss;
pub mod catalog;
pub mod character;
pub mod config;
pub mod damage;
pub mod encounter;
pub mod persistence;
pub mod prelude;
pub mod progression;
pub mod source;
pub mod stage;
pub mod stat_block;
pub mod types;
pub mod wallet;

// Re-export core types for convenience
pub use boss::ScaledBoss;
pub use catalog::{BossTemplate, Catalog, EquipmentItem, ItemBonus, Skill, StageKind, StageNode};
pub use character::{Character, CharacterError};
pub use config::{ConfigError, GameConstants};
pub use damage::{compute_damage, compute_damage_breakdown, DamageBreakdown, DamageInput};
pub use encounter::{
    AttackOutcome, EncounterContext, EncounterError, EncounterSession, EncounterState, EncounterTarget, IgnoreReason,
    VictoryReport,
};
pub use persistence::{JsonFileStore, KeyValueStore, MemoryStore, StoreError};
pub use progression::{gain_exp, LevelUpOutcome};
pub use source::{BaseStatsSource, GearSource, StatSource};
pub use stage::StageProgress;
pub use stat_block::{resolve, ResolvedStats, StatAccumulator, StatBlock};
pub use types::{BonusType, BossId, CharacterId, Element, EquipmentSlot, ItemId, SkillId, StageId, StatKind};
pub use wallet::{CurrencySink, Wallet};
