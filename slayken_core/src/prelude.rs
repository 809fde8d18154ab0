//! Prelude module for convenient imports
//!
//! ```rust
//! use slayken_core::prelude::*;
//! ```

// Core types
pub use crate::stat_block::{StatBlock, ResolvedStats};
pub use crate::types::{BossId, CharacterId, Element, EquipmentSlot, ItemId, SkillId, StageId, StatKind};

// Catalog and characters
pub use crate::catalog::Catalog;
pub use crate::character::Character;

// Battle
pub use crate::encounter::{AttackOutcome, EncounterContext, EncounterSession, EncounterTarget, VictoryReport};
pub use crate::damage::DamageBreakdown;

// Progress
pub use crate::stage::StageProgress;
pub use crate::wallet::{CurrencySink, Wallet};

// Config
pub use crate::config::GameConstants;
