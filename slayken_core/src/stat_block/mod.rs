//! StatBlock - A set of numeric attributes, and the resolver that builds the
//! effective block for a character from all of its sources

mod aggregator;
mod resolver;

pub use aggregator::StatAccumulator;
pub use resolver::{resolve, ResolvedStats};

use crate::types::StatKind;
use serde::{Deserialize, Serialize};

/// Numeric attributes keyed by [`StatKind`]
///
/// A stat that is absent is different from a stat that is zero: the damage
/// formula falls back from attack to strength when attack is missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatBlock {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hp: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attack: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defense: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strength: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agility: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intelligence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp_gain: Option<f64>,
}

impl StatBlock {
    /// Create an empty stat block
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a block from (stat, value) pairs
    pub fn from_pairs(pairs: &[(StatKind, f64)]) -> Self {
        let mut block = StatBlock::new();
        for (kind, value) in pairs {
            block.set(*kind, *value);
        }
        block
    }

    fn slot(&self, kind: StatKind) -> &Option<f64> {
        match kind {
            StatKind::Hp => &self.hp,
            StatKind::Attack => &self.attack,
            StatKind::Defense => &self.defense,
            StatKind::Strength => &self.strength,
            StatKind::Agility => &self.agility,
            StatKind::Intelligence => &self.intelligence,
            StatKind::ExpGain => &self.exp_gain,
        }
    }

    fn slot_mut(&mut self, kind: StatKind) -> &mut Option<f64> {
        match kind {
            StatKind::Hp => &mut self.hp,
            StatKind::Attack => &mut self.attack,
            StatKind::Defense => &mut self.defense,
            StatKind::Strength => &mut self.strength,
            StatKind::Agility => &mut self.agility,
            StatKind::Intelligence => &mut self.intelligence,
            StatKind::ExpGain => &mut self.exp_gain,
        }
    }

    /// Get a stat, or None if it was never set
    pub fn get(&self, kind: StatKind) -> Option<f64> {
        *self.slot(kind)
    }

    /// Get a stat, treating a missing value as 0
    pub fn get_or_zero(&self, kind: StatKind) -> f64 {
        self.get(kind).unwrap_or(0.0)
    }

    pub fn set(&mut self, kind: StatKind, value: f64) {
        *self.slot_mut(kind) = Some(value);
    }

    /// Add to a stat, creating it at 0 first if absent
    pub fn add(&mut self, kind: StatKind, value: f64) {
        let slot = self.slot_mut(kind);
        *slot = Some(slot.unwrap_or(0.0) + value);
    }

    /// Iterate over the stats that are present
    pub fn iter(&self) -> impl Iterator<Item = (StatKind, f64)> + '_ {
        [
            StatKind::Hp,
            StatKind::Attack,
            StatKind::Defense,
            StatKind::Strength,
            StatKind::Agility,
            StatKind::Intelligence,
            StatKind::ExpGain,
        ]
        .into_iter()
        .filter_map(move |kind| self.get(kind).map(|v| (kind, v)))
    }

    /// Apply `f` to every present stat
    pub fn map_values(&self, mut f: impl FnMut(f64) -> f64) -> StatBlock {
        let mut out = StatBlock::new();
        for (kind, value) in self.iter() {
            out.set(kind, f(value));
        }
        out
    }
}
