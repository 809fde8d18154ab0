//! StatAccumulator - Collects stat modifications before they become a
//! resolved stat block

use crate::stat_block::StatBlock;
use crate::types::{ItemId, StatKind};

/// Accumulates stat modifications from various sources
///
/// Sources write flat values into `stats` and percentage modifiers into
/// `percent_bonuses`. Attack and exp gain percentages always exist so the
/// damage and reward formulas never see them missing.
#[derive(Debug, Clone)]
pub struct StatAccumulator {
    pub stats: StatBlock,
    pub percent_bonuses: StatBlock,
    /// Equipped ids that could not be found in the catalog
    pub missing_items: Vec<ItemId>,
}

impl Default for StatAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl StatAccumulator {
    pub fn new() -> Self {
        let mut percent_bonuses = StatBlock::new();
        percent_bonuses.set(StatKind::Attack, 0.0);
        percent_bonuses.set(StatKind::ExpGain, 0.0);
        StatAccumulator {
            stats: StatBlock::new(),
            percent_bonuses,
            missing_items: Vec::new(),
        }
    }

    /// Add a flat value, creating the stat at 0 if absent
    pub fn add_flat(&mut self, stat: StatKind, value: f64) {
        self.stats.add(stat, value);
    }

    /// Accumulate a percentage modifier (30.0 = +30%)
    pub fn add_percent(&mut self, stat: StatKind, value: f64) {
        self.percent_bonuses.add(stat, value);
    }

    /// Replace the whole block (used by the base source, which runs first)
    pub fn set_base(&mut self, stats: &StatBlock) {
        for (kind, value) in stats.iter() {
            self.stats.set(kind, value);
        }
    }
}
