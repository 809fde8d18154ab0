//! BaseStatsSource - The character's own (level-derived) stats

use crate::source::StatSource;
use crate::stat_block::{StatAccumulator, StatBlock};

/// Stats the character carries before any equipment
pub struct BaseStatsSource<'a> {
    pub stats: &'a StatBlock,
}

impl<'a> BaseStatsSource<'a> {
    pub fn new(stats: &'a StatBlock) -> Self {
        BaseStatsSource { stats }
    }
}

impl StatSource for BaseStatsSource<'_> {
    fn id(&self) -> &str {
        "base_stats"
    }

    fn priority(&self) -> i32 {
        -100 // Base stats apply first
    }

    fn apply(&self, stats: &mut StatAccumulator) {
        stats.set_base(self.stats);
    }
}
