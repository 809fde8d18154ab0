//! AttackOutcome - What a single attack did

use crate::damage::DamageBreakdown;
use crate::types::{ItemId, SkillId, StageId};

/// Everything a victory produced, computed exactly once per kill
#[derive(Debug, Clone, PartialEq)]
pub struct VictoryReport {
    pub coins: u64,
    pub crystals: u64,
    pub account_exp: u64,
    /// Experience given to the character, after the exp gain bonus
    pub character_exp: i64,
    pub levels_gained: u32,
    pub new_level: u32,
    /// Skills revealed by this victory; when non-empty no item drops
    pub new_skills: Vec<SkillId>,
    pub dropped_item: Option<ItemId>,
    pub stage_completed: Option<StageId>,
    /// Successor unlocked by this victory (None if it already was)
    pub stage_unlocked: Option<StageId>,
}

impl VictoryReport {
    pub fn leveled_up(&self) -> bool {
        self.levels_gained > 0
    }

    /// Get a summary string
    pub fn summary(&self) -> String {
        let mut parts = vec![format!(
            "+{} coins, +{} crystals, +{} EXP",
            self.coins, self.crystals, self.character_exp
        )];

        if self.leveled_up() {
            parts.push(format!("reached level {}", self.new_level));
        }
        if !self.new_skills.is_empty() {
            let names: Vec<&str> = self.new_skills.iter().map(|s| s.as_str()).collect();
            parts.push(format!("learned {}", names.join(", ")));
        }
        if let Some(ref item) = self.dropped_item {
            parts.push(format!("found {}", item));
        }
        if let Some(stage) = self.stage_unlocked {
            parts.push(format!("stage {} unlocked", stage));
        }

        parts.join(", ")
    }
}

/// Why an attack did nothing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IgnoreReason {
    /// No battle has been started
    NotInBattle,
    /// The boss is already down; the kill was processed earlier
    AlreadyResolved,
    NoActiveCharacter,
    /// Skill not in the pool or not unlocked for the character
    SkillUnavailable(SkillId),
}

/// Result of [`EncounterSession::attack`](super::EncounterSession::attack)
#[derive(Debug, Clone, PartialEq)]
pub enum AttackOutcome {
    Hit {
        damage: i64,
        breakdown: DamageBreakdown,
        boss_hp: f64,
    },
    Victory {
        damage: i64,
        breakdown: DamageBreakdown,
        report: VictoryReport,
    },
    Ignored(IgnoreReason),
}

impl AttackOutcome {
    /// Damage dealt, 0 if the attack was ignored
    pub fn damage(&self) -> i64 {
        match self {
            AttackOutcome::Hit { damage, .. } | AttackOutcome::Victory { damage, .. } => *damage,
            AttackOutcome::Ignored(_) => 0,
        }
    }

    pub fn is_victory(&self) -> bool {
        matches!(self, AttackOutcome::Victory { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> VictoryReport {
        VictoryReport {
            coins: 100,
            crystals: 10,
            account_exp: 50,
            character_exp: 60,
            levels_gained: 0,
            new_level: 1,
            new_skills: vec![],
            dropped_item: None,
            stage_completed: Some(StageId(1)),
            stage_unlocked: Some(StageId(2)),
        }
    }

    #[test]
    fn test_summary() {
        let mut r = report();
        assert_eq!(r.summary(), "+100 coins, +10 crystals, +60 EXP, stage 2 unlocked");

        r.levels_gained = 1;
        r.new_level = 2;
        r.dropped_item = Some(ItemId::from("iron_sword"));
        r.stage_unlocked = None;
        assert_eq!(
            r.summary(),
            "+100 coins, +10 crystals, +60 EXP, reached level 2, found iron_sword"
        );
    }

    #[test]
    fn test_ignored_deals_nothing() {
        let outcome = AttackOutcome::Ignored(IgnoreReason::NotInBattle);
        assert_eq!(outcome.damage(), 0);
        assert!(!outcome.is_victory());
    }
}
