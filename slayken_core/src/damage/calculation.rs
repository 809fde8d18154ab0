//! Damage calculation - layered multipliers applied in a fixed order

use crate::catalog::Skill;
use crate::config::DamageConstants;
use crate::stat_block::{ResolvedStats, StatBlock};
use crate::types::StatKind;
use tracing::debug;

/// Everything the damage formula reads
#[derive(Debug, Clone, Copy)]
pub struct DamageInput<'a> {
    pub char_stats: &'a StatBlock,
    pub percent_bonuses: &'a StatBlock,
    pub level: u32,
    pub skill: &'a Skill,
    pub enemy_defense: f64,
}

impl<'a> DamageInput<'a> {
    pub fn from_resolved(resolved: &'a ResolvedStats, skill: &'a Skill, enemy_defense: f64) -> Self {
        DamageInput {
            char_stats: &resolved.stats,
            percent_bonuses: &resolved.percent_bonuses,
            level: resolved.level,
            skill,
            enemy_defense,
        }
    }
}

/// Intermediate values of one damage computation
#[derive(Debug, Clone, PartialEq)]
pub struct DamageBreakdown {
    pub base_attack: f64,
    /// After the equipment attack percent
    pub after_percent: f64,
    /// After the per-strength increase
    pub after_strength: f64,
    /// After the per-level increase
    pub after_level: f64,
    pub skill_multiplier: f64,
    /// Attack times skill multiplier plus base power
    pub raw_damage: f64,
    pub after_defense: f64,
    pub final_damage: i64,
}

/// Compute damage with the default constants. Always at least 1.
pub fn compute_damage(input: &DamageInput) -> i64 {
    compute_damage_breakdown(input, &DamageConstants::default()).final_damage
}

/// Compute damage and keep every intermediate value
///
/// The multipliers compound in order:
/// 1. base attack = attack, else strength, else 1
/// 2. × (1 + attack% / 100)
/// 3. × (1 + strength × strength_attack_percent / 100)
/// 4. × (1 + (level - 1) × level_attack_percent / 100), above level 1 only
/// 5. × skill_dmg / 100 (default 100), + base_power (default 0)
/// 6. − enemy defense, floored at 1, rounded
///
/// Step 3 applies strength on top of any attack percent that gear granted.
pub fn compute_damage_breakdown(input: &DamageInput, constants: &DamageConstants) -> DamageBreakdown {
    let stats = input.char_stats;

    let base_attack = stats
        .get(StatKind::Attack)
        .or_else(|| stats.get(StatKind::Strength))
        .unwrap_or(1.0);

    let attack_percent = input.percent_bonuses.get_or_zero(StatKind::Attack);
    let after_percent = base_attack * (1.0 + attack_percent / 100.0);

    let strength = stats.get_or_zero(StatKind::Strength);
    let after_strength = after_percent * (1.0 + strength * constants.strength_attack_percent / 100.0);

    let after_level = if input.level > 1 {
        after_strength * (1.0 + (input.level - 1) as f64 * constants.level_attack_percent / 100.0)
    } else {
        after_strength
    };

    let skill_multiplier = input.skill.skill_dmg.unwrap_or(100.0) / 100.0;
    let raw_damage = after_level * skill_multiplier + input.skill.base_power.unwrap_or(0.0);

    let after_defense = (raw_damage - input.enemy_defense).max(1.0);
    let final_damage = after_defense.round() as i64;

    debug!(
        skill = %input.skill.id,
        base_attack,
        attack_percent,
        after_percent,
        strength,
        after_strength,
        level = input.level,
        after_level,
        skill_multiplier,
        raw_damage,
        enemy_defense = input.enemy_defense,
        final_damage,
        "damage computed"
    );

    DamageBreakdown {
        base_attack,
        after_percent,
        after_strength,
        after_level,
        skill_multiplier,
        raw_damage,
        after_defense,
        final_damage,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SkillId;

    fn skill(skill_dmg: Option<f64>, base_power: Option<f64>) -> Skill {
        Skill {
            id: SkillId::from("test"),
            name: "Test".to_string(),
            unlock_level: 1,
            elements: vec![],
            skill_dmg,
            base_power,
            cooldown: 0,
        }
    }

    fn zero_bonuses() -> StatBlock {
        StatBlock::from_pairs(&[(StatKind::Attack, 0.0), (StatKind::ExpGain, 0.0)])
    }

    fn damage(stats: &StatBlock, bonuses: &StatBlock, level: u32, skill: &Skill, defense: f64) -> i64 {
        compute_damage(&DamageInput {
            char_stats: stats,
            percent_bonuses: bonuses,
            level,
            skill,
            enemy_defense: defense,
        })
    }

    #[test]
    fn test_reference_example() {
        // 100 × 1.10 (strength) × 1.04 (level 5) = 114.4, − 20 = 94.4 → 94
        let stats = StatBlock::from_pairs(&[(StatKind::Attack, 100.0), (StatKind::Strength, 10.0)]);
        let bonuses = zero_bonuses();
        let s = skill(Some(100.0), None);
        let input = DamageInput {
            char_stats: &stats,
            percent_bonuses: &bonuses,
            level: 5,
            skill: &s,
            enemy_defense: 20.0,
        };

        let breakdown = compute_damage_breakdown(&input, &DamageConstants::default());
        assert!((breakdown.after_strength - 110.0).abs() < 1e-9);
        assert!((breakdown.after_level - 114.4).abs() < 1e-9);
        assert!((breakdown.after_defense - 94.4).abs() < 1e-9);
        assert_eq!(breakdown.final_damage, 94);
        assert_eq!(compute_damage(&input), 94);
    }

    #[test]
    fn test_percent_bonus_compounds_with_strength() {
        // 100 × 1.5 × 1.1 = 165
        let stats = StatBlock::from_pairs(&[(StatKind::Attack, 100.0), (StatKind::Strength, 10.0)]);
        let bonuses = StatBlock::from_pairs(&[(StatKind::Attack, 50.0)]);
        assert_eq!(damage(&stats, &bonuses, 1, &skill(None, None), 0.0), 165);
    }

    #[test]
    fn test_attack_falls_back_to_strength() {
        // base 20, × (1 + 20 × 0.01) = 24
        let stats = StatBlock::from_pairs(&[(StatKind::Strength, 20.0)]);
        assert_eq!(damage(&stats, &zero_bonuses(), 1, &skill(None, None), 0.0), 24);
    }

    #[test]
    fn test_empty_stats_fall_back_to_one() {
        let stats = StatBlock::new();
        let bonuses = StatBlock::new();
        assert_eq!(damage(&stats, &bonuses, 1, &skill(None, None), 0.0), 1);
    }

    #[test]
    fn test_defense_floor() {
        let stats = StatBlock::from_pairs(&[(StatKind::Attack, 10.0)]);
        assert_eq!(damage(&stats, &zero_bonuses(), 1, &skill(None, None), 5000.0), 1);
    }

    #[test]
    fn test_skill_multiplier_and_base_power() {
        // 100 × 1.5 + 30 = 180
        let stats = StatBlock::from_pairs(&[(StatKind::Attack, 100.0)]);
        assert_eq!(damage(&stats, &zero_bonuses(), 1, &skill(Some(150.0), Some(30.0)), 0.0), 180);
    }

    #[test]
    fn test_healing_skill_still_deals_minimum() {
        let stats = StatBlock::from_pairs(&[(StatKind::Attack, 100.0)]);
        assert_eq!(damage(&stats, &zero_bonuses(), 10, &skill(Some(-50.0), None), 0.0), 1);
    }

    #[test]
    fn test_level_one_has_no_level_bonus() {
        let stats = StatBlock::from_pairs(&[(StatKind::Attack, 100.0)]);
        assert_eq!(damage(&stats, &zero_bonuses(), 1, &skill(None, None), 0.0), 100);
        assert_eq!(damage(&stats, &zero_bonuses(), 11, &skill(None, None), 0.0), 110);
    }

    #[test]
    fn test_rounds_to_nearest() {
        // 33 × 1.5 = 49.5 → 50
        let stats = StatBlock::from_pairs(&[(StatKind::Attack, 33.0)]);
        assert_eq!(damage(&stats, &zero_bonuses(), 1, &skill(Some(150.0), None), 0.0), 50);
        // 33 × 1.49 = 49.17 → 49
        assert_eq!(damage(&stats, &zero_bonuses(), 1, &skill(Some(149.0), None), 0.0), 49);
    }

    #[test]
    fn test_custom_constants() {
        let stats = StatBlock::from_pairs(&[(StatKind::Attack, 100.0), (StatKind::Strength, 10.0)]);
        let bonuses = zero_bonuses();
        let s = skill(None, None);
        let input = DamageInput {
            char_stats: &stats,
            percent_bonuses: &bonuses,
            level: 1,
            skill: &s,
            enemy_defense: 0.0,
        };
        let constants = DamageConstants {
            strength_attack_percent: 2.0,
            level_attack_percent: 1.0,
        };
        assert_eq!(compute_damage_breakdown(&input, &constants).final_damage, 120);
    }
}
