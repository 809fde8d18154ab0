//! Progression - experience, level-ups, stat growth and skill unlocks

use crate::catalog::Skill;
use crate::character::Character;
use crate::config::ProgressionConstants;
use crate::stat_block::StatBlock;
use crate::types::{Element, SkillId};
use tracing::{debug, warn};

/// Result of [`gain_exp`]
#[derive(Debug, Clone, PartialEq)]
pub struct LevelUpOutcome {
    /// The updated character; persisting it is the caller's job
    pub character: Character,
    /// True if at least one level threshold was crossed
    pub just_leveled_up: bool,
    pub levels_gained: u32,
    /// Skills unlocked by this call that the character did not know before
    pub new_skills: Vec<SkillId>,
    /// Experience thrown away because the level cap was reached
    pub exp_discarded: u64,
}

/// Award experience to a character
///
/// Experience is spent on level-ups while it covers the current threshold;
/// each level multiplies the threshold by `exp_growth_factor` (floored).
/// Reaching the cap pins the character at `level_cap` with 0/0 experience
/// and discards the remainder. Stats are re-derived from the recorded base
/// stats (or the default block) and the skill list is rebuilt from the pool.
///
/// Non-positive amounts never change the level.
pub fn gain_exp(
    character: &Character,
    amount: i64,
    skill_pool: &[Skill],
    constants: &ProgressionConstants,
) -> LevelUpOutcome {
    let cap = constants.level_cap.max(1);
    let mut updated = character.clone();
    normalize_level(&mut updated, cap, constants);

    if amount <= 0 {
        if amount < 0 {
            warn!(character = %updated.id, amount, "negative experience ignored");
        }
        return LevelUpOutcome {
            character: updated,
            just_leveled_up: false,
            levels_gained: 0,
            new_skills: Vec::new(),
            exp_discarded: 0,
        };
    }

    let starting_level = updated.level;
    let mut exp = updated.experience.saturating_add(amount as u64);
    let mut next = updated.experience_to_next_level;

    while updated.level < cap && exp >= next {
        exp -= next;
        updated.level += 1;
        next = ((next as f64 * constants.exp_growth_factor).floor() as u64).max(1);
        debug!(character = %updated.id, level = updated.level, next, "level up");
    }

    let mut exp_discarded = 0;
    if updated.level >= cap {
        updated.level = cap;
        exp_discarded = exp;
        exp = 0;
        next = 0;
    }
    updated.experience = exp;
    updated.experience_to_next_level = next;

    let base = updated
        .base_stats
        .clone()
        .unwrap_or_else(|| constants.default_base_stats.clone());
    updated.stats = stats_for_level(&base, updated.level, constants.stat_growth_per_level);

    let unlocked = unlocked_skills(skill_pool, updated.level, updated.element);
    let new_skills: Vec<SkillId> = unlocked
        .iter()
        .filter(|id| !character.skills.contains(id))
        .cloned()
        .collect();
    updated.skills = unlocked;

    let levels_gained = updated.level - starting_level;
    if levels_gained > 0 {
        debug!(
            character = %updated.id,
            from = starting_level,
            to = updated.level,
            new_skills = new_skills.len(),
            "character leveled up"
        );
    }

    LevelUpOutcome {
        character: updated,
        just_leveled_up: levels_gained > 0,
        levels_gained,
        new_skills,
        exp_discarded,
    }
}

/// Clamp an out-of-range level and restore the cap invariant
fn normalize_level(character: &mut Character, cap: u32, constants: &ProgressionConstants) {
    if character.level == 0 {
        warn!(character = %character.id, "level 0 clamped to 1");
        character.level = 1;
    }
    if character.level > cap {
        warn!(character = %character.id, level = character.level, cap, "level above cap clamped");
        character.level = cap;
    }
    if character.level == cap {
        character.experience = 0;
        character.experience_to_next_level = 0;
    } else if character.experience_to_next_level == 0 {
        warn!(character = %character.id, "missing experience threshold reset to base");
        character.experience_to_next_level = constants.base_exp_to_next_level.max(1);
    }
}

/// Stats for a level: each base stat grows by `growth` of itself per level
/// above 1, floored
pub fn stats_for_level(base: &StatBlock, level: u32, growth: f64) -> StatBlock {
    let multiplier = 1.0 + level.saturating_sub(1) as f64 * growth;
    base.map_values(|value| (value * multiplier).floor())
}

/// Skills from the pool a character of this level and element knows, in
/// pool order
pub fn unlocked_skills(pool: &[Skill], level: u32, element: Element) -> Vec<SkillId> {
    pool.iter()
        .filter(|skill| skill.is_unlocked_for(level, element))
        .map(|skill| skill.id.clone())
        .collect()
}

/// Fraction of the way to the next level, 1.0 at the cap
pub fn level_progress(character: &Character) -> f64 {
    if character.experience_to_next_level == 0 {
        1.0
    } else {
        (character.experience as f64 / character.experience_to_next_level as f64).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::types::StatKind;

    fn setup() -> (Catalog, ProgressionConstants) {
        (Catalog::bundled().unwrap(), ProgressionConstants::default())
    }

    fn character(catalog: &Catalog, constants: &ProgressionConstants, element: Element) -> Character {
        Character::new(
            "hero",
            "Hero",
            element,
            StatBlock::from_pairs(&[(StatKind::Attack, 20.0), (StatKind::Hp, 100.0)]),
            constants,
            catalog.skills(),
        )
    }

    #[test]
    fn test_reference_example() {
        let (catalog, constants) = setup();
        let mut c = character(&catalog, &constants, Element::Fire);
        c.experience = 90;

        let outcome = gain_exp(&c, 50, catalog.skills(), &constants);
        assert_eq!(outcome.character.level, 2);
        assert_eq!(outcome.character.experience, 40);
        assert_eq!(outcome.character.experience_to_next_level, 120);
        assert!(outcome.just_leveled_up);
        assert_eq!(outcome.levels_gained, 1);
    }

    #[test]
    fn test_no_level_up_below_threshold() {
        let (catalog, constants) = setup();
        let c = character(&catalog, &constants, Element::Fire);

        let outcome = gain_exp(&c, 99, catalog.skills(), &constants);
        assert_eq!(outcome.character.level, 1);
        assert_eq!(outcome.character.experience, 99);
        assert!(!outcome.just_leveled_up);
    }

    #[test]
    fn test_multi_level_up() {
        let (catalog, constants) = setup();
        let c = character(&catalog, &constants, Element::Fire);

        // 100 + 120 + 144 = 364 for three levels, 6 left over
        let outcome = gain_exp(&c, 370, catalog.skills(), &constants);
        assert_eq!(outcome.character.level, 4);
        assert_eq!(outcome.character.experience, 6);
        assert_eq!(outcome.character.experience_to_next_level, 172);
        assert_eq!(outcome.levels_gained, 3);
    }

    #[test]
    fn test_threshold_is_floored() {
        let (catalog, mut constants) = setup();
        constants.base_exp_to_next_level = 7;
        let c = character(&catalog, &constants, Element::Fire);

        // floor(7 × 1.2) = 8
        let outcome = gain_exp(&c, 7, catalog.skills(), &constants);
        assert_eq!(outcome.character.experience_to_next_level, 8);
    }

    #[test]
    fn test_zero_and_negative_are_noops() {
        let (catalog, constants) = setup();
        let mut c = character(&catalog, &constants, Element::Fire);
        c.experience = 50;

        for amount in [0, -10, i64::MIN] {
            let outcome = gain_exp(&c, amount, catalog.skills(), &constants);
            assert_eq!(outcome.character, c);
            assert!(!outcome.just_leveled_up);
        }
    }

    #[test]
    fn test_level_cap_discards_surplus() {
        let (catalog, constants) = setup();
        let mut c = character(&catalog, &constants, Element::Fire);
        c.level = 49;
        c.experience_to_next_level = 1000;

        let outcome = gain_exp(&c, 5000, catalog.skills(), &constants);
        assert_eq!(outcome.character.level, 50);
        assert_eq!(outcome.character.experience, 0);
        assert_eq!(outcome.character.experience_to_next_level, 0);
        assert_eq!(outcome.exp_discarded, 4000);
        assert!(outcome.just_leveled_up);
    }

    #[test]
    fn test_cap_is_idempotent() {
        let (catalog, constants) = setup();
        let mut c = character(&catalog, &constants, Element::Fire);
        c.level = 50;
        c.experience = 0;
        c.experience_to_next_level = 0;

        let mut current = c;
        for _ in 0..3 {
            let outcome = gain_exp(&current, 10_000, catalog.skills(), &constants);
            assert_eq!(outcome.character.level, 50);
            assert_eq!(outcome.character.experience, 0);
            assert!(!outcome.just_leveled_up);
            current = outcome.character;
        }
    }

    #[test]
    fn test_level_above_cap_clamped() {
        let (catalog, constants) = setup();
        let mut c = character(&catalog, &constants, Element::Fire);
        c.level = 75;
        c.experience = 30;

        let outcome = gain_exp(&c, 10, catalog.skills(), &constants);
        assert_eq!(outcome.character.level, 50);
        assert_eq!(outcome.character.experience, 0);
    }

    #[test]
    fn test_stats_rederived_from_base() {
        let (catalog, constants) = setup();
        let c = character(&catalog, &constants, Element::Fire);

        let outcome = gain_exp(&c, 100, catalog.skills(), &constants);
        // level 2: ×1.1
        assert_eq!(outcome.character.stats.get(StatKind::Attack), Some(22.0));
        assert_eq!(outcome.character.stats.get(StatKind::Hp), Some(110.0));
    }

    #[test]
    fn test_default_base_used_when_unrecorded() {
        let (catalog, constants) = setup();
        let mut c = character(&catalog, &constants, Element::Fire);
        c.base_stats = None;

        let outcome = gain_exp(&c, 1, catalog.skills(), &constants);
        assert_eq!(outcome.character.stats, constants.default_base_stats);
    }

    #[test]
    fn test_new_skills_respect_element() {
        let (catalog, constants) = setup();
        let mut c = character(&catalog, &constants, Element::Water);
        c.level = 4;
        c.experience_to_next_level = 10;

        let outcome = gain_exp(&c, 10, catalog.skills(), &constants);
        assert_eq!(outcome.character.level, 5);
        assert!(outcome.new_skills.contains(&SkillId::from("tidal_wave")));
        assert!(!outcome.new_skills.contains(&SkillId::from("fireball")));
        // power_slash unlocked at 3 counts as new since level 1 creation
        assert!(outcome.character.skills.contains(&SkillId::from("strike")));
    }

    #[test]
    fn test_no_new_skills_when_already_known() {
        let (catalog, constants) = setup();
        let c = character(&catalog, &constants, Element::Fire);

        let outcome = gain_exp(&c, 10, catalog.skills(), &constants);
        assert!(outcome.new_skills.is_empty());
    }

    #[test]
    fn test_stats_for_level_floors() {
        let base = StatBlock::from_pairs(&[(StatKind::Attack, 15.0)]);
        // 15 × 1.3 = 19.5 → 19
        assert_eq!(stats_for_level(&base, 4, 0.1).get(StatKind::Attack), Some(19.0));
        assert_eq!(stats_for_level(&base, 1, 0.1).get(StatKind::Attack), Some(15.0));
    }

    #[test]
    fn test_level_progress() {
        let (catalog, constants) = setup();
        let mut c = character(&catalog, &constants, Element::Fire);
        c.experience = 25;
        assert!((level_progress(&c) - 0.25).abs() < f64::EPSILON);
        c.experience_to_next_level = 0;
        assert!((level_progress(&c) - 1.0).abs() < f64::EPSILON);
    }
}
