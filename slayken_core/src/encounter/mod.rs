//! Encounter - one battle against a scaled boss
//!
//! A session moves `Idle -> InBattle -> Resolved`. The move to `Resolved`
//! happens inside the attack that brings the boss to 0 HP, and it is the only
//! place victory side effects run, so a kill can never be rewarded twice no
//! matter how many attacks arrive afterwards.

mod result;

pub use result::{AttackOutcome, IgnoreReason, VictoryReport};

use crate::boss::{self, ScaledBoss};
use crate::catalog::Catalog;
use crate::character::Character;
use crate::config::{BossConstants, GameConstants};
use crate::damage::{compute_damage_breakdown, DamageBreakdown, DamageInput};
use crate::progression;
use crate::stage::{self, StageProgress};
use crate::stat_block::{self, ResolvedStats};
use crate::types::{BossId, ItemId, SkillId, StageId, StatKind};
use crate::wallet::CurrencySink;
use rand::Rng;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors from starting an encounter
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EncounterError {
    #[error("Stage {0} does not exist")]
    UnknownStage(StageId),
    #[error("Stage {0} is locked")]
    StageLocked(StageId),
    #[error("Boss '{0}' does not exist")]
    UnknownBoss(BossId),
}

/// What the player chose to fight
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncounterTarget {
    /// A node of the stage graph; victory advances progress
    Stage(StageId),
    /// A free boss fight (portal); no stage progress
    Portal(BossId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EncounterState {
    #[default]
    Idle,
    InBattle,
    Resolved,
}

/// The state an attack reads and the collaborators a victory writes to
pub struct EncounterContext<'a> {
    pub catalog: &'a Catalog,
    pub constants: &'a GameConstants,
    /// The attacking character, if one is selected
    pub character: Option<&'a mut Character>,
    pub stage_progress: &'a mut Vec<StageProgress>,
    pub currencies: &'a mut dyn CurrencySink,
}

/// Runtime state of one battle. Never persisted.
#[derive(Debug, Clone, Default)]
pub struct EncounterSession {
    state: EncounterState,
    target: Option<EncounterTarget>,
    boss: Option<ScaledBoss>,
    boss_hp: f64,
    boss_max_hp: f64,
    last_report: Option<VictoryReport>,
}

impl EncounterSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> EncounterState {
        self.state
    }

    pub fn target(&self) -> Option<&EncounterTarget> {
        self.target.as_ref()
    }

    pub fn boss(&self) -> Option<&ScaledBoss> {
        self.boss.as_ref()
    }

    pub fn boss_hp(&self) -> f64 {
        self.boss_hp
    }

    pub fn boss_max_hp(&self) -> f64 {
        self.boss_max_hp
    }

    /// Remaining boss HP as a percentage
    pub fn boss_hp_percent(&self) -> f64 {
        if self.boss_max_hp > 0.0 {
            self.boss_hp / self.boss_max_hp * 100.0
        } else {
            0.0
        }
    }

    pub fn is_defeated(&self) -> bool {
        self.state == EncounterState::Resolved
    }

    /// Report of the victory that resolved this session
    pub fn last_report(&self) -> Option<&VictoryReport> {
        self.last_report.as_ref()
    }

    /// Begin a battle, discarding whatever the session held before
    ///
    /// Stage targets must be unlocked in `stage_progress`.
    pub fn start(
        &mut self,
        target: EncounterTarget,
        catalog: &Catalog,
        stage_progress: &[StageProgress],
        attacker_level: u32,
        constants: &BossConstants,
    ) -> Result<&ScaledBoss, EncounterError> {
        let boss_id = match &target {
            EncounterTarget::Stage(id) => {
                let node = catalog.stage(*id).ok_or(EncounterError::UnknownStage(*id))?;
                if !stage::is_playable(stage_progress, *id) {
                    return Err(EncounterError::StageLocked(*id));
                }
                node.boss.clone()
            }
            EncounterTarget::Portal(boss_id) => boss_id.clone(),
        };

        let template = catalog.boss(&boss_id).ok_or_else(|| {
            warn!(boss = %boss_id, "encounter references missing boss");
            EncounterError::UnknownBoss(boss_id.clone())
        })?;

        let scaled = boss::scale(template, attacker_level, constants);
        debug!(boss = %scaled.id, hp = scaled.hp, defense = scaled.defense, "encounter started");

        self.reset();
        self.state = EncounterState::InBattle;
        self.boss_hp = scaled.hp;
        self.boss_max_hp = scaled.hp;
        self.target = Some(target);
        Ok(&*self.boss.insert(scaled))
    }

    /// Return to `Idle`, discarding all session state
    pub fn reset(&mut self) {
        *self = EncounterSession::default();
    }

    /// Damage the current boss would take from a skill, without applying it
    pub fn preview(&self, character: &Character, skill_id: &SkillId, catalog: &Catalog, constants: &GameConstants) -> Option<DamageBreakdown> {
        let boss = self.boss.as_ref()?;
        let skill = catalog.skill(skill_id)?;
        let resolved = stat_block::resolve(character, catalog);
        let input = DamageInput::from_resolved(&resolved, skill, boss.defense);
        Some(compute_damage_breakdown(&input, &constants.damage))
    }

    /// Attack the boss with one of the character's skills
    ///
    /// Attacks outside a battle, without a character, or with a skill the
    /// character does not know are ignored. The attack that drops the boss
    /// to 0 HP resolves the session and applies every victory effect.
    pub fn attack(&mut self, ctx: &mut EncounterContext<'_>, skill_id: &SkillId, rng: &mut impl Rng) -> AttackOutcome {
        match self.state {
            EncounterState::Idle => return AttackOutcome::Ignored(IgnoreReason::NotInBattle),
            EncounterState::Resolved => {
                debug!("attack after the kill ignored");
                return AttackOutcome::Ignored(IgnoreReason::AlreadyResolved);
            }
            EncounterState::InBattle => {}
        }

        let Some(defense) = self.boss.as_ref().map(|b| b.defense) else {
            return AttackOutcome::Ignored(IgnoreReason::NotInBattle);
        };
        let catalog = ctx.catalog;
        let constants = ctx.constants;

        let Some(character) = ctx.character.as_deref() else {
            return AttackOutcome::Ignored(IgnoreReason::NoActiveCharacter);
        };
        let skill = match catalog.skill(skill_id) {
            Some(skill) if character.knows_skill(skill_id) => skill,
            _ => return AttackOutcome::Ignored(IgnoreReason::SkillUnavailable(skill_id.clone())),
        };

        let resolved = stat_block::resolve(character, catalog);
        let breakdown = compute_damage_breakdown(&DamageInput::from_resolved(&resolved, skill, defense), &constants.damage);
        let damage = breakdown.final_damage;

        self.boss_hp = (self.boss_hp - damage as f64).max(0.0);
        if self.boss_hp > 0.0 {
            return AttackOutcome::Hit {
                damage,
                breakdown,
                boss_hp: self.boss_hp,
            };
        }

        // Flip state before any side effect runs
        self.state = EncounterState::Resolved;
        let report = self.resolve_victory(ctx, &resolved, rng);
        self.last_report = Some(report.clone());

        AttackOutcome::Victory {
            damage,
            breakdown,
            report,
        }
    }

    fn resolve_victory(&self, ctx: &mut EncounterContext<'_>, resolved: &ResolvedStats, rng: &mut impl Rng) -> VictoryReport {
        let catalog = ctx.catalog;
        let constants = ctx.constants;
        let rewards = &constants.rewards;

        ctx.currencies.add_coins(rewards.coins);
        ctx.currencies.add_crystals(rewards.crystals);
        ctx.currencies.add_experience(rewards.account_exp);

        let exp_bonus = resolved.percent_bonuses.get_or_zero(StatKind::ExpGain);
        let character_exp = (rewards.character_exp as f64 * (1.0 + exp_bonus / 100.0)).floor() as i64;

        let mut report = VictoryReport {
            coins: rewards.coins,
            crystals: rewards.crystals,
            account_exp: rewards.account_exp,
            character_exp,
            levels_gained: 0,
            new_level: resolved.level,
            new_skills: Vec::new(),
            dropped_item: None,
            stage_completed: None,
            stage_unlocked: None,
        };

        if let Some(EncounterTarget::Stage(id)) = self.target {
            let successor = id.successor();
            let was_unlocked = stage::is_playable(ctx.stage_progress.as_slice(), successor);
            *ctx.stage_progress = stage::advance(ctx.stage_progress.as_slice(), id);
            report.stage_completed = Some(id);
            if !was_unlocked && stage::is_playable(ctx.stage_progress.as_slice(), successor) {
                report.stage_unlocked = Some(successor);
            }
        }

        if let Some(character) = ctx.character.as_deref_mut() {
            let outcome = progression::gain_exp(character, character_exp, catalog.skills(), &constants.progression);
            *character = outcome.character;
            report.levels_gained = outcome.levels_gained;
            report.new_level = character.level;
            report.new_skills = outcome.new_skills;

            // New skills take the place of the drop roll
            if report.new_skills.is_empty() {
                report.dropped_item = roll_drop(catalog, rewards.drop_chance, rng);
                if let Some(ref item) = report.dropped_item {
                    character.inventory.push(item.clone());
                }
            }
        }

        info!(
            boss = ?self.boss.as_ref().map(|b| b.id.as_str()),
            summary = %report.summary(),
            "boss defeated"
        );
        report
    }
}

/// Roll for an item drop; on success pick uniformly from the catalog
fn roll_drop(catalog: &Catalog, chance: f64, rng: &mut impl Rng) -> Option<ItemId> {
    if rng.gen::<f64>() >= chance {
        return None;
    }
    let count = catalog.item_count();
    if count == 0 {
        return None;
    }
    let index = rng.gen_range(0..count);
    catalog.items().nth(index).map(|item| item.id.clone())
}
