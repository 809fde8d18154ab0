//! Application state

use rand::rngs::StdRng;
use rand::SeedableRng;
use slayken_core::{
    catalog::Skill,
    config::{self, ConfigError},
    damage::DamageBreakdown,
    encounter::{AttackOutcome, EncounterContext, EncounterError, EncounterSession, EncounterTarget, IgnoreReason},
    persistence::{self, JsonFileStore, StoreError},
    progression,
    stage::{self, StageProgress},
    stat_block::{self, ResolvedStats},
    Catalog, Character, Element, EquipmentSlot, GameConstants, ItemId, StageId, Wallet,
};
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

/// Optional constants override, read from the data directory
pub const CONSTANTS_FILE: &str = "constants.toml";

/// Errors that stop the simulator from starting
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Stages,
    Battle,
    Hero,
    Help,
}

impl Tab {
    pub fn all() -> &'static [Tab] {
        &[Tab::Stages, Tab::Battle, Tab::Hero, Tab::Help]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Tab::Stages => "Stages",
            Tab::Battle => "Battle",
            Tab::Hero => "Hero",
            Tab::Help => "Help",
        }
    }
}

pub struct App {
    pub current_tab: Tab,
    pub catalog: Catalog,
    pub constants: GameConstants,
    pub store: JsonFileStore,
    pub roster: Vec<Character>,
    pub active: usize,
    pub progress: Vec<StageProgress>,
    pub wallet: Wallet,
    pub session: EncounterSession,
    pub battle_log: Vec<String>,
    pub log_scroll: usize,
    pub selected_stage: usize,
    pub selected_skill: usize,
    pub selected_inventory: usize,
    pub status: Option<String>,
    pub rng: StdRng,
}

impl App {
    /// Load the save in `data_dir`, creating a starter character when the
    /// roster is empty
    pub fn load(data_dir: &Path) -> Result<Self, AppError> {
        let catalog = Catalog::bundled()?;

        let constants_path = data_dir.join(CONSTANTS_FILE);
        let constants = if constants_path.exists() {
            info!(path = %constants_path.display(), "loading constants override");
            config::load_constants(&constants_path)?
        } else {
            GameConstants::default()
        };

        let store = JsonFileStore::open(data_dir)?;

        let mut roster = persistence::load_characters(&store)?;
        let created_starter = roster.is_empty();
        if created_starter {
            roster.push(starter_character(&catalog, &constants));
        }

        let progress = match persistence::load_stage_progress(&store)? {
            Some(saved) => stage::reconcile(&saved, catalog.stages()),
            None => stage::initial(catalog.stages()),
        };
        let wallet = persistence::load_wallet(&store)?;
        let selected_stage = stage::next_playable(&progress)
            .and_then(|id| catalog.stages().iter().position(|s| s.id == id))
            .unwrap_or(0);

        let mut app = App {
            current_tab: Tab::Stages,
            catalog,
            constants,
            store,
            roster,
            active: 0,
            progress,
            wallet,
            session: EncounterSession::new(),
            battle_log: vec!["Pick a stage and press Enter to fight.".to_string()],
            log_scroll: 0,
            selected_stage,
            selected_skill: 0,
            selected_inventory: 0,
            status: None,
            rng: StdRng::from_entropy(),
        };

        if created_starter {
            app.save();
        }
        Ok(app)
    }

    pub fn active_character(&self) -> Option<&Character> {
        self.roster.get(self.active)
    }

    pub fn resolved_stats(&self) -> Option<ResolvedStats> {
        self.active_character().map(|c| stat_block::resolve(c, &self.catalog))
    }

    /// Skills the active character knows, in pool order
    pub fn known_skills(&self) -> Vec<&Skill> {
        let Some(character) = self.active_character() else {
            return Vec::new();
        };
        self.catalog
            .skills()
            .iter()
            .filter(|s| character.knows_skill(&s.id))
            .collect()
    }

    pub fn current_skill(&self) -> Option<&Skill> {
        self.known_skills().get(self.selected_skill).copied()
    }

    /// Damage the selected skill would deal to the current boss
    pub fn damage_preview(&self, skill: &Skill) -> Option<DamageBreakdown> {
        let character = self.active_character()?;
        self.session.preview(character, &skill.id, &self.catalog, &self.constants)
    }

    pub fn selected_stage_id(&self) -> Option<StageId> {
        self.catalog.stages().get(self.selected_stage).map(|s| s.id)
    }

    pub fn next_tab(&mut self) {
        let tabs = Tab::all();
        let current_idx = tabs.iter().position(|t| *t == self.current_tab).unwrap_or(0);
        let next_idx = (current_idx + 1) % tabs.len();
        self.current_tab = tabs[next_idx];
    }

    pub fn prev_tab(&mut self) {
        let tabs = Tab::all();
        let current_idx = tabs.iter().position(|t| *t == self.current_tab).unwrap_or(0);
        let prev_idx = if current_idx == 0 {
            tabs.len() - 1
        } else {
            current_idx - 1
        };
        self.current_tab = tabs[prev_idx];
    }

    pub fn set_tab(&mut self, index: usize) {
        let tabs = Tab::all();
        if index < tabs.len() {
            self.current_tab = tabs[index];
        }
    }

    pub fn on_up(&mut self) {
        match self.current_tab {
            Tab::Stages => self.selected_stage = self.selected_stage.saturating_sub(1),
            Tab::Battle => self.selected_skill = self.selected_skill.saturating_sub(1),
            Tab::Hero => self.selected_inventory = self.selected_inventory.saturating_sub(1),
            Tab::Help => {}
        }
    }

    pub fn on_down(&mut self) {
        match self.current_tab {
            Tab::Stages => {
                if self.selected_stage + 1 < self.catalog.stages().len() {
                    self.selected_stage += 1;
                }
            }
            Tab::Battle => {
                if self.selected_skill + 1 < self.known_skills().len() {
                    self.selected_skill += 1;
                }
            }
            Tab::Hero => {
                let len = self.active_character().map_or(0, |c| c.inventory.len());
                if self.selected_inventory + 1 < len {
                    self.selected_inventory += 1;
                }
            }
            Tab::Help => {}
        }
    }

    pub fn on_scroll_log(&mut self, up: bool) {
        if up {
            self.log_scroll = self.log_scroll.saturating_sub(1);
        } else if self.log_scroll + 1 < self.battle_log.len() {
            self.log_scroll += 1;
        }
    }

    pub fn on_enter(&mut self) {
        match self.current_tab {
            Tab::Stages => self.start_selected_stage(),
            Tab::Battle => self.attack(),
            Tab::Hero => self.equip_selected(),
            Tab::Help => {}
        }
    }

    pub fn start_selected_stage(&mut self) {
        let Some(id) = self.selected_stage_id() else {
            return;
        };
        self.start(EncounterTarget::Stage(id));
    }

    pub fn start(&mut self, target: EncounterTarget) {
        let level = self.active_character().map_or(1, |c| c.level);
        let started = self
            .session
            .start(target, &self.catalog, &self.progress, level, &self.constants.boss)
            .map(|boss| format!("━━━ {} appears (HP {:.0}, DEF {:.0}) ━━━", boss.name, boss.hp, boss.defense));

        match started {
            Ok(line) => {
                self.battle_log.clear();
                self.battle_log.push(line);
                self.log_scroll = 0;
                self.selected_skill = 0;
                self.status = None;
                self.current_tab = Tab::Battle;
            }
            Err(EncounterError::StageLocked(id)) => {
                self.status = Some(format!("Stage {} is locked", id));
            }
            Err(e) => {
                warn!(error = %e, "could not start encounter");
                self.status = Some(e.to_string());
            }
        }
    }

    pub fn attack(&mut self) {
        let Some(skill_id) = self.current_skill().map(|s| s.id.clone()) else {
            self.status = Some("No skill selected".to_string());
            return;
        };

        let mut ctx = EncounterContext {
            catalog: &self.catalog,
            constants: &self.constants,
            character: self.roster.get_mut(self.active),
            stage_progress: &mut self.progress,
            currencies: &mut self.wallet,
        };
        let outcome = self.session.attack(&mut ctx, &skill_id, &mut self.rng);

        match outcome {
            AttackOutcome::Hit { damage, boss_hp, .. } => {
                self.battle_log.push(format!("{} hits for {} ({:.0} HP left)", skill_id, damage, boss_hp));
            }
            AttackOutcome::Victory { damage, report, .. } => {
                self.battle_log.push(format!("{} hits for {}", skill_id, damage));
                self.battle_log.push("━━━ BOSS DEFEATED ━━━".to_string());
                self.battle_log.push(report.summary());
                self.status = Some(report.summary());
                self.save();
            }
            AttackOutcome::Ignored(reason) => {
                self.status = Some(match reason {
                    IgnoreReason::NotInBattle => "No battle in progress".to_string(),
                    IgnoreReason::AlreadyResolved => "The boss is already defeated. Pick another stage.".to_string(),
                    IgnoreReason::NoActiveCharacter => "No active character".to_string(),
                    IgnoreReason::SkillUnavailable(id) => format!("{} is not available", id),
                });
            }
        }
    }

    /// Equip the selected inventory item into its slot
    pub fn equip_selected(&mut self) {
        let Some(character) = self.roster.get_mut(self.active) else {
            return;
        };
        let Some(item_id) = character.inventory.get(self.selected_inventory).cloned() else {
            return;
        };

        match character.equip(&self.catalog, &item_id) {
            Ok(previous) => {
                self.status = Some(match previous {
                    Some(prev) => format!("Equipped {} (was {})", item_id, prev),
                    None => format!("Equipped {}", item_id),
                });
                self.clamp_inventory_selection();
                self.save();
            }
            Err(e) => self.status = Some(e.to_string()),
        }
    }

    pub fn unequip(&mut self, slot: EquipmentSlot) {
        let Some(character) = self.roster.get_mut(self.active) else {
            return;
        };
        if let Some(item) = character.unequip(slot) {
            self.status = Some(format!("Unequipped {}", item));
            self.save();
        }
    }

    /// Leave the current battle
    pub fn reset(&mut self) {
        self.session.reset();
        self.battle_log.clear();
        self.battle_log.push("Pick a stage and press Enter to fight.".to_string());
        self.log_scroll = 0;
        self.current_tab = Tab::Stages;
    }

    pub fn level_progress(&self) -> f64 {
        self.active_character().map_or(0.0, progression::level_progress)
    }

    fn clamp_inventory_selection(&mut self) {
        let len = self.active_character().map_or(0, |c| c.inventory.len());
        self.selected_inventory = self.selected_inventory.min(len.saturating_sub(1));
    }

    /// Persist roster, stage progress and wallet
    ///
    /// Failures are logged and shown in the status line; play continues.
    pub fn save(&mut self) {
        let result = persistence::save_characters(&mut self.store, &self.roster)
            .and_then(|_| persistence::save_stage_progress(&mut self.store, &self.progress))
            .and_then(|_| persistence::save_wallet(&mut self.store, &self.wallet));

        if let Err(e) = result {
            warn!(error = %e, "save failed");
            self.status = Some(format!("Save failed: {}", e));
        }
    }
}

/// Level 1 fire character holding a wooden sword
pub fn starter_character(catalog: &Catalog, constants: &GameConstants) -> Character {
    let mut hero = Character::new(
        "hero",
        "Slayer",
        Element::Fire,
        constants.progression.default_base_stats.clone(),
        &constants.progression,
        catalog.skills(),
    );
    let sword = ItemId::from("wooden_sword");
    if catalog.item(&sword).is_some() {
        hero.inventory.push(sword.clone());
        if let Err(e) = hero.equip(catalog, &sword) {
            warn!(error = %e, "starter weapon could not be equipped");
        }
    }
    hero
}
