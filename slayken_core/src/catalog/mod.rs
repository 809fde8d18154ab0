//! Catalog - Read-only lookup of every static definition the engine uses

mod definitions;

pub use definitions::{BossTemplate, EquipmentItem, ItemBonus, Skill, StageKind, StageNode};

use crate::config::{self, ConfigError};
use crate::types::{BossId, ItemId, SkillId, StageId};
use std::collections::BTreeMap;
use std::path::Path;

/// Immutable catalogs keyed by typed ids
///
/// Items and bosses are ordered by id so iteration (and therefore random
/// picks from a seeded RNG) is deterministic. The skill pool keeps file order
/// because unlocked skills are listed in pool order. Stages are sorted by id.
#[derive(Debug, Clone)]
pub struct Catalog {
    equipment: BTreeMap<ItemId, EquipmentItem>,
    skills: Vec<Skill>,
    bosses: BTreeMap<BossId, BossTemplate>,
    stages: Vec<StageNode>,
}

impl Catalog {
    /// Build and validate a catalog from its parts
    pub fn from_parts(
        equipment: Vec<EquipmentItem>,
        skills: Vec<Skill>,
        bosses: Vec<BossTemplate>,
        mut stages: Vec<StageNode>,
    ) -> Result<Self, ConfigError> {
        let mut equipment_map = BTreeMap::new();
        for item in equipment {
            let id = item.id.clone();
            if equipment_map.insert(id.clone(), item).is_some() {
                return Err(ConfigError::ValidationError(format!("duplicate item id '{}'", id)));
            }
        }

        for (i, skill) in skills.iter().enumerate() {
            if skills[..i].iter().any(|s| s.id == skill.id) {
                return Err(ConfigError::ValidationError(format!(
                    "duplicate skill id '{}'",
                    skill.id
                )));
            }
        }

        let mut boss_map = BTreeMap::new();
        for boss in bosses {
            let id = boss.id.clone();
            if boss_map.insert(id.clone(), boss).is_some() {
                return Err(ConfigError::ValidationError(format!("duplicate boss id '{}'", id)));
            }
        }

        stages.sort_by_key(|s| s.id);
        for (index, stage) in stages.iter().enumerate() {
            let expected = StageId(index as u32 + 1);
            if stage.id != expected {
                return Err(ConfigError::ValidationError(format!(
                    "stage ids must be dense from 1: expected {}, found {}",
                    expected, stage.id
                )));
            }
            if !boss_map.contains_key(&stage.boss) {
                return Err(ConfigError::ValidationError(format!(
                    "stage {} references unknown boss '{}'",
                    stage.id, stage.boss
                )));
            }
        }

        Ok(Catalog {
            equipment: equipment_map,
            skills,
            bosses: boss_map,
            stages,
        })
    }

    /// The catalogs compiled into the crate
    pub fn bundled() -> Result<Self, ConfigError> {
        Self::from_parts(
            config::default_equipment()?,
            config::default_skills()?,
            config::default_bosses()?,
            config::default_stages()?,
        )
    }

    /// Load `equipment.toml`, `skills.toml`, `bosses.toml` and `stages.toml`
    /// from a directory
    pub fn load_dir(dir: &Path) -> Result<Self, ConfigError> {
        Self::from_parts(
            config::load_equipment_configs(&dir.join("equipment.toml"))?,
            config::load_skill_configs(&dir.join("skills.toml"))?,
            config::load_boss_configs(&dir.join("bosses.toml"))?,
            config::load_stage_configs(&dir.join("stages.toml"))?,
        )
    }

    pub fn item(&self, id: &ItemId) -> Option<&EquipmentItem> {
        self.equipment.get(id)
    }

    pub fn skill(&self, id: &SkillId) -> Option<&Skill> {
        self.skills.iter().find(|s| &s.id == id)
    }

    pub fn boss(&self, id: &BossId) -> Option<&BossTemplate> {
        self.bosses.get(id)
    }

    pub fn stage(&self, id: StageId) -> Option<&StageNode> {
        // Ids are dense from 1, so the id doubles as an index
        let index = (id.0 as usize).checked_sub(1)?;
        self.stages.get(index)
    }

    /// Equipment in id order
    pub fn items(&self) -> impl Iterator<Item = &EquipmentItem> {
        self.equipment.values()
    }

    pub fn item_count(&self) -> usize {
        self.equipment.len()
    }

    /// Skill pool in definition order
    pub fn skills(&self) -> &[Skill] {
        &self.skills
    }

    pub fn bosses(&self) -> impl Iterator<Item = &BossTemplate> {
        self.bosses.values()
    }

    /// Stage definitions sorted by id
    pub fn stages(&self) -> &[StageNode] {
        &self.stages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{EquipmentSlot, StatKind};

    fn boss(id: &str) -> BossTemplate {
        BossTemplate {
            id: BossId::from(id),
            name: id.to_string(),
            hp: 100.0,
            defense: 0.0,
            image: String::new(),
            background: String::new(),
        }
    }

    fn stage(id: u32, boss: &str) -> StageNode {
        StageNode {
            id: StageId(id),
            name: format!("Stage {}", id),
            kind: StageKind::Normal,
            boss: BossId::from(boss),
        }
    }

    #[test]
    fn test_bundled_catalog_is_consistent() {
        let catalog = Catalog::bundled().unwrap();
        assert!(catalog.item_count() > 0);
        assert_eq!(catalog.stages()[0].id, StageId::FIRST);
        for stage in catalog.stages() {
            assert!(catalog.boss(&stage.boss).is_some());
        }
    }

    #[test]
    fn test_lookup_missing_is_none() {
        let catalog = Catalog::bundled().unwrap();
        assert!(catalog.item(&ItemId::from("no_such_item")).is_none());
        assert!(catalog.boss(&BossId::from("no_such_boss")).is_none());
        assert!(catalog.stage(StageId(0)).is_none());
        assert!(catalog.stage(StageId(999)).is_none());
    }

    #[test]
    fn test_stages_sorted_and_indexed() {
        let catalog = Catalog::from_parts(
            vec![],
            vec![],
            vec![boss("a")],
            vec![stage(2, "a"), stage(1, "a")],
        )
        .unwrap();
        assert_eq!(catalog.stage(StageId(2)).unwrap().id, StageId(2));
    }

    #[test]
    fn test_gap_in_stage_ids_rejected() {
        let result = Catalog::from_parts(vec![], vec![], vec![boss("a")], vec![stage(1, "a"), stage(3, "a")]);
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_unknown_stage_boss_rejected() {
        let result = Catalog::from_parts(vec![], vec![], vec![boss("a")], vec![stage(1, "b")]);
        assert!(result.is_err());
    }

    #[test]
    fn test_duplicate_item_rejected() {
        let item = EquipmentItem {
            id: ItemId::from("dup"),
            name: "Dup".to_string(),
            slot: EquipmentSlot::Weapon,
            bonuses: vec![ItemBonus::flat(StatKind::Attack, 1.0)],
        };
        let result = Catalog::from_parts(vec![item.clone(), item], vec![], vec![], vec![]);
        assert!(result.is_err());
    }

    #[test]
    fn test_load_dir() {
        let dir = tempfile::tempdir().unwrap();
        let data = Path::new(env!("CARGO_MANIFEST_DIR")).join("config");
        for file in ["equipment.toml", "skills.toml", "bosses.toml", "stages.toml"] {
            std::fs::copy(data.join(file), dir.path().join(file)).unwrap();
        }

        let loaded = Catalog::load_dir(dir.path()).unwrap();
        let bundled = Catalog::bundled().unwrap();
        assert_eq!(loaded.skills(), bundled.skills());
        assert_eq!(loaded.stages(), bundled.stages());
    }
}
