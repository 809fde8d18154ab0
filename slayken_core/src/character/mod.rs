//! Character - A roster entry: level, experience, stats, equipment, skills

use crate::catalog::{Catalog, Skill};
use crate::config::ProgressionConstants;
use crate::progression;
use crate::stat_block::StatBlock;
use crate::types::{CharacterId, Element, EquipmentSlot, ItemId, SkillId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors from roster-level character operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CharacterError {
    #[error("Item '{0}' does not exist in the equipment catalog")]
    UnknownItem(ItemId),
    #[error("Item '{0}' is not in the character's inventory")]
    NotInInventory(ItemId),
}

/// A playable character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    pub element: Element,
    pub level: u32,
    pub experience: u64,
    /// 0 once the level cap is reached
    pub experience_to_next_level: u64,
    /// Current stats derived from `base_stats` and level
    pub stats: StatBlock,
    /// Stats recorded at creation; the level-scaling seed
    #[serde(default)]
    pub base_stats: Option<StatBlock>,
    /// Slot -> equipped item id. Missing and `None` both mean empty.
    #[serde(default)]
    pub equipment: BTreeMap<EquipmentSlot, Option<ItemId>>,
    #[serde(default)]
    pub skills: Vec<SkillId>,
    #[serde(default)]
    pub inventory: Vec<ItemId>,
}

impl Character {
    /// Create a level 1 character with the skills available at level 1
    pub fn new(
        id: impl Into<CharacterId>,
        name: impl Into<String>,
        element: Element,
        base_stats: StatBlock,
        progression: &ProgressionConstants,
        skill_pool: &[Skill],
    ) -> Self {
        Character {
            id: id.into(),
            name: name.into(),
            element,
            level: 1,
            experience: 0,
            experience_to_next_level: progression.base_exp_to_next_level,
            stats: base_stats.clone(),
            base_stats: Some(base_stats),
            equipment: BTreeMap::new(),
            skills: progression::unlocked_skills(skill_pool, 1, element),
            inventory: Vec::new(),
        }
    }

    /// Item id equipped in a slot
    pub fn equipped(&self, slot: EquipmentSlot) -> Option<&ItemId> {
        self.equipment.get(&slot).and_then(|id| id.as_ref())
    }

    /// Equipped (slot, item id) pairs, skipping empty slots
    pub fn equipped_items(&self) -> impl Iterator<Item = (EquipmentSlot, &ItemId)> {
        self.equipment
            .iter()
            .filter_map(|(slot, id)| id.as_ref().map(|id| (*slot, id)))
    }

    /// Equip an item from the inventory into the slot its definition names
    ///
    /// Returns the item that was previously in that slot, which goes back to
    /// the inventory.
    pub fn equip(&mut self, catalog: &Catalog, item_id: &ItemId) -> Result<Option<ItemId>, CharacterError> {
        let item = catalog
            .item(item_id)
            .ok_or_else(|| CharacterError::UnknownItem(item_id.clone()))?;
        let position = self
            .inventory
            .iter()
            .position(|id| id == item_id)
            .ok_or_else(|| CharacterError::NotInInventory(item_id.clone()))?;

        self.inventory.remove(position);
        let previous = self.equipment.insert(item.slot, Some(item_id.clone())).flatten();
        if let Some(ref prev) = previous {
            self.inventory.push(prev.clone());
        }
        Ok(previous)
    }

    /// Empty a slot, returning its item to the inventory
    pub fn unequip(&mut self, slot: EquipmentSlot) -> Option<ItemId> {
        let removed = self.equipment.insert(slot, None).flatten();
        if let Some(ref id) = removed {
            self.inventory.push(id.clone());
        }
        removed
    }

    pub fn knows_skill(&self, id: &SkillId) -> bool {
        self.skills.contains(id)
    }
}
