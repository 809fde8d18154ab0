//! Effective stat resolution: character stats merged with equipment bonuses

use crate::catalog::Catalog;
use crate::character::Character;
use crate::source::{BaseStatsSource, GearSource, StatSource};
use crate::stat_block::{StatAccumulator, StatBlock};
use crate::types::ItemId;
use tracing::{debug, warn};

/// A character's stats after every source has been applied
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedStats {
    /// Flat stats (base + flat equipment bonuses)
    pub stats: StatBlock,
    /// Percentage modifiers; attack and exp gain are always present
    pub percent_bonuses: StatBlock,
    /// Character level, never below 1
    pub level: u32,
    /// Equipped ids that were not found in the catalog
    pub missing_items: Vec<ItemId>,
    /// Ids of the sources that contributed, in application order
    pub applied_sources: Vec<String>,
}

/// Resolve a character's effective stats
///
/// Sources are applied in priority order: the character's own stats first,
/// then each equipped item. An equipped id missing from the catalog is
/// skipped and reported rather than treated as an error.
pub fn resolve(character: &Character, catalog: &Catalog) -> ResolvedStats {
    let mut acc = StatAccumulator::new();

    let base = BaseStatsSource::new(&character.stats);
    let mut sources: Vec<Box<dyn StatSource + '_>> = vec![Box::new(base)];

    for (slot, item_id) in character.equipped_items() {
        match catalog.item(item_id) {
            Some(item) => sources.push(Box::new(GearSource::new(slot, item))),
            None => {
                warn!(
                    character = %character.id,
                    item = %item_id,
                    slot = slot.name(),
                    "equipped item missing from catalog, skipping"
                );
                acc.missing_items.push(item_id.clone());
            }
        }
    }

    sources.sort_by_key(|s| s.priority());
    let mut applied_sources = Vec::with_capacity(sources.len());
    for source in &sources {
        debug!(character = %character.id, source = source.id(), priority = source.priority(), "applying stat source");
        source.apply(&mut acc);
        applied_sources.push(source.id().to_string());
    }

    ResolvedStats {
        stats: acc.stats,
        percent_bonuses: acc.percent_bonuses,
        level: character.level.max(1),
        missing_items: acc.missing_items,
        applied_sources,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProgressionConstants;
    use crate::types::{Element, EquipmentSlot, StatKind};

    fn character(catalog: &Catalog) -> Character {
        Character::new(
            "hero",
            "Hero",
            Element::Wind,
            StatBlock::from_pairs(&[(StatKind::Attack, 100.0), (StatKind::Strength, 10.0)]),
            &ProgressionConstants::default(),
            catalog.skills(),
        )
    }

    #[test]
    fn test_no_equipment_copies_stats() {
        let catalog = Catalog::bundled().unwrap();
        let c = character(&catalog);
        let resolved = resolve(&c, &catalog);

        assert_eq!(resolved.stats, c.stats);
        assert_eq!(resolved.percent_bonuses.get(StatKind::Attack), Some(0.0));
        assert_eq!(resolved.percent_bonuses.get(StatKind::ExpGain), Some(0.0));
        assert_eq!(resolved.level, 1);
    }

    #[test]
    fn test_flat_and_percent_bonuses() {
        let catalog = Catalog::bundled().unwrap();
        let mut c = character(&catalog);
        // flame_blade: +25 attack flat, +20% attack
        c.equipment.insert(EquipmentSlot::Weapon, Some(ItemId::from("flame_blade")));
        // lucky_charm: +10% exp gain
        c.equipment.insert(EquipmentSlot::Accessory, Some(ItemId::from("lucky_charm")));

        let resolved = resolve(&c, &catalog);
        assert!((resolved.stats.get_or_zero(StatKind::Attack) - 125.0).abs() < f64::EPSILON);
        assert!((resolved.percent_bonuses.get_or_zero(StatKind::Attack) - 20.0).abs() < f64::EPSILON);
        assert!((resolved.percent_bonuses.get_or_zero(StatKind::ExpGain) - 10.0).abs() < f64::EPSILON);
        assert!(resolved.missing_items.is_empty());
    }

    #[test]
    fn test_sources_applied_base_first() {
        let catalog = Catalog::bundled().unwrap();
        let mut c = character(&catalog);
        c.equipment.insert(EquipmentSlot::Weapon, Some(ItemId::from("flame_blade")));
        c.equipment.insert(EquipmentSlot::Armor, Some(ItemId::from("lost_relic")));

        let resolved = resolve(&c, &catalog);
        assert_eq!(resolved.applied_sources, vec!["base_stats".to_string(), "flame_blade".to_string()]);
    }

    #[test]
    fn test_flat_bonus_creates_missing_stat() {
        let catalog = Catalog::bundled().unwrap();
        let mut c = character(&catalog);
        c.equipment.insert(EquipmentSlot::Armor, Some(ItemId::from("leather_vest")));

        let resolved = resolve(&c, &catalog);
        assert_eq!(resolved.stats.get(StatKind::Defense), Some(8.0));
        assert_eq!(resolved.stats.get(StatKind::Hp), Some(40.0));
    }

    #[test]
    fn test_missing_item_skipped_and_reported() {
        let catalog = Catalog::bundled().unwrap();
        let mut c = character(&catalog);
        c.equipment.insert(EquipmentSlot::Weapon, Some(ItemId::from("lost_relic")));
        c.equipment.insert(EquipmentSlot::Armor, None);

        let resolved = resolve(&c, &catalog);
        assert_eq!(resolved.stats, c.stats);
        assert_eq!(resolved.missing_items, vec![ItemId::from("lost_relic")]);
    }

    #[test]
    fn test_level_floor_is_one() {
        let catalog = Catalog::bundled().unwrap();
        let mut c = character(&catalog);
        c.level = 0;
        assert_eq!(resolve(&c, &catalog).level, 1);
        c.level = 7;
        assert_eq!(resolve(&c, &catalog).level, 7);
    }

    #[test]
    fn test_resolve_does_not_mutate_character() {
        let catalog = Catalog::bundled().unwrap();
        let mut c = character(&catalog);
        c.equipment.insert(EquipmentSlot::Weapon, Some(ItemId::from("dragon_fang")));
        let before = c.clone();
        let _ = resolve(&c, &catalog);
        assert_eq!(c, before);
    }
}
