//! GearSource - Stats from equipped items

use crate::catalog::EquipmentItem;
use crate::source::StatSource;
use crate::stat_block::StatAccumulator;
use crate::types::{BonusType, EquipmentSlot};

/// Stats from an equipped item
pub struct GearSource<'a> {
    /// Which slot this item is in
    pub slot: EquipmentSlot,
    /// The catalog definition of the equipped item
    pub item: &'a EquipmentItem,
}

impl<'a> GearSource<'a> {
    /// Create a new gear source
    pub fn new(slot: EquipmentSlot, item: &'a EquipmentItem) -> Self {
        GearSource { slot, item }
    }
}

impl StatSource for GearSource<'_> {
    fn id(&self) -> &str {
        self.item.id.as_str()
    }

    fn priority(&self) -> i32 {
        0 // Gear applies at default priority
    }

    fn apply(&self, stats: &mut StatAccumulator) {
        for bonus in &self.item.bonuses {
            match bonus.bonus_type {
                BonusType::Flat => stats.add_flat(bonus.stat, bonus.value),
                BonusType::Percent => stats.add_percent(bonus.stat, bonus.value),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ItemBonus;
    use crate::types::{ItemId, StatKind};

    fn blade() -> EquipmentItem {
        EquipmentItem {
            id: ItemId::from("flame_blade"),
            name: "Flame Blade".to_string(),
            slot: EquipmentSlot::Weapon,
            bonuses: vec![
                ItemBonus::flat(StatKind::Attack, 25.0),
                ItemBonus::flat(StatKind::Agility, 3.0),
                ItemBonus::percent(StatKind::Attack, 30.0),
            ],
        }
    }

    #[test]
    fn test_gear_source_id() {
        let item = blade();
        let source = GearSource::new(EquipmentSlot::Weapon, &item);
        assert_eq!(source.id(), "flame_blade");
    }

    #[test]
    fn test_gear_bonuses_split_by_type() {
        let item = blade();
        let source = GearSource::new(EquipmentSlot::Weapon, &item);
        let mut acc = StatAccumulator::new();
        acc.add_flat(StatKind::Attack, 100.0);
        source.apply(&mut acc);

        assert!((acc.stats.get_or_zero(StatKind::Attack) - 125.0).abs() < f64::EPSILON);
        // Agility was absent and is created at 0 first
        assert!((acc.stats.get_or_zero(StatKind::Agility) - 3.0).abs() < f64::EPSILON);
        assert!((acc.percent_bonuses.get_or_zero(StatKind::Attack) - 30.0).abs() < f64::EPSILON);
    }
}
