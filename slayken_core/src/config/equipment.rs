//! Equipment catalog loading

use super::ConfigError;
use crate::catalog::EquipmentItem;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Container for equipment configurations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquipmentConfig {
    #[serde(rename = "items")]
    pub items: Vec<EquipmentItem>,
}

/// Load equipment definitions from a TOML file
pub fn load_equipment_configs(path: &Path) -> Result<Vec<EquipmentItem>, ConfigError> {
    let config: EquipmentConfig = super::load_toml(path)?;
    Ok(config.items)
}

/// Load equipment definitions from a TOML string
pub fn parse_equipment_configs(content: &str) -> Result<Vec<EquipmentItem>, ConfigError> {
    let config: EquipmentConfig = super::parse_toml(content)?;
    Ok(config.items)
}

/// Get the bundled equipment catalog
pub fn default_equipment() -> Result<Vec<EquipmentItem>, ConfigError> {
    parse_equipment_configs(include_str!("../../config/equipment.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BonusType, EquipmentSlot, StatKind};

    #[test]
    fn test_parse_equipment() {
        let toml = r#"
[[items]]
id = "iron_sword"
name = "Iron Sword"
slot = "weapon"

[[items.bonuses]]
stat = "attack"
value = 10
type = "flat"

[[items.bonuses]]
stat = "attack"
value = 5
type = "percent"
"#;

        let items = parse_equipment_configs(toml).unwrap();
        assert_eq!(items.len(), 1);
        let sword = &items[0];
        assert_eq!(sword.slot, EquipmentSlot::Weapon);
        assert_eq!(sword.bonuses.len(), 2);
        assert_eq!(sword.bonuses[0].stat, StatKind::Attack);
        assert_eq!(sword.bonuses[1].bonus_type, BonusType::Percent);
    }

    #[test]
    fn test_default_equipment_has_weapons() {
        let items = default_equipment().unwrap();
        assert!(!items.is_empty());
        assert!(items.iter().any(|i| i.slot == EquipmentSlot::Weapon));
    }
}
