//! Persistence - a key-value store port and typed save/load on top of it
//!
//! The engine never touches storage itself. Callers load values, pass them
//! through the engine, and save what comes back.

mod file;
mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

use crate::character::Character;
use crate::stage::StageProgress;
use crate::wallet::Wallet;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

pub const CHARACTERS_KEY: &str = "characters";
pub const STAGE_PROGRESS_KEY: &str = "stage_progress";
pub const WALLET_KEY: &str = "wallet";

/// Storage errors
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("Stored value is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid key '{0}'")]
    InvalidKey(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// String key-value storage, last write wins
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    fn remove(&mut self, key: &str) -> Result<()>;

    /// Check if a key exists
    fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.get(key)?.is_some())
    }
}

/// Read and decode a JSON value
pub fn load_json<T: DeserializeOwned>(store: &impl KeyValueStore, key: &str) -> Result<Option<T>> {
    match store.get(key)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Encode and write a JSON value
pub fn save_json<T: Serialize + ?Sized>(store: &mut impl KeyValueStore, key: &str, value: &T) -> Result<()> {
    let raw = serde_json::to_string(value)?;
    store.set(key, &raw)
}

/// Roster; empty when nothing was saved yet
pub fn load_characters(store: &impl KeyValueStore) -> Result<Vec<Character>> {
    Ok(load_json(store, CHARACTERS_KEY)?.unwrap_or_default())
}

pub fn save_characters(store: &mut impl KeyValueStore, characters: &[Character]) -> Result<()> {
    tracing::debug!(count = characters.len(), "saving roster");
    save_json(store, CHARACTERS_KEY, characters)
}

/// Stage progress; None when nothing was saved yet
pub fn load_stage_progress(store: &impl KeyValueStore) -> Result<Option<Vec<StageProgress>>> {
    load_json(store, STAGE_PROGRESS_KEY)
}

pub fn save_stage_progress(store: &mut impl KeyValueStore, progress: &[StageProgress]) -> Result<()> {
    save_json(store, STAGE_PROGRESS_KEY, progress)
}

pub fn load_wallet(store: &impl KeyValueStore) -> Result<Wallet> {
    Ok(load_json(store, WALLET_KEY)?.unwrap_or_default())
}

pub fn save_wallet(store: &mut impl KeyValueStore, wallet: &Wallet) -> Result<()> {
    save_json(store, WALLET_KEY, wallet)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::config::ProgressionConstants;
    use crate::stage;
    use crate::stat_block::StatBlock;
    use crate::types::{Element, StageId, StatKind};

    #[test]
    fn test_empty_store_defaults() {
        let store = MemoryStore::new();
        assert!(load_characters(&store).unwrap().is_empty());
        assert!(load_stage_progress(&store).unwrap().is_none());
        assert_eq!(load_wallet(&store).unwrap(), Wallet::default());
    }

    #[test]
    fn test_typed_save_load() {
        let catalog = Catalog::bundled().unwrap();
        let mut store = MemoryStore::new();

        let hero = Character::new(
            "hero",
            "Hero",
            Element::Light,
            StatBlock::from_pairs(&[(StatKind::Attack, 25.0)]),
            &ProgressionConstants::default(),
            catalog.skills(),
        );
        let progress = stage::advance(&stage::initial(catalog.stages()), StageId(1));
        let wallet = Wallet {
            coins: 5,
            crystals: 1,
            account_exp: 2,
        };

        save_characters(&mut store, std::slice::from_ref(&hero)).unwrap();
        save_stage_progress(&mut store, &progress).unwrap();
        save_wallet(&mut store, &wallet).unwrap();

        assert_eq!(load_characters(&store).unwrap(), vec![hero]);
        assert_eq!(load_stage_progress(&store).unwrap(), Some(progress));
        assert_eq!(load_wallet(&store).unwrap(), wallet);
    }

    #[test]
    fn test_corrupt_value_is_json_error() {
        let mut store = MemoryStore::new();
        store.set(WALLET_KEY, "{not json").unwrap();
        assert!(matches!(load_wallet(&store), Err(StoreError::Json(_))));
    }
}
