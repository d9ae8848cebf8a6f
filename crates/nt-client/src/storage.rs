//! Persistent key-value storage and the save/restore exchange
//!
//! Saving serializes the simulation into an opaque blob and stores it under
//! a key; restoring reads it back and hands it to the simulation. Both run as
//! deferred operations so the input handler never blocks on storage.

use std::collections::HashMap;

use tracing::{error, info};

use crate::error::StorageError;
use crate::sim::Simulation;

/// Key-value store for save blobs.
pub trait Storage {
    fn set(&mut self, key: &str, blob: &str) -> Result<(), StorageError>;

    /// `Ok(None)` when nothing is stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
}

/// Keys end up as file names, so keep them boring.
pub fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key.len() <= 64
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}

/// Storage that lives as long as the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Storage for MemoryStorage {
    fn set(&mut self, key: &str, blob: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        self.entries.insert(key.to_string(), blob.to_string());
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        validate_key(key)?;
        Ok(self.entries.get(key).cloned())
    }
}

/// A queued storage exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageOp {
    Save,
    Restore,
}

impl StorageOp {
    /// Run the exchange. A successful restore means the map has to be
    /// fetched again.
    pub fn run<S, T>(self, sim: &mut S, storage: &mut T, key: &str) -> Result<(), StorageError>
    where
        S: Simulation + ?Sized,
        T: Storage + ?Sized,
    {
        match self {
            StorageOp::Save => {
                let blob = sim.save();
                storage.set(key, &blob)?;
                info!(key, bytes = blob.len(), "game saved");
            }
            StorageOp::Restore => {
                let blob = storage
                    .get(key)?
                    .ok_or_else(|| StorageError::NotFound(key.to_string()))?;
                sim.load(&blob).map_err(StorageError::Rejected)?;
                info!(key, bytes = blob.len(), "game restored");
            }
        }
        Ok(())
    }

    /// Line for the message log once the exchange finished.
    pub fn report(self, result: &Result<(), StorageError>) -> String {
        match (self, result) {
            (StorageOp::Save, Ok(())) => "Game saved.".to_string(),
            (StorageOp::Restore, Ok(())) => "Game restored.".to_string(),
            (op, Err(err)) => {
                error!(?op, %err, "storage operation failed");
                match op {
                    StorageOp::Save => format!("Save failed: {err}"),
                    StorageOp::Restore => format!("Restore failed: {err}"),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Call, FakeSim};

    #[test]
    fn test_validate_key() {
        assert!(validate_key("neon_twilight-1").is_ok());
        assert!(matches!(validate_key(""), Err(StorageError::InvalidKey(_))));
        assert!(matches!(validate_key("../etc"), Err(StorageError::InvalidKey(_))));
        assert!(matches!(validate_key("a b"), Err(StorageError::InvalidKey(_))));
    }

    #[test]
    fn test_memory_storage() {
        let mut store = MemoryStorage::new();
        assert_eq!(store.get("slot").unwrap(), None);
        store.set("slot", "blob").unwrap();
        assert_eq!(store.get("slot").unwrap().as_deref(), Some("blob"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_save_then_restore() {
        let mut sim = FakeSim::new(2, 2);
        sim.blob = "state-1".into();
        let mut store = MemoryStorage::new();

        StorageOp::Save.run(&mut sim, &mut store, "game").unwrap();
        sim.blob = "changed".into();
        StorageOp::Restore.run(&mut sim, &mut store, "game").unwrap();

        assert_eq!(sim.blob, "state-1");
        assert_eq!(sim.calls, vec![Call::Load("state-1".into())]);
    }

    #[test]
    fn test_restore_missing_key() {
        let mut sim = FakeSim::new(2, 2);
        let mut store = MemoryStorage::new();
        let result = StorageOp::Restore.run(&mut sim, &mut store, "game");
        assert!(matches!(result, Err(StorageError::NotFound(ref k)) if k == "game"));
        assert!(sim.calls.is_empty());
    }

    #[test]
    fn test_restore_rejected_blob() {
        let mut sim = FakeSim::new(2, 2);
        let mut store = MemoryStorage::new();
        store.set("game", "").unwrap();
        let result = StorageOp::Restore.run(&mut sim, &mut store, "game");
        assert!(matches!(result, Err(StorageError::Rejected(_))));
    }

    #[test]
    fn test_report() {
        assert_eq!(StorageOp::Save.report(&Ok(())), "Game saved.");
        let err = Err(StorageError::NotFound("game".into()));
        assert_eq!(
            StorageOp::Restore.report(&err),
            "Restore failed: No saved game under key 'game'"
        );
    }
}
