//! In-memory storage for tests and throwaway sessions.

use std::sync::RwLock;

use super::adapter::StorageAdapter;
use super::error::{Result, StorageError};
use crate::snapshot::Snapshot;

/// Keeps the latest snapshot in memory.
#[derive(Debug, Default)]
pub struct InMemoryStorage {
    snapshot: RwLock<Option<Snapshot>>,
    saves: RwLock<u64>,
}

impl InMemoryStorage {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds a snapshot.
    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        Self {
            snapshot: RwLock::new(Some(snapshot)),
            saves: RwLock::new(0),
        }
    }

    /// Number of successful saves, for asserting persistence behaviour.
    pub fn save_count(&self) -> Result<u64> {
        let saves = self.saves.read().map_err(|_| StorageError::LockPoisoned)?;
        Ok(*saves)
    }
}

impl StorageAdapter for InMemoryStorage {
    fn load(&self) -> Result<Snapshot> {
        let snapshot = self
            .snapshot
            .read()
            .map_err(|_| StorageError::LockPoisoned)?;
        Ok(snapshot.clone().unwrap_or_default())
    }

    fn save(&self, snapshot: &Snapshot) -> Result<()> {
        let mut stored = self
            .snapshot
            .write()
            .map_err(|_| StorageError::LockPoisoned)?;
        *stored = Some(snapshot.clone());

        let mut saves = self.saves.write().map_err(|_| StorageError::LockPoisoned)?;
        *saves += 1;
        Ok(())
    }
}
