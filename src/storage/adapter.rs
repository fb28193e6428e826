//! Storage contract.

use super::error::Result;
use crate::snapshot::Snapshot;

/// Loads and saves engine snapshots.
///
/// The engine never calls this itself; the session layer loads once at
/// startup and saves after every successful mutation.
pub trait StorageAdapter: Send + Sync {
    /// Load the persisted snapshot.
    ///
    /// Returns the empty default snapshot when nothing has been saved yet.
    fn load(&self) -> Result<Snapshot>;

    /// Replace the persisted snapshot.
    ///
    /// A concurrent or later `load` must see either the old snapshot or the
    /// new one, never a mix.
    fn save(&self, snapshot: &Snapshot) -> Result<()>;

    /// Blank the persisted waiting line, leaving everything else.
    fn clear_queue(&self) -> Result<()> {
        let mut snapshot = self.load()?;
        snapshot.queue.clear();
        self.save(&snapshot)
    }

    /// Blank the persisted seats, leaving everything else.
    fn clear_table(&self) -> Result<()> {
        let mut snapshot = self.load()?;
        snapshot.slot1 = None;
        snapshot.slot2 = None;
        self.save(&snapshot)
    }
}

impl<S: StorageAdapter + ?Sized> StorageAdapter for Box<S> {
    fn load(&self) -> Result<Snapshot> {
        (**self).load()
    }

    fn save(&self, snapshot: &Snapshot) -> Result<()> {
        (**self).save(snapshot)
    }
}
