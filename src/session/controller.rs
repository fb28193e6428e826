//! Session: engine plus storage with persist-after-apply semantics.
//!
//! Each command runs against the engine first. Only when it succeeds is a
//! fresh snapshot exported and saved; a failed command leaves both the
//! engine and the stored snapshot as they were.

use std::sync::Mutex;

use tracing::{debug, info, warn};

use super::error::{Result, SessionError};
use crate::core::{IdGenerator, Person, PersonId, RotationConfig};
use crate::rotation::{MatchOutcome, RotationEngine, Slot};
use crate::snapshot::Snapshot;
use crate::storage::StorageAdapter;

/// A rotation engine bound to a storage backend.
pub struct Session<S> {
    engine: RotationEngine,
    storage: S,
    ids: IdGenerator,
}

impl<S: StorageAdapter> Session<S> {
    /// Load the stored snapshot with default configuration and random ids.
    pub fn open(storage: S) -> Result<Self> {
        Self::open_with(storage, RotationConfig::default(), IdGenerator::from_entropy())
    }

    /// Load the stored snapshot with explicit configuration and id source.
    ///
    /// The stored cap wins over `config.cap`; the rest of `config` applies.
    pub fn open_with(storage: S, config: RotationConfig, ids: IdGenerator) -> Result<Self> {
        let mut engine = RotationEngine::with_config(config)?;
        let snapshot = storage.load()?;
        if snapshot.is_blank() {
            debug!("no one waiting or seated");
        }
        engine.import_snapshot(snapshot);

        if let Err(e) = engine.check_invariants() {
            warn!("stored snapshot is inconsistent: {}", e);
        }

        info!(
            waiting = engine.queue_len(),
            seated = engine.table().occupied_count(),
            cap = engine.cap(),
            "session opened"
        );

        Ok(Self {
            engine,
            storage,
            ids,
        })
    }

    /// Read-only view for rendering.
    #[must_use]
    pub fn engine(&self) -> &RotationEngine {
        &self.engine
    }

    #[must_use]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Save the current state.
    pub fn persist(&self) -> Result<()> {
        self.storage.save(&self.engine.export_snapshot())?;
        Ok(())
    }

    /// Discard in-memory state and re-read storage.
    pub fn reload(&mut self) -> Result<()> {
        let snapshot = self.storage.load()?;
        self.engine.import_snapshot(snapshot);
        Ok(())
    }

    /// Snapshot of the current in-memory state.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.engine.export_snapshot()
    }

    fn apply<T>(
        &mut self,
        command: impl FnOnce(&mut RotationEngine) -> crate::core::Result<T>,
    ) -> Result<T> {
        // Work on a copy so a failed save leaves the live engine untouched.
        let mut next = self.engine.clone();
        let value = command(&mut next)?;
        self.storage.save(&next.export_snapshot())?;
        self.engine = next;
        Ok(value)
    }

    /// Add a new person to the line under a fresh id.
    ///
    /// The name is trimmed; a blank name is rejected.
    pub fn join(&mut self, name: &str) -> Result<Person> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SessionError::EmptyName);
        }

        let person = Person::new(self.ids.next_id(), name);
        let joined = person.clone();
        self.apply(|engine| {
            engine.join(joined);
            Ok(())
        })?;
        Ok(person)
    }

    pub fn start_match(&mut self) -> Result<()> {
        self.apply(RotationEngine::start_match)
    }

    pub fn record_result(&mut self, winner: Slot) -> Result<MatchOutcome> {
        self.apply(|engine| engine.record_result(winner))
    }

    pub fn clear_table(&mut self) -> Result<usize> {
        self.apply(|engine| Ok(engine.clear_table()))
    }

    pub fn clear_queue(&mut self) -> Result<usize> {
        self.apply(|engine| Ok(engine.clear_queue()))
    }

    pub fn clear_all(&mut self) -> Result<()> {
        self.apply(|engine| {
            engine.clear_all();
            Ok(())
        })
    }

    pub fn remove_from_table(&mut self, slot: Slot) -> Result<bool> {
        self.apply(|engine| Ok(engine.remove_from_table(slot)))
    }

    pub fn remove_by_id(&mut self, id: &PersonId) -> Result<bool> {
        self.apply(|engine| Ok(engine.remove_by_id(id)))
    }

    /// Remove queued people by name. A blank name is rejected rather than
    /// matching blank-named entries.
    pub fn remove_by_name(&mut self, name: &str) -> Result<usize> {
        if name.trim().is_empty() {
            return Err(SessionError::EmptyName);
        }
        self.apply(|engine| Ok(engine.remove_by_name(name)))
    }

    pub fn remove_by_index(&mut self, index: i64) -> Result<bool> {
        self.apply(|engine| Ok(engine.remove_by_index(index)))
    }

    pub fn remove_person(&mut self, person: &Person) -> Result<bool> {
        self.apply(|engine| Ok(engine.remove_person(person)))
    }

    pub fn set_cap(&mut self, cap: u32) -> Result<()> {
        self.apply(|engine| engine.set_cap(cap))
    }
}

/// Thread-safe session handle. One lock guards the whole session, so
/// commands and their saves never interleave.
pub struct SharedSession<S> {
    inner: Mutex<Session<S>>,
}

impl<S: StorageAdapter> SharedSession<S> {
    pub fn new(session: Session<S>) -> Self {
        Self {
            inner: Mutex::new(session),
        }
    }

    /// Run `f` with exclusive access to the session.
    pub fn with<T>(&self, f: impl FnOnce(&mut Session<S>) -> Result<T>) -> Result<T> {
        let mut session = self.inner.lock().map_err(|_| SessionError::LockPoisoned)?;
        f(&mut session)
    }

    /// Snapshot under lock.
    pub fn snapshot(&self) -> Result<Snapshot> {
        self.with(|session| Ok(session.snapshot()))
    }

    pub fn into_inner(self) -> Result<Session<S>> {
        self.inner.into_inner().map_err(|_| SessionError::LockPoisoned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RotationError;
    use crate::storage::InMemoryStorage;

    fn session() -> Session<InMemoryStorage> {
        Session::open_with(InMemoryStorage::new(), RotationConfig::new(), IdGenerator::new(1))
            .unwrap()
    }

    #[test]
    fn test_join_trims_and_persists() {
        let mut s = session();
        let person = s.join("  Ana ").unwrap();

        assert_eq!(person.name, "Ana");
        assert_eq!(s.storage().save_count().unwrap(), 1);
        assert_eq!(s.storage().load().unwrap().queue[0].name, "Ana");
    }

    #[test]
    fn test_join_rejects_blank() {
        let mut s = session();
        assert!(matches!(s.join("   "), Err(SessionError::EmptyName)));
        assert_eq!(s.storage().save_count().unwrap(), 0);
    }

    #[test]
    fn test_failed_command_not_persisted() {
        let mut s = session();
        s.join("Ana").unwrap();

        let err = s.start_match().unwrap_err();
        assert!(matches!(
            err,
            SessionError::Rotation(RotationError::InsufficientPlayers)
        ));
        assert_eq!(s.storage().save_count().unwrap(), 1);
    }

    #[test]
    fn test_set_cap_persists() {
        let mut s = session();
        s.set_cap(2).unwrap();
        assert_eq!(s.storage().load().unwrap().cap, 2);

        assert!(s.set_cap(0).is_err());
        assert_eq!(s.engine().cap(), 2);
    }
}
