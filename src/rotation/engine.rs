//! The rotation engine.
//!
//! Owns the waiting line, the table, the streak counters and the cap, and
//! exposes every command and query the presentation layer needs.
//!
//! ## Rules
//!
//! - `join` appends to the tail; `start_match` seats from the head,
//!   slot 1 before slot 2.
//! - After a result the loser goes to the tail with a zeroed streak. The
//!   winner keeps playing from slot 1 unless the win brings their streak
//!   to the cap, in which case they follow the loser to the tail (loser
//!   first, then winner) and the table empties.
//! - Leaving the table for any reason other than winning zeroes the
//!   streak. Leaving the engine entirely drops the streak entry.
//!
//! ## Atomicity
//!
//! Every command either applies fully or returns an error with the state
//! untouched. Commands with nothing to do return `false`/`0`.
//!
//! ```
//! use table_rotation::core::Person;
//! use table_rotation::rotation::{RotationEngine, Slot};
//!
//! let mut engine = RotationEngine::new();
//! engine.join(Person::new("a", "Ana"));
//! engine.join(Person::new("b", "Bia"));
//! engine.join(Person::new("c", "Caio"));
//!
//! engine.start_match().unwrap();
//! let outcome = engine.record_result(Slot::Two).unwrap();
//!
//! assert_eq!(outcome.winner.as_str(), "b");
//! assert_eq!(engine.seat(Slot::One).unwrap().name, "Bia");
//! assert_eq!(engine.seat(Slot::Two).unwrap().name, "Caio");
//! assert_eq!(engine.queue().get(0).unwrap().name, "Ana");
//! ```

use rustc_hash::FxHashSet;
use tracing::{debug, info};

use super::queue::WaitingLine;
use super::streaks::StreakMap;
use super::table::{Slot, Table};
use crate::core::config::validate_cap;
use crate::core::{Person, PersonId, Result, RotationConfig, RotationError};
use crate::snapshot::{QueueEntry, SeatEntry, Snapshot, SNAPSHOT_VERSION};

/// What happened when a result was recorded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchOutcome {
    pub winner: PersonId,
    pub loser: PersonId,

    /// Winner's streak including this win, before any cap reset.
    pub winner_streak: u32,

    /// The win reached the cap and both players left the table.
    pub capped_out: bool,
}

/// Queue, table and streak state machine.
#[derive(Clone, Debug, Default)]
pub struct RotationEngine {
    queue: WaitingLine,
    table: Table,
    streaks: StreakMap,
    config: RotationConfig,
}

impl RotationEngine {
    /// Empty engine with the default cap.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty engine with a validated configuration.
    pub fn with_config(config: RotationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::default()
        })
    }

    // === Queries ===

    /// The waiting line, head first.
    #[must_use]
    pub fn queue(&self) -> &WaitingLine {
        &self.queue
    }

    #[must_use]
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Zero-based queue position of an id.
    #[must_use]
    pub fn find_in_queue(&self, id: &PersonId) -> Option<usize> {
        self.queue.position(id)
    }

    #[must_use]
    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Occupant of a seat.
    #[must_use]
    pub fn seat(&self, slot: Slot) -> Option<&Person> {
        self.table.get(slot)
    }

    /// Both seats occupied, so a result can be recorded.
    #[must_use]
    pub fn is_match_in_progress(&self) -> bool {
        self.table.is_full()
    }

    /// Current streak for an id, zero when unknown.
    #[must_use]
    pub fn streak(&self, id: &PersonId) -> u32 {
        self.streaks.get(id)
    }

    #[must_use]
    pub fn streaks(&self) -> &StreakMap {
        &self.streaks
    }

    #[must_use]
    pub fn cap(&self) -> u32 {
        self.config.cap
    }

    #[must_use]
    pub fn config(&self) -> &RotationConfig {
        &self.config
    }

    /// Change the consecutive-win cap. Existing streaks are kept; a streak
    /// already above a lowered cap takes effect on that player's next win.
    pub fn set_cap(&mut self, cap: u32) -> Result<()> {
        validate_cap(cap)?;
        debug!(old = self.config.cap, new = cap, "cap changed");
        self.config.cap = cap;
        Ok(())
    }

    // === Commands ===

    /// Add someone to the tail of the line.
    pub fn join(&mut self, person: Person) {
        debug!(id = %person.id, name = %person.name, "joined line");
        self.queue.push_back(person);
    }

    /// Fill empty seats from the head of the line.
    ///
    /// Fails with `InsufficientPlayers`, leaving everything in place, when
    /// the line cannot cover the empty seats.
    pub fn start_match(&mut self) -> Result<()> {
        let needed = 2 - self.table.occupied_count();
        if needed == 0 {
            return Ok(());
        }
        if self.queue.len() < needed {
            return Err(RotationError::InsufficientPlayers);
        }

        for slot in Slot::ALL {
            if !self.table.is_occupied(slot) {
                let next = self.queue.pop_front();
                self.table.seat(slot, next);
            }
        }
        debug!(waiting = self.queue.len(), "match started");
        Ok(())
    }

    /// Record the winner of the current match and rotate.
    pub fn record_result(&mut self, winner_slot: Slot) -> Result<MatchOutcome> {
        let loser_slot = winner_slot.other();
        let (winner, loser) = match (self.table.take(winner_slot), self.table.take(loser_slot)) {
            (Some(winner), Some(loser)) => (winner, loser),
            (winner, loser) => {
                self.table.seat(winner_slot, winner);
                self.table.seat(loser_slot, loser);
                return Err(RotationError::NoMatchInProgress);
            }
        };

        let winner_streak = self.streaks.record_win(&winner.id);
        self.streaks.reset(&loser.id);

        let outcome = MatchOutcome {
            winner: winner.id.clone(),
            loser: loser.id.clone(),
            winner_streak,
            capped_out: winner_streak >= self.config.cap,
        };

        self.queue.push_back(loser);

        if outcome.capped_out {
            self.streaks.reset(&winner.id);
            self.queue.push_back(winner);
            info!(
                winner = %outcome.winner,
                streak = winner_streak,
                cap = self.config.cap,
                "cap reached, table cleared"
            );
        } else {
            self.table.seat(Slot::One, Some(winner));
            let challenger = self.queue.pop_front();
            self.table.seat(Slot::Two, challenger);
            debug!(
                winner = %outcome.winner,
                loser = %outcome.loser,
                streak = winner_streak,
                "result recorded"
            );
        }

        Ok(outcome)
    }

    /// Send a seated player to the tail of the line with a zeroed streak.
    ///
    /// Returns `false` when the seat was already empty.
    pub fn remove_from_table(&mut self, slot: Slot) -> bool {
        let Some(person) = self.table.take(slot) else {
            return false;
        };
        debug!(%slot, id = %person.id, "left table");
        self.streaks.reset(&person.id);
        self.queue.push_back(person);
        true
    }

    /// Send both players to the tail of the line, slot 1 first.
    ///
    /// Returns how many people moved.
    pub fn clear_table(&mut self) -> usize {
        Slot::ALL
            .into_iter()
            .filter(|&slot| self.remove_from_table(slot))
            .count()
    }

    /// Empty the line. Streaks survive only for seated players.
    ///
    /// Returns how many people were removed.
    pub fn clear_queue(&mut self) -> usize {
        let removed = self.queue.drain().len();
        let table = &self.table;
        self.streaks.retain(|id| table.slot_of(id).is_some());
        debug!(removed, "line cleared");
        removed
    }

    /// Drop everyone and every streak.
    pub fn clear_all(&mut self) {
        self.clear_table();
        self.clear_queue();
        self.streaks.clear();
        debug!("everything cleared");
    }

    /// Remove queue entries with this id. Seats are not touched.
    pub fn remove_by_id(&mut self, id: &PersonId) -> bool {
        let removed = self.queue.remove_where(|p| &p.id == id);
        if removed.is_empty() {
            return false;
        }
        self.streaks.remove(id);
        debug!(%id, "removed from line");
        true
    }

    /// Remove every queue entry whose trimmed name matches, ignoring case.
    /// Seats are not touched.
    pub fn remove_by_name(&mut self, name: &str) -> usize {
        let removed = self.queue.remove_where(|p| p.name_matches(name));
        for person in &removed {
            self.streaks.remove(&person.id);
        }
        debug!(name = name.trim(), count = removed.len(), "removed by name");
        removed.len()
    }

    /// Remove the queue entry at a zero-based position.
    ///
    /// Negative or out-of-range indexes return `false`.
    pub fn remove_by_index(&mut self, index: i64) -> bool {
        let Ok(index) = usize::try_from(index) else {
            return false;
        };
        let Some(person) = self.queue.remove_at(index) else {
            return false;
        };
        self.streaks.remove(&person.id);
        debug!(index, id = %person.id, "removed by position");
        true
    }

    /// Remove a person wherever they are.
    ///
    /// A seated person leaves the table exactly as with `remove_from_table`;
    /// anyone else is removed from the line by id.
    pub fn remove_person(&mut self, person: &Person) -> bool {
        match self.table.slot_of(&person.id) {
            Some(slot) => self.remove_from_table(slot),
            None => self.remove_by_id(&person.id),
        }
    }

    // === Snapshots ===

    /// Copy the full state into a serializable snapshot.
    #[must_use]
    pub fn export_snapshot(&self) -> Snapshot {
        Snapshot {
            version: SNAPSHOT_VERSION,
            queue: self.queue.iter().map(QueueEntry::from).collect(),
            slot1: self.table.get(Slot::One).map(SeatEntry::from),
            slot2: self.table.get(Slot::Two).map(SeatEntry::from),
            streaks: self.streaks.to_sorted(),
            cap: self.config.cap,
        }
    }

    /// Replace the full state from a snapshot.
    ///
    /// The snapshot is trusted as-is; call `check_invariants` afterwards to
    /// detect a corrupted one.
    pub fn import_snapshot(&mut self, snapshot: Snapshot) {
        let placeholder = self.config.placeholder_name.as_str();

        let mut table = Table::new();
        table.seat(Slot::One, snapshot.slot1.map(|s| s.into_person(placeholder)));
        table.seat(Slot::Two, snapshot.slot2.map(|s| s.into_person(placeholder)));

        self.table = table;
        self.queue = snapshot.queue.into_iter().map(Person::from).collect();
        self.streaks = snapshot.streaks.into_iter().collect();
        self.config.cap = snapshot.cap;

        debug!(
            waiting = self.queue.len(),
            seated = self.table.occupied_count(),
            cap = self.config.cap,
            "snapshot imported"
        );
    }

    /// Check that nobody appears twice across the line and the seats.
    pub fn check_invariants(&self) -> Result<()> {
        let mut seen = FxHashSet::default();
        let seated = self.table.occupants().into_iter().map(|(_, p)| p);

        for person in seated.chain(self.queue.iter()) {
            if !seen.insert(&person.id) {
                return Err(RotationError::DuplicatePerson(person.id.clone()));
            }
        }
        Ok(())
    }
}
