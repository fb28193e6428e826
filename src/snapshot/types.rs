//! Snapshot data shapes.
//!
//! Pure data, no behaviour beyond conversions. Seats are optional records
//! rather than pairs of nullable strings: an empty seat is `None`, and a
//! seat with a known id but a lost name is `Some` with `name: None`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::{Person, PersonId, DEFAULT_CAP};

/// Format version written into every snapshot.
pub const SNAPSHOT_VERSION: u32 = 1;

/// One waiting-line entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueEntry {
    pub id: PersonId,
    pub name: String,
}

impl From<&Person> for QueueEntry {
    fn from(person: &Person) -> Self {
        Self {
            id: person.id.clone(),
            name: person.name.clone(),
        }
    }
}

impl From<QueueEntry> for Person {
    fn from(entry: QueueEntry) -> Self {
        Person::new(entry.id, entry.name)
    }
}

/// An occupied seat.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatEntry {
    pub id: PersonId,
    pub name: Option<String>,
}

impl SeatEntry {
    /// Rebuild the seated person, substituting `placeholder` for a missing name.
    #[must_use]
    pub fn into_person(self, placeholder: &str) -> Person {
        let name = self.name.unwrap_or_else(|| placeholder.to_string());
        Person::new(self.id, name)
    }
}

impl From<&Person> for SeatEntry {
    fn from(person: &Person) -> Self {
        Self {
            id: person.id.clone(),
            name: Some(person.name.clone()),
        }
    }
}

/// Full engine state at one point in time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Format version, `SNAPSHOT_VERSION` when written by this crate.
    pub version: u32,

    /// Waiting line, head first.
    #[serde(default)]
    pub queue: Vec<QueueEntry>,

    #[serde(default)]
    pub slot1: Option<SeatEntry>,

    #[serde(default)]
    pub slot2: Option<SeatEntry>,

    /// Consecutive wins by person id.
    #[serde(default)]
    pub streaks: BTreeMap<PersonId, u32>,

    /// Consecutive-win cap.
    #[serde(default = "default_cap")]
    pub cap: u32,
}

fn default_cap() -> u32 {
    DEFAULT_CAP
}

impl Snapshot {
    /// Empty queue, empty table, no streaks, default cap.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// True when nobody is waiting or seated.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.queue.is_empty() && self.slot1.is_none() && self.slot2.is_none()
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            queue: Vec::new(),
            slot1: None,
            slot2: None,
            streaks: BTreeMap::new(),
            cap: DEFAULT_CAP,
        }
    }
}
