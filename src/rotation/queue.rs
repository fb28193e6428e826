//! The waiting line.
//!
//! A FIFO of people backed by `im::Vector`, so exporting a snapshot or
//! cloning the engine shares structure instead of copying every entry.
//! Insertion is always at the tail and dequeueing always at the head;
//! removals keep the relative order of everyone left behind.

use im::Vector;

use crate::core::{Person, PersonId};

/// Ordered line of people waiting for the table.
#[derive(Clone, Debug, Default)]
pub struct WaitingLine {
    entries: Vector<Person>,
}

impl WaitingLine {
    /// Create an empty line.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append to the tail.
    pub fn push_back(&mut self, person: Person) {
        self.entries.push_back(person);
    }

    /// Take the head, if any.
    pub fn pop_front(&mut self) -> Option<Person> {
        self.entries.pop_front()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Person at a zero-based position (0 = head).
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Person> {
        self.entries.get(index)
    }

    /// Iterate from head to tail.
    pub fn iter(&self) -> impl Iterator<Item = &Person> + '_ {
        self.entries.iter()
    }

    /// Position of the first entry with this id.
    #[must_use]
    pub fn position(&self, id: &PersonId) -> Option<usize> {
        self.entries.iter().position(|p| &p.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: &PersonId) -> bool {
        self.position(id).is_some()
    }

    /// Remove the entry at `index`, shifting later entries forward.
    pub fn remove_at(&mut self, index: usize) -> Option<Person> {
        if index >= self.entries.len() {
            return None;
        }
        Some(self.entries.remove(index))
    }

    /// Remove every entry matching `predicate`, returning them head-first.
    pub fn remove_where(&mut self, mut predicate: impl FnMut(&Person) -> bool) -> Vec<Person> {
        let mut removed = Vec::new();
        let mut kept = Vector::new();

        for person in self.entries.iter() {
            if predicate(person) {
                removed.push(person.clone());
            } else {
                kept.push_back(person.clone());
            }
        }

        if !removed.is_empty() {
            self.entries = kept;
        }
        removed
    }

    /// Drop everyone, returning the old contents head-first.
    pub fn drain(&mut self) -> Vec<Person> {
        std::mem::take(&mut self.entries).into_iter().collect()
    }
}

impl FromIterator<Person> for WaitingLine {
    fn from_iter<I: IntoIterator<Item = Person>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
