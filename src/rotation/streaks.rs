//! Consecutive-win counters.
//!
//! Entries can outlive the person they describe (a loser's zeroed entry,
//! for instance). Readers treat a missing entry as zero.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;

use crate::core::PersonId;

/// Map from person id to consecutive wins.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StreakMap {
    counts: FxHashMap<PersonId, u32>,
}

impl StreakMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current streak, zero when absent.
    #[must_use]
    pub fn get(&self, id: &PersonId) -> u32 {
        self.counts.get(id).copied().unwrap_or(0)
    }

    /// Count one more win and return the new streak.
    pub fn record_win(&mut self, id: &PersonId) -> u32 {
        let count = self.counts.entry(id.clone()).or_insert(0);
        *count = count.saturating_add(1);
        *count
    }

    /// Set the streak to zero, keeping the entry.
    pub fn reset(&mut self, id: &PersonId) {
        self.counts.insert(id.clone(), 0);
    }

    /// Drop the entry entirely.
    pub fn remove(&mut self, id: &PersonId) -> Option<u32> {
        self.counts.remove(id)
    }

    /// Keep only entries whose id satisfies `keep`.
    pub fn retain(&mut self, mut keep: impl FnMut(&PersonId) -> bool) {
        self.counts.retain(|id, _| keep(id));
    }

    pub fn clear(&mut self) {
        self.counts.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: &PersonId) -> bool {
        self.counts.contains_key(id)
    }

    /// Iterate in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&PersonId, u32)> + '_ {
        self.counts.iter().map(|(id, &n)| (id, n))
    }

    /// Ordered copy for serialization.
    #[must_use]
    pub fn to_sorted(&self) -> BTreeMap<PersonId, u32> {
        self.counts.iter().map(|(id, &n)| (id.clone(), n)).collect()
    }
}

impl FromIterator<(PersonId, u32)> for StreakMap {
    fn from_iter<I: IntoIterator<Item = (PersonId, u32)>>(iter: I) -> Self {
        Self {
            counts: iter.into_iter().collect(),
        }
    }
}
