//! The two-seat table.
//!
//! `Slot` names a seat; `Table` holds the optional occupant of each.
//! Seat 1 is the "winner's chair": a player who wins and stays is always
//! moved there.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Person, PersonId, RotationError};

/// One of the two table positions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Slot {
    One,
    Two,
}

impl Slot {
    /// Both slots in fill order.
    pub const ALL: [Slot; 2] = [Slot::One, Slot::Two];

    /// 1-based seat number.
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Slot::One => 1,
            Slot::Two => 2,
        }
    }

    /// The opposing seat.
    #[must_use]
    pub const fn other(self) -> Slot {
        match self {
            Slot::One => Slot::Two,
            Slot::Two => Slot::One,
        }
    }
}

impl TryFrom<u8> for Slot {
    type Error = RotationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Slot::One),
            2 => Ok(Slot::Two),
            other => Err(RotationError::InvalidSlot(other)),
        }
    }
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "P{}", self.number())
    }
}

/// Seat occupancy.
#[derive(Clone, Debug, Default)]
pub struct Table {
    slot1: Option<Person>,
    slot2: Option<Person>,
}

impl Table {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Occupant of a slot.
    #[must_use]
    pub fn get(&self, slot: Slot) -> Option<&Person> {
        match slot {
            Slot::One => self.slot1.as_ref(),
            Slot::Two => self.slot2.as_ref(),
        }
    }

    fn cell(&mut self, slot: Slot) -> &mut Option<Person> {
        match slot {
            Slot::One => &mut self.slot1,
            Slot::Two => &mut self.slot2,
        }
    }

    /// Put someone in a slot, returning whoever was there.
    pub fn seat(&mut self, slot: Slot, person: Option<Person>) -> Option<Person> {
        std::mem::replace(self.cell(slot), person)
    }

    /// Empty a slot, returning its occupant.
    pub fn take(&mut self, slot: Slot) -> Option<Person> {
        self.cell(slot).take()
    }

    #[must_use]
    pub fn is_occupied(&self, slot: Slot) -> bool {
        self.get(slot).is_some()
    }

    /// Both seats taken.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.slot1.is_some() && self.slot2.is_some()
    }

    /// Nobody seated.
    #[must_use]
    pub fn is_vacant(&self) -> bool {
        self.slot1.is_none() && self.slot2.is_none()
    }

    /// Number of occupied seats.
    #[must_use]
    pub fn occupied_count(&self) -> usize {
        usize::from(self.slot1.is_some()) + usize::from(self.slot2.is_some())
    }

    /// Which slot holds this id, if any.
    #[must_use]
    pub fn slot_of(&self, id: &PersonId) -> Option<Slot> {
        Slot::ALL
            .into_iter()
            .find(|&slot| self.get(slot).is_some_and(|p| &p.id == id))
    }

    /// Occupants in slot order.
    #[must_use]
    pub fn occupants(&self) -> SmallVec<[(Slot, &Person); 2]> {
        Slot::ALL
            .into_iter()
            .filter_map(|slot| self.get(slot).map(|p| (slot, p)))
            .collect()
    }
}
