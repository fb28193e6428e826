//! Rotation state machine: waiting line, table, streaks and the engine
//! that ties them together.

pub mod queue;
pub mod table;
pub mod streaks;
pub mod engine;

pub use queue::WaitingLine;
pub use table::{Slot, Table};
pub use streaks::StreakMap;
pub use engine::{MatchOutcome, RotationEngine};
