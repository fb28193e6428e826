//! Core types: participants, ids, configuration, errors.
//!
//! Everything here is plain data. The state machine lives in `rotation`.

pub mod person;
pub mod ids;
pub mod config;
pub mod error;

pub use person::{Person, PersonId};
pub use ids::IdGenerator;
pub use config::{RotationConfig, DEFAULT_CAP, DEFAULT_PLACEHOLDER_NAME};
pub use error::{Result, RotationError};
