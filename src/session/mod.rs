//! Session layer used by front ends.
//!
//! Binds an engine to a `StorageAdapter`, assigns ids to newcomers and
//! saves after every successful command.

pub mod error;
pub mod controller;

pub use error::{Result, SessionError};
pub use controller::{Session, SharedSession};
