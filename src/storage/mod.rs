//! Snapshot persistence.
//!
//! `StorageAdapter` is the contract; `InMemoryStorage` and `FileStorage`
//! are the two implementations shipped with the crate.

pub mod error;
pub mod adapter;
pub mod memory;
pub mod file;

pub use error::{Result, StorageError};
pub use adapter::StorageAdapter;
pub use memory::InMemoryStorage;
pub use file::{Codec, FileStorage};
