//! # table-rotation
//!
//! Fair rotation of players through a single shared table, drawn from a
//! waiting line, with a cap on consecutive wins so nobody holds the table
//! forever.
//!
//! ## Design Principles
//!
//! 1. **Engine Owns State**: `RotationEngine` is a plain owned value. There
//!    is no global instance; the caller constructs one and threads it
//!    through.
//!
//! 2. **Identity by Id**: people are compared by `PersonId` everywhere.
//!    Names are display text and may repeat.
//!
//! 3. **All or Nothing**: a command either applies fully or fails with the
//!    state untouched. "Nothing to do" is a `false`/`0` result, not an error.
//!
//! ## Architecture
//!
//! - **Snapshots at the Boundary**: the engine performs no I/O. Storage
//!   sees only `Snapshot` values, produced by `export_snapshot` and
//!   consumed by `import_snapshot`.
//!
//! - **Persist After Apply**: `Session` saves a fresh snapshot after each
//!   successful command and never after a failed one.
//!
//! ## Modules
//!
//! - `core`: Person ids, id generation, configuration, engine errors
//! - `rotation`: Waiting line, table, streaks, the engine
//! - `snapshot`: Serializable state projection
//! - `storage`: `StorageAdapter` contract, in-memory and file backends
//! - `session`: Engine + storage glue for front ends

pub mod core;
pub mod rotation;
pub mod snapshot;
pub mod storage;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    IdGenerator, Person, PersonId, RotationConfig, RotationError, DEFAULT_CAP,
};

pub use crate::rotation::{MatchOutcome, RotationEngine, Slot, StreakMap, Table, WaitingLine};

pub use crate::snapshot::{QueueEntry, SeatEntry, Snapshot, SNAPSHOT_VERSION};

pub use crate::storage::{Codec, FileStorage, InMemoryStorage, StorageAdapter, StorageError};

pub use crate::session::{Session, SessionError, SharedSession};
