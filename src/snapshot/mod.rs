//! Serializable projection of engine state.
//!
//! A `Snapshot` is the only thing that crosses the storage boundary. The
//! engine produces one with `export_snapshot` and rebuilds itself from one
//! with `import_snapshot`; storage adapters treat it as opaque data.

pub mod types;

pub use types::{QueueEntry, SeatEntry, Snapshot, SNAPSHOT_VERSION};
