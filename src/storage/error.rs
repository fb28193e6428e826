//! Error types raised by storage adapters.

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage unavailable at {path}: {source}")]
    Unavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("unsupported snapshot version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error("storage lock was poisoned")]
    LockPoisoned,
}

pub type Result<T> = std::result::Result<T, StorageError>;
