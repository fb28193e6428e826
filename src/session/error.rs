//! Errors surfaced to the presentation layer.

use thiserror::Error;

use crate::core::RotationError;
use crate::storage::StorageError;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Rotation(#[from] RotationError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("name must not be empty")]
    EmptyName,

    #[error("session lock was poisoned")]
    LockPoisoned,
}

pub type Result<T> = std::result::Result<T, SessionError>;
