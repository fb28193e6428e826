//! Error types raised by the rotation engine.

use thiserror::Error;

use super::person::PersonId;

/// Errors surfaced by engine operations.
///
/// Only commands with a real precondition fail. Removals and clears that
/// find nothing to do report that through their return value instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RotationError {
    #[error("not enough players to start a match")]
    InsufficientPlayers,

    #[error("no match in progress")]
    NoMatchInProgress,

    #[error("consecutive-win cap must be at least 1, got {0}")]
    InvalidCap(u32),

    #[error("table slot must be 1 or 2, got {0}")]
    InvalidSlot(u8),

    #[error("person {0} appears in more than one place")]
    DuplicatePerson(PersonId),
}

pub type Result<T> = std::result::Result<T, RotationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            RotationError::InsufficientPlayers.to_string(),
            "not enough players to start a match"
        );
        assert_eq!(
            RotationError::InvalidCap(0).to_string(),
            "consecutive-win cap must be at least 1, got 0"
        );
        assert_eq!(
            RotationError::DuplicatePerson(PersonId::new("a")).to_string(),
            "person a appears in more than one place"
        );
    }
}
