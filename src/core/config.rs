//! Engine configuration.
//!
//! The only rule the operator tunes is the consecutive-win cap. The
//! placeholder name fills in seats restored from snapshots that carry an
//! id but no name.

use serde::{Deserialize, Serialize};

use super::error::{Result, RotationError};

/// Default number of consecutive wins before a player must leave the table.
pub const DEFAULT_CAP: u32 = 3;

/// Display name used for restored seats with no recorded name.
pub const DEFAULT_PLACEHOLDER_NAME: &str = "-";

/// Rotation engine configuration.
///
/// ```
/// use table_rotation::core::RotationConfig;
///
/// let config = RotationConfig::new().with_cap(2);
/// assert_eq!(config.cap, 2);
/// assert!(config.validate().is_ok());
/// assert!(RotationConfig::new().with_cap(0).validate().is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotationConfig {
    /// Consecutive wins that force a player back to the queue.
    pub cap: u32,

    /// Name given to restored seats whose snapshot entry has no name.
    pub placeholder_name: String,
}

impl RotationConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the consecutive-win cap.
    #[must_use]
    pub fn with_cap(mut self, cap: u32) -> Self {
        self.cap = cap;
        self
    }

    /// Set the placeholder name for restored seats.
    #[must_use]
    pub fn with_placeholder_name(mut self, name: impl Into<String>) -> Self {
        self.placeholder_name = name.into();
        self
    }

    /// Check that the configuration is usable.
    pub fn validate(&self) -> Result<()> {
        validate_cap(self.cap)
    }
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            cap: DEFAULT_CAP,
            placeholder_name: DEFAULT_PLACEHOLDER_NAME.to_string(),
        }
    }
}

/// A cap of zero would eject every winner, so it is rejected.
pub fn validate_cap(cap: u32) -> Result<()> {
    if cap == 0 {
        return Err(RotationError::InvalidCap(cap));
    }
    Ok(())
}
