//! Participant identification.
//!
//! ## PersonId
//!
//! Opaque identifier assigned when someone joins the line. It is stable
//! across sessions and is the only thing the engine compares.
//!
//! ## Person
//!
//! A participant record: id plus display name. Two `Person` values are
//! equal when their ids are equal, whatever their names say.
//!
//! ```
//! use table_rotation::core::{Person, PersonId};
//!
//! let a = Person::new("p-1", "Ana");
//! let renamed = Person::new("p-1", "Ana Maria");
//!
//! assert_eq!(a, renamed);
//! assert_eq!(a.id, PersonId::new("p-1"));
//! ```

use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// Unique, opaque participant identifier.
///
/// Serializes as a bare string so snapshots stay readable and streak maps
/// can key on it directly.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(String);

impl PersonId {
    /// Create an id from any string-like value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw id.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the id, returning the raw string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl From<&str> for PersonId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for PersonId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for PersonId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A participant waiting for, or playing at, the table.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Person {
    /// Stable identity.
    pub id: PersonId,

    /// Display name. Not unique.
    pub name: String,
}

impl Person {
    /// Create a new person record.
    pub fn new(id: impl Into<PersonId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Case-insensitive, whitespace-trimmed name comparison.
    ///
    /// ```
    /// use table_rotation::core::Person;
    ///
    /// let p = Person::new("x", " Ana ");
    /// assert!(p.name_matches("ana"));
    /// assert!(p.name_matches("  ANA"));
    /// assert!(!p.name_matches("an"));
    /// ```
    #[must_use]
    pub fn name_matches(&self, name: &str) -> bool {
        self.name
            .trim()
            .chars()
            .flat_map(char::to_lowercase)
            .eq(name.trim().chars().flat_map(char::to_lowercase))
    }
}

impl PartialEq for Person {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Person {}

impl Hash for Person {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl std::fmt::Display for Person {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}
