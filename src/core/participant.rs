use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Display name identifying a member of an expense group.
///
/// Names are the join key throughout the engine: expenses reference their
/// payer and the people they cover by name, and balances and settlements
/// are reported per name.
///
/// # Examples
///
/// ```
/// use divvy_engine::core::participant::ParticipantName;
///
/// let alice = ParticipantName::new("Alice");
/// let bob = ParticipantName::new("Bob");
/// assert_ne!(alice, bob);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantName(String);

impl ParticipantName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the string representation of this name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParticipantName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ParticipantName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ParticipantName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A member of an expense group.
///
/// Participants are immutable once created. The engine matches expenses to
/// participants by [`ParticipantName`]; the id exists so that renames and
/// external references stay possible at the application layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    /// Unique identifier for this participant.
    id: Uuid,
    /// Display name, unique within a group.
    name: ParticipantName,
}

impl Participant {
    /// Create a new participant with a freshly generated id.
    pub fn new(name: ParticipantName) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
        }
    }

    /// Create a participant with a specific id (useful for testing / determinism).
    pub fn with_id(id: Uuid, name: ParticipantName) -> Self {
        Self { id, name }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &ParticipantName {
        &self.name
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
