//! Student identifier types.

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a student record in the planner.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudentId(Uuid);

impl StudentId {
    /// Generates a random student identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an identifier from an existing UUID, for records whose
    /// identity is fixed (such as seed data).
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Display for StudentId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_as_the_underlying_uuid() {
        let uuid = Uuid::from_u128(1);
        assert_eq!(StudentId::from_uuid(uuid).to_string(), uuid.to_string());
    }

    #[test]
    fn random_ids_are_distinct() {
        assert_ne!(StudentId::random(), StudentId::random());
    }
}
