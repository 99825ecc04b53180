//! Developer reference data offered when assigning a task.

use super::DeveloperId;
use serde::{Deserialize, Serialize};

/// A developer who can be assigned website-build tasks.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Developer {
    id: DeveloperId,
    name: String,
}

impl Developer {
    /// Creates a developer entry with a fresh identifier.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(DeveloperId::new(), name)
    }

    /// Creates a developer entry with a known identifier.
    #[must_use]
    pub fn with_id(id: DeveloperId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Returns the developer identifier.
    #[must_use]
    pub const fn id(&self) -> DeveloperId {
        self.id
    }

    /// Returns the developer name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}
