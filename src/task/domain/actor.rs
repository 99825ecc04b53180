//! Acting identities passed explicitly into every lifecycle operation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Role an actor plays in the workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorRole {
    /// Creates task requests.
    Admin,
    /// Implements requested work.
    Developer,
    /// Reviews delivered work.
    QualityControl,
}

impl ActorRole {
    /// Returns the canonical representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Developer => "developer",
            Self::QualityControl => "quality_control",
        }
    }
}

impl fmt::Display for ActorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The identity performing an operation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum Actor {
    /// An administrator.
    Admin,
    /// A named developer.
    Developer {
        /// Developer name as recorded on assigned tasks.
        name: String,
    },
    /// A QC reviewer.
    QualityControl,
}

impl Actor {
    /// Creates a developer actor.
    #[must_use]
    pub fn developer(name: impl Into<String>) -> Self {
        Self::Developer { name: name.into() }
    }

    /// Returns the role this actor plays.
    #[must_use]
    pub const fn role(&self) -> ActorRole {
        match self {
            Self::Admin => ActorRole::Admin,
            Self::Developer { .. } => ActorRole::Developer,
            Self::QualityControl => ActorRole::QualityControl,
        }
    }

    /// Returns the developer name when the actor is a developer.
    #[must_use]
    pub fn developer_name(&self) -> Option<&str> {
        match self {
            Self::Developer { name } => Some(name.as_str()),
            Self::Admin | Self::QualityControl => None,
        }
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Developer { name } => write!(f, "developer '{name}'"),
            Self::Admin | Self::QualityControl => f.write_str(self.role().as_str()),
        }
    }
}
