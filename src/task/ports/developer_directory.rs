//! Port for the developer reference list.

use crate::task::domain::Developer;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for developer directory operations.
pub type DeveloperDirectoryResult<T> = Result<T, DeveloperDirectoryError>;

/// Source of developers that tasks can be assigned to.
#[async_trait]
pub trait DeveloperDirectory: Send + Sync {
    /// Returns every developer, ordered by name.
    async fn list_developers(&self) -> DeveloperDirectoryResult<Vec<Developer>>;
}

/// Errors returned by developer directory implementations.
#[derive(Debug, Clone, Error)]
pub enum DeveloperDirectoryError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl DeveloperDirectoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
