//! In-memory developer directory.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::Developer,
    ports::{DeveloperDirectory, DeveloperDirectoryError, DeveloperDirectoryResult},
};

/// Thread-safe in-memory developer directory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDeveloperDirectory {
    developers: Arc<RwLock<Vec<Developer>>>,
}

impl InMemoryDeveloperDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a directory seeded with the given developers.
    #[must_use]
    pub fn with_developers(developers: impl IntoIterator<Item = Developer>) -> Self {
        Self {
            developers: Arc::new(RwLock::new(developers.into_iter().collect())),
        }
    }

    /// Adds a developer to the directory.
    ///
    /// # Errors
    ///
    /// Returns [`DeveloperDirectoryError::Persistence`] if the lock is
    /// poisoned.
    pub fn register(&self, developer: Developer) -> DeveloperDirectoryResult<()> {
        let mut developers = self.developers.write().map_err(|err| {
            DeveloperDirectoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        developers.push(developer);
        Ok(())
    }
}

#[async_trait]
impl DeveloperDirectory for InMemoryDeveloperDirectory {
    async fn list_developers(&self) -> DeveloperDirectoryResult<Vec<Developer>> {
        let developers = self.developers.read().map_err(|err| {
            DeveloperDirectoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let mut listed = developers.clone();
        listed.sort_by(|left, right| left.name().cmp(right.name()));
        Ok(listed)
    }
}
