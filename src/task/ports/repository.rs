//! Repository port for task persistence and lookup.

use crate::task::domain::{Task, TaskId, TaskVersion};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the task ID
    /// already exists.
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Replaces a stored task, provided its persisted version still equals
    /// `expected`.
    ///
    /// The version check and the write happen atomically, so of two racing
    /// transitions on the same task only one is applied. Comparing the
    /// revision as well as the status also rejects a stale write after the
    /// task has gone round the rework loop back to the same status.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist, or [`TaskRepositoryError::VersionConflict`] when another writer
    /// changed the task first.
    async fn update(&self, task: &Task, expected: TaskVersion) -> TaskRepositoryResult<()>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns every task, newest first.
    async fn list(&self) -> TaskRepositoryResult<Vec<Task>>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The persisted version no longer matches the version the update was
    /// computed from.
    #[error("task {task_id} changed concurrently: expected {expected}, found {actual}")]
    VersionConflict {
        /// Task being updated.
        task_id: TaskId,
        /// Version the caller read before updating.
        expected: TaskVersion,
        /// Version currently persisted.
        actual: TaskVersion,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
