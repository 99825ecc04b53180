//! Port contracts for task lifecycle management.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.

pub mod developer_directory;
pub mod repository;

pub use developer_directory::{
    DeveloperDirectory, DeveloperDirectoryError, DeveloperDirectoryResult,
};
pub use repository::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};
