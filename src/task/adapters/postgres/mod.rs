//! `PostgreSQL` adapters for task lifecycle persistence.
//!
//! The matching DDL lives in `migrations/`.

mod developer;
mod models;
mod repository;
mod schema;

pub use developer::PostgresDeveloperDirectory;
pub use repository::{PostgresTaskRepository, TaskPgPool};
