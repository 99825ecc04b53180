//! In-memory adapter implementations for testing.
//!
//! These adapters provide simple, thread-safe implementations suitable for
//! unit testing without database dependencies.

mod developer;
mod task;

pub use developer::InMemoryDeveloperDirectory;
pub use task::InMemoryTaskRepository;
