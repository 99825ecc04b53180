//! Domain model for the website-build task lifecycle.
//!
//! The domain owns the status enum, the transition table, intake form
//! validation, and timestamp and note stamping. It performs no I/O; time is
//! read from an injected [`mockable::Clock`].

mod actor;
mod catalog;
mod developer;
mod error;
mod form;
mod ids;
mod status;
mod task;

pub use actor::{Actor, ActorRole};
pub use catalog::{Platform, RequestType};
pub use developer::Developer;
pub use error::{
    FormField, InvalidFields, ParsePlatformError, ParseRequestTypeError, ParseTaskStatusError,
    TaskDomainError,
};
pub use form::{TaskForm, ValidatedTaskForm};
pub use ids::{DeveloperId, PageCount, TaskId};
pub use status::{StageEffect, TaskStatus, TransitionRule};
pub use task::{PersistedTaskData, QcReview, Task, TaskVersion};
