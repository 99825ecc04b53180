//! Error types for task domain validation, transitions, and parsing.

use super::{ActorRole, TaskId, TaskStatus};
use std::fmt;
use thiserror::Error;

/// Intake form field, named as it appears on the wire.
///
/// Variants are declared in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FormField {
    /// `jobName`.
    JobName,
    /// `siteId`.
    SiteId,
    /// `platform`.
    Platform,
    /// `developer`.
    Developer,
    /// `typeOfRequest`.
    TypeOfRequest,
    /// `numberOfPages`.
    NumberOfPages,
    /// `salesforceLink`.
    SalesforceLink,
    /// `comments`.
    Comments,
}

impl FormField {
    /// Returns the field name used by the intake form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::JobName => "jobName",
            Self::SiteId => "siteId",
            Self::Platform => "platform",
            Self::Developer => "developer",
            Self::TypeOfRequest => "typeOfRequest",
            Self::NumberOfPages => "numberOfPages",
            Self::SalesforceLink => "salesforceLink",
            Self::Comments => "comments",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Offending fields of a rejected intake form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InvalidFields(Vec<FormField>);

impl InvalidFields {
    /// Wraps a list of offending fields.
    #[must_use]
    pub const fn new(fields: Vec<FormField>) -> Self {
        Self(fields)
    }

    /// Returns the offending fields in form order.
    #[must_use]
    pub fn fields(&self) -> &[FormField] {
        &self.0
    }

    /// Adds `field` unless already present, keeping form order.
    #[must_use]
    pub fn with(mut self, field: FormField) -> Self {
        if !self.0.contains(&field) {
            self.0.push(field);
            self.0.sort_unstable();
        }
        self
    }

    /// Returns `true` when `field` is among the offending fields.
    #[must_use]
    pub fn contains(&self, field: FormField) -> bool {
        self.0.contains(&field)
    }
}

impl fmt::Display for InvalidFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.0.iter().map(|field| field.as_str()).collect();
        f.write_str(&names.join(", "))
    }
}

/// Errors returned by task creation and lifecycle transitions.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// One or more intake form fields are missing or invalid.
    #[error("invalid task form, check field(s): {0}")]
    Validation(InvalidFields),

    /// Only admins may create tasks.
    #[error("role {0} may not create tasks")]
    CreationNotPermitted(ActorRole),

    /// The requested status is not reachable from the current status.
    #[error("invalid status transition for task {task_id}: {from} -> {to}")]
    InvalidTransition {
        /// Task whose transition was rejected.
        task_id: TaskId,
        /// Current status.
        from: TaskStatus,
        /// Requested status.
        to: TaskStatus,
    },

    /// The edge exists but belongs to another role.
    #[error("role {role} may not move task {task_id} from {from} to {to}")]
    TransitionNotPermitted {
        /// Task whose transition was rejected.
        task_id: TaskId,
        /// Role of the acting identity.
        role: ActorRole,
        /// Current status.
        from: TaskStatus,
        /// Requested status.
        to: TaskStatus,
    },

    /// A developer tried to move a task assigned to someone else.
    #[error("task {task_id} is assigned to '{assigned}', not '{actor}'")]
    NotAssignedDeveloper {
        /// Task whose transition was rejected.
        task_id: TaskId,
        /// Developer recorded on the task.
        assigned: String,
        /// Developer who attempted the transition.
        actor: String,
    },

    /// A note was supplied to a transition that records none.
    #[error("transition of task {task_id} to {to} does not accept a note")]
    NoteNotAccepted {
        /// Task whose transition was rejected.
        task_id: TaskId,
        /// Requested status.
        to: TaskStatus,
    },

    /// A rebuilt task records timestamps out of workflow order.
    #[error("task {0} has timestamps out of workflow order")]
    TimelineOutOfOrder(TaskId),

    /// A note exceeds the configured length limit.
    #[error("note has {actual} characters, limit is {max}")]
    NoteTooLong {
        /// Configured limit in characters.
        max: usize,
        /// Length of the supplied note in characters.
        actual: usize,
    },
}

/// Error returned while parsing task statuses.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing platforms.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown platform: {0}")]
pub struct ParsePlatformError(pub String);

/// Error returned while parsing request types.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown request type: {0}")]
pub struct ParseRequestTypeError(pub String);
