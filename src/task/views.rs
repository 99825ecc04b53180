//! Role-specific read surfaces over the task list.
//!
//! Views filter and label tasks for the admin, developer, and QC
//! dashboards. They never change task state; actions they offer are
//! carried out through the lifecycle service.

use crate::task::domain::{ActorRole, Task, TaskStatus};

const DEVELOPER_QUEUE: [TaskStatus; 4] = [
    TaskStatus::Pending,
    TaskStatus::InProgress,
    TaskStatus::DevComplete,
    TaskStatus::QcFailed,
];

const QC_QUEUE: [TaskStatus; 2] = [TaskStatus::DevComplete, TaskStatus::InQc];

/// A dashboard's view of the task list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskView {
    /// Every task.
    Admin,
    /// Open work assigned to the named developer.
    Developer {
        /// Developer whose queue is shown.
        name: String,
    },
    /// Work awaiting or under review.
    QualityControl,
}

impl TaskView {
    /// Creates a developer view.
    #[must_use]
    pub fn developer(name: impl Into<String>) -> Self {
        Self::Developer { name: name.into() }
    }

    /// Returns the role that acts through this view.
    #[must_use]
    pub const fn role(&self) -> ActorRole {
        match self {
            Self::Admin => ActorRole::Admin,
            Self::Developer { .. } => ActorRole::Developer,
            Self::QualityControl => ActorRole::QualityControl,
        }
    }

    /// Returns `true` when the view lists `task`.
    #[must_use]
    pub fn includes(&self, task: &Task) -> bool {
        match self {
            Self::Admin => true,
            Self::Developer { name } => {
                task.is_assigned_to(name) && DEVELOPER_QUEUE.contains(&task.status())
            }
            Self::QualityControl => QC_QUEUE.contains(&task.status()),
        }
    }

    /// Keeps the tasks this view lists, preserving order.
    #[must_use]
    pub fn filter(&self, tasks: Vec<Task>) -> Vec<Task> {
        tasks.into_iter().filter(|task| self.includes(task)).collect()
    }

    /// Returns the statuses this view's role may move `task` to.
    #[must_use]
    pub fn available_actions(&self, task: &Task) -> Vec<TaskStatus> {
        if !self.includes(task) {
            return Vec::new();
        }
        task.status().targets_for(self.role()).collect()
    }
}

/// Display label and badge classes for a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusBadge {
    /// Human-readable label.
    pub label: &'static str,
    /// Badge color classes.
    pub color: &'static str,
}

impl StatusBadge {
    /// Returns the badge for `status`.
    #[must_use]
    pub const fn for_status(status: TaskStatus) -> Self {
        let (label, color) = match status {
            TaskStatus::Pending => ("Pending", "bg-gray-100 text-gray-800"),
            TaskStatus::InProgress => ("In Progress", "bg-blue-100 text-blue-800"),
            TaskStatus::DevComplete => ("Dev Complete", "bg-yellow-100 text-yellow-800"),
            TaskStatus::InQc => ("In QC", "bg-purple-100 text-purple-800"),
            TaskStatus::QcPassed => ("QC Passed", "bg-green-100 text-green-800"),
            TaskStatus::QcFailed => ("QC Failed", "bg-red-100 text-red-800"),
            TaskStatus::Completed => ("Completed", "bg-emerald-100 text-emerald-800"),
        };
        Self { label, color }
    }
}
