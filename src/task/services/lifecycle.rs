//! Service layer for task creation, transitions, and listing.

use super::WorkflowPolicy;
use crate::task::{
    domain::{
        Actor, Developer, FormField, InvalidFields, ParseTaskStatusError, Task, TaskDomainError,
        TaskForm, TaskId, TaskStatus,
    },
    ports::{DeveloperDirectory, DeveloperDirectoryError, TaskRepository, TaskRepositoryError},
    views::TaskView,
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for moving a task to a new status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionTaskRequest {
    task_id: TaskId,
    target_status: String,
    actor: Actor,
    note: Option<String>,
}

impl TransitionTaskRequest {
    /// Creates a request without a note.
    #[must_use]
    pub fn new(task_id: TaskId, target_status: impl Into<String>, actor: Actor) -> Self {
        Self {
            task_id,
            target_status: target_status.into(),
            actor,
            note: None,
        }
    }

    /// Attaches a note to the transition.
    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Domain validation or transition rule failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(TaskRepositoryError),
    /// Developer directory lookup failed.
    #[error(transparent)]
    Directory(#[from] DeveloperDirectoryError),
    /// The requested status string is not a known status.
    #[error(transparent)]
    InvalidState(#[from] ParseTaskStatusError),
    /// No task exists with the identifier.
    #[error("task not found: {0}")]
    NotFound(TaskId),
}

impl From<TaskRepositoryError> for TaskLifecycleError {
    fn from(err: TaskRepositoryError) -> Self {
        match err {
            TaskRepositoryError::NotFound(task_id) => Self::NotFound(task_id),
            other => Self::Repository(other),
        }
    }
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task lifecycle orchestration service.
#[derive(Clone)]
pub struct TaskLifecycleService<R, D, C>
where
    R: TaskRepository,
    D: DeveloperDirectory,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    developers: Arc<D>,
    clock: Arc<C>,
    policy: WorkflowPolicy,
}

impl<R, D, C> TaskLifecycleService<R, D, C>
where
    R: TaskRepository,
    D: DeveloperDirectory,
    C: Clock + Send + Sync,
{
    /// Creates a new service with the default [`WorkflowPolicy`].
    #[must_use]
    pub fn new(repository: Arc<R>, developers: Arc<D>, clock: Arc<C>) -> Self {
        Self {
            repository,
            developers,
            clock,
            policy: WorkflowPolicy::default(),
        }
    }

    /// Replaces the workflow policy.
    #[must_use]
    pub fn with_policy(mut self, policy: WorkflowPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the active workflow policy.
    #[must_use]
    pub const fn policy(&self) -> &WorkflowPolicy {
        &self.policy
    }

    /// Opens a new task from an admin's intake form.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] when the actor is not an admin
    /// or the form is invalid (including an unknown developer when the
    /// policy requires one), or a repository/directory error when
    /// persistence fails.
    #[tracing::instrument(skip_all, fields(actor = %actor))]
    pub async fn create_task(&self, actor: &Actor, form: TaskForm) -> TaskLifecycleResult<Task> {
        let unknown_developer =
            self.policy.require_known_developer && !self.is_known_developer(form.developer()).await?;

        let task = match (Task::create(form, actor, &*self.clock), unknown_developer) {
            (Ok(task), false) => task,
            (Ok(_), true) => {
                return Err(reject_form(InvalidFields::default().with(FormField::Developer)));
            }
            (Err(TaskDomainError::Validation(fields)), true) => {
                return Err(reject_form(fields.with(FormField::Developer)));
            }
            (Err(TaskDomainError::Validation(fields)), false) => {
                return Err(reject_form(fields));
            }
            (Err(err), _) => {
                tracing::warn!(%err, "task creation rejected");
                return Err(err.into());
            }
        };

        self.repository.store(&task).await?;
        tracing::info!(task_id = %task.id(), developer = task.developer(), "task created");
        Ok(task)
    }

    /// Moves a task to the requested status.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::InvalidState`] for an unknown status
    /// string, [`TaskLifecycleError::NotFound`] for an unknown task,
    /// [`TaskLifecycleError::Domain`] when the transition table, the actor's
    /// role, or the workflow policy forbid the change, or
    /// [`TaskLifecycleError::Repository`] when persistence fails or a
    /// concurrent transition won the race.
    #[tracing::instrument(
        skip_all,
        fields(task_id = %request.task_id, target = %request.target_status)
    )]
    pub async fn transition_task(
        &self,
        request: TransitionTaskRequest,
    ) -> TaskLifecycleResult<Task> {
        let TransitionTaskRequest {
            task_id,
            target_status,
            actor,
            note,
        } = request;

        let target = TaskStatus::try_from(target_status.as_str())?;
        let mut task = self
            .repository
            .find_by_id(task_id)
            .await?
            .ok_or(TaskLifecycleError::NotFound(task_id))?;

        // Table and role checks precede policy; only the loaded copy changes
        // until both pass.
        let previous = task.version();
        let note_length = note.as_deref().map_or(0, |text| text.trim().chars().count());
        task.transition_to(target, &actor, note, &*self.clock)
            .inspect_err(|err| tracing::warn!(%err, "transition rejected"))?;
        self.check_policy(&task, &actor, note_length)
            .inspect_err(|err| tracing::warn!(%err, "transition rejected by policy"))?;
        self.repository.update(&task, previous).await?;

        tracing::info!(from = %previous.status, to = %target, "task transitioned");
        Ok(task)
    }

    /// Finds a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when lookup fails.
    pub async fn find_by_id(&self, task_id: TaskId) -> TaskLifecycleResult<Option<Task>> {
        Ok(self.repository.find_by_id(task_id).await?)
    }

    /// Lists every task, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when lookup fails.
    pub async fn list_tasks(&self) -> TaskLifecycleResult<Vec<Task>> {
        Ok(self.repository.list().await?)
    }

    /// Lists the tasks shown by a dashboard view, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when lookup fails.
    pub async fn list_tasks_for(&self, view: &TaskView) -> TaskLifecycleResult<Vec<Task>> {
        Ok(view.filter(self.repository.list().await?))
    }

    /// Lists developers available for assignment.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Directory`] when lookup fails.
    pub async fn list_developers(&self) -> TaskLifecycleResult<Vec<Developer>> {
        Ok(self.developers.list_developers().await?)
    }

    async fn is_known_developer(&self, name: &str) -> TaskLifecycleResult<bool> {
        let name = name.trim();
        Ok(self
            .developers
            .list_developers()
            .await?
            .iter()
            .any(|developer| developer.name() == name))
    }

    fn check_policy(
        &self,
        task: &Task,
        actor: &Actor,
        note_length: usize,
    ) -> Result<(), TaskDomainError> {
        if let Some(name) = actor.developer_name() {
            if self.policy.enforce_assignee && !task.is_assigned_to(name) {
                return Err(TaskDomainError::NotAssignedDeveloper {
                    task_id: task.id(),
                    assigned: task.developer().to_owned(),
                    actor: name.to_owned(),
                });
            }
        }

        if note_length > self.policy.max_note_length {
            return Err(TaskDomainError::NoteTooLong {
                max: self.policy.max_note_length,
                actual: note_length,
            });
        }
        Ok(())
    }
}

fn reject_form(fields: InvalidFields) -> TaskLifecycleError {
    tracing::warn!(%fields, "task form rejected");
    TaskDomainError::Validation(fields).into()
}
