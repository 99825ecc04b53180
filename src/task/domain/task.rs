//! Task aggregate root and its lifecycle operations.

use super::{
    Actor, ActorRole, FormField, InvalidFields, PageCount, Platform, RequestType, StageEffect,
    TaskDomainError, TaskForm, TaskId, TaskStatus, TransitionRule,
    form::{is_http_url, optional_text},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A QC round that ended in failure, kept when the developer resubmits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QcReview {
    /// Reviewer notes from the failed round.
    pub notes: Option<String>,
    /// When the failed round started.
    pub started_at: Option<DateTime<Utc>>,
    /// When the round was failed.
    pub completed_at: Option<DateTime<Utc>>,
}

/// Stored state a repository update is checked against.
///
/// The revision grows by one on every transition, so a task that goes round
/// the rework loop back to an earlier status still has a new version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskVersion {
    /// Lifecycle status.
    pub status: TaskStatus,
    /// Number of transitions applied since creation.
    pub revision: u32,
}

impl fmt::Display for TaskVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (revision {})", self.status, self.revision)
    }
}

/// Task aggregate root.
///
/// Deserialization goes through [`PersistedTaskData`] and rejects records
/// that [`Task::create`] and [`Task::transition_to`] could not produce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "PersistedTaskData")]
pub struct Task {
    id: TaskId,
    job_name: String,
    site_id: String,
    platform: Platform,
    developer: String,
    type_of_request: RequestType,
    number_of_pages: PageCount,
    salesforce_link: String,
    comments_required: bool,
    comments: Option<String>,
    additional_comments: Option<String>,
    status: TaskStatus,
    revision: u32,
    dev_notes: Option<String>,
    qc_notes: Option<String>,
    dev_start_time: Option<DateTime<Utc>>,
    dev_completed_time: Option<DateTime<Utc>>,
    qc_start_time: Option<DateTime<Utc>>,
    qc_completed_time: Option<DateTime<Utc>>,
    previous_review: Option<QcReview>,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Job name.
    pub job_name: String,
    /// Site identifier.
    pub site_id: String,
    /// Target platform.
    pub platform: Platform,
    /// Assigned developer.
    pub developer: String,
    /// Request category.
    pub type_of_request: RequestType,
    /// Page count.
    pub number_of_pages: PageCount,
    /// Salesforce link.
    pub salesforce_link: String,
    /// Whether comments were mandatory at creation.
    pub comments_required: bool,
    /// Creation comments.
    pub comments: Option<String>,
    /// Additional creation comments.
    pub additional_comments: Option<String>,
    /// Persisted lifecycle status.
    pub status: TaskStatus,
    /// Number of transitions applied since creation.
    pub revision: u32,
    /// Developer notes.
    pub dev_notes: Option<String>,
    /// QC notes.
    pub qc_notes: Option<String>,
    /// Development start timestamp.
    pub dev_start_time: Option<DateTime<Utc>>,
    /// Development completion timestamp.
    pub dev_completed_time: Option<DateTime<Utc>>,
    /// QC start timestamp.
    pub qc_start_time: Option<DateTime<Utc>>,
    /// QC completion timestamp.
    pub qc_completed_time: Option<DateTime<Utc>>,
    /// Most recent failed QC round, if any.
    pub previous_review: Option<QcReview>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Opens a new task in [`TaskStatus::Pending`] from an intake form.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::CreationNotPermitted`] when the actor is
    /// not an admin, or [`TaskDomainError::Validation`] naming every
    /// invalid form field.
    pub fn create(
        form: TaskForm,
        actor: &Actor,
        clock: &impl Clock,
    ) -> Result<Self, TaskDomainError> {
        if actor.role() != ActorRole::Admin {
            return Err(TaskDomainError::CreationNotPermitted(actor.role()));
        }
        let form = form.validate()?;

        Ok(Self {
            id: TaskId::new(),
            job_name: form.job_name,
            site_id: form.site_id,
            platform: form.platform,
            developer: form.developer,
            type_of_request: form.type_of_request,
            number_of_pages: form.number_of_pages,
            salesforce_link: form.salesforce_link,
            comments_required: form.comments_required,
            comments: form.comments,
            additional_comments: form.additional_comments,
            status: TaskStatus::Pending,
            revision: 0,
            dev_notes: None,
            qc_notes: None,
            dev_start_time: None,
            dev_completed_time: None,
            qc_start_time: None,
            qc_completed_time: None,
            previous_review: None,
            created_at: clock.utc(),
        })
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            job_name: data.job_name,
            site_id: data.site_id,
            platform: data.platform,
            developer: data.developer,
            type_of_request: data.type_of_request,
            number_of_pages: data.number_of_pages,
            salesforce_link: data.salesforce_link,
            comments_required: data.comments_required,
            comments: data.comments,
            additional_comments: data.additional_comments,
            status: data.status,
            revision: data.revision,
            dev_notes: data.dev_notes,
            qc_notes: data.qc_notes,
            dev_start_time: data.dev_start_time,
            dev_completed_time: data.dev_completed_time,
            qc_start_time: data.qc_start_time,
            qc_completed_time: data.qc_completed_time,
            previous_review: data.previous_review,
            created_at: data.created_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the job name.
    #[must_use]
    pub fn job_name(&self) -> &str {
        &self.job_name
    }

    /// Returns the site identifier.
    #[must_use]
    pub fn site_id(&self) -> &str {
        &self.site_id
    }

    /// Returns the target platform.
    #[must_use]
    pub const fn platform(&self) -> Platform {
        self.platform
    }

    /// Returns the assigned developer.
    #[must_use]
    pub fn developer(&self) -> &str {
        &self.developer
    }

    /// Returns the request category.
    #[must_use]
    pub const fn type_of_request(&self) -> RequestType {
        self.type_of_request
    }

    /// Returns the page count.
    #[must_use]
    pub const fn number_of_pages(&self) -> PageCount {
        self.number_of_pages
    }

    /// Returns the Salesforce link.
    #[must_use]
    pub fn salesforce_link(&self) -> &str {
        &self.salesforce_link
    }

    /// Returns whether comments were mandatory at creation.
    #[must_use]
    pub const fn comments_required(&self) -> bool {
        self.comments_required
    }

    /// Returns the creation comments.
    #[must_use]
    pub fn comments(&self) -> Option<&str> {
        self.comments.as_deref()
    }

    /// Returns the additional creation comments.
    #[must_use]
    pub fn additional_comments(&self) -> Option<&str> {
        self.additional_comments.as_deref()
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the number of transitions applied since creation.
    #[must_use]
    pub const fn revision(&self) -> u32 {
        self.revision
    }

    /// Returns the status and revision an update of this task is checked
    /// against.
    #[must_use]
    pub const fn version(&self) -> TaskVersion {
        TaskVersion {
            status: self.status,
            revision: self.revision,
        }
    }

    /// Returns the developer notes.
    #[must_use]
    pub fn dev_notes(&self) -> Option<&str> {
        self.dev_notes.as_deref()
    }

    /// Returns the QC notes.
    #[must_use]
    pub fn qc_notes(&self) -> Option<&str> {
        self.qc_notes.as_deref()
    }

    /// Returns when development started.
    #[must_use]
    pub const fn dev_start_time(&self) -> Option<DateTime<Utc>> {
        self.dev_start_time
    }

    /// Returns when development was last delivered.
    #[must_use]
    pub const fn dev_completed_time(&self) -> Option<DateTime<Utc>> {
        self.dev_completed_time
    }

    /// Returns when the current QC round started.
    #[must_use]
    pub const fn qc_start_time(&self) -> Option<DateTime<Utc>> {
        self.qc_start_time
    }

    /// Returns when the current QC round finished.
    #[must_use]
    pub const fn qc_completed_time(&self) -> Option<DateTime<Utc>> {
        self.qc_completed_time
    }

    /// Returns the most recent failed QC round, if the task was reworked.
    #[must_use]
    pub const fn previous_review(&self) -> Option<&QcReview> {
        self.previous_review.as_ref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns `true` when `developer` is the assigned developer.
    #[must_use]
    pub fn is_assigned_to(&self, developer: &str) -> bool {
        self.developer == developer.trim()
    }

    /// Moves the task to `target`, stamping the timestamp and note the edge
    /// records.
    ///
    /// Blank notes are treated as absent. Moving out of
    /// [`TaskStatus::QcFailed`] archives the failed QC round into
    /// [`Task::previous_review`] and clears the live QC fields.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidTransition`] when no edge leads to
    /// `target`, [`TaskDomainError::TransitionNotPermitted`] when the edge
    /// belongs to another role, or [`TaskDomainError::NoteNotAccepted`]
    /// when a note is given to an edge that records none. The task is left
    /// unchanged on error.
    pub fn transition_to(
        &mut self,
        target: TaskStatus,
        actor: &Actor,
        note: Option<String>,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        let rule = TransitionRule::lookup(self.status, target).ok_or(
            TaskDomainError::InvalidTransition {
                task_id: self.id,
                from: self.status,
                to: target,
            },
        )?;
        if rule.actor != actor.role() {
            return Err(TaskDomainError::TransitionNotPermitted {
                task_id: self.id,
                role: actor.role(),
                from: self.status,
                to: target,
            });
        }
        let note = optional_text(note);
        if note.is_some() && !rule.effect.records_note() {
            return Err(TaskDomainError::NoteNotAccepted {
                task_id: self.id,
                to: target,
            });
        }

        let stamp = self.next_stamp(clock);
        match rule.effect {
            StageEffect::DevStarted => self.dev_start_time = Some(stamp),
            StageEffect::DevCompleted => {
                if self.status == TaskStatus::QcFailed {
                    self.archive_failed_review();
                }
                self.dev_notes = note;
                self.dev_completed_time = Some(stamp);
            }
            StageEffect::QcStarted => self.qc_start_time = Some(stamp),
            StageEffect::QcCompleted => {
                self.qc_notes = note;
                self.qc_completed_time = Some(stamp);
            }
        }
        self.status = target;
        self.revision = self.revision.saturating_add(1);
        Ok(())
    }

    /// Returns the clock time, clamped so it never precedes a timestamp
    /// already recorded on the task.
    fn next_stamp(&self, clock: &impl Clock) -> DateTime<Utc> {
        let now = clock.utc();
        self.latest_timestamp().max(now)
    }

    fn timeline_is_ordered(&self) -> bool {
        [
            Some(self.created_at),
            self.dev_start_time,
            self.dev_completed_time,
            self.qc_start_time,
            self.qc_completed_time,
        ]
        .into_iter()
        .flatten()
        .is_sorted()
    }

    fn latest_timestamp(&self) -> DateTime<Utc> {
        [
            self.dev_start_time,
            self.dev_completed_time,
            self.qc_start_time,
            self.qc_completed_time,
        ]
        .into_iter()
        .flatten()
        .fold(self.created_at, |latest, stamp| latest.max(stamp))
    }

    fn archive_failed_review(&mut self) {
        self.previous_review = Some(QcReview {
            notes: self.qc_notes.take(),
            started_at: self.qc_start_time.take(),
            completed_at: self.qc_completed_time.take(),
        });
    }
}

impl TryFrom<PersistedTaskData> for Task {
    type Error = TaskDomainError;

    /// Rebuilds a task from untrusted data, checking the invariants intake
    /// and transitions maintain.
    fn try_from(data: PersistedTaskData) -> Result<Self, Self::Error> {
        let mut invalid = Vec::new();
        for (value, field) in [
            (&data.job_name, FormField::JobName),
            (&data.site_id, FormField::SiteId),
            (&data.developer, FormField::Developer),
        ] {
            if value.trim().is_empty() || value.trim() != value.as_str() {
                invalid.push(field);
            }
        }
        if !is_http_url(&data.salesforce_link) {
            invalid.push(FormField::SalesforceLink);
        }
        if data.comments_required != data.comments.is_some() {
            invalid.push(FormField::Comments);
        }
        if !invalid.is_empty() {
            return Err(TaskDomainError::Validation(InvalidFields::new(invalid)));
        }

        let task = Self::from_persisted(data);
        if !task.timeline_is_ordered() {
            return Err(TaskDomainError::TimelineOutOfOrder(task.id));
        }
        Ok(task)
    }
}
