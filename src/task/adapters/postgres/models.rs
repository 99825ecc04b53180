//! Diesel row models for task persistence.

use super::schema::{developers, tasks};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query result row for task records.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Insertable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Job name.
    pub job_name: String,
    /// Site identifier.
    pub site_id: String,
    /// Platform code.
    pub platform: String,
    /// Assigned developer name.
    pub developer: String,
    /// Request type label.
    pub type_of_request: String,
    /// Number of pages.
    pub number_of_pages: i64,
    /// Salesforce link.
    pub salesforce_link: String,
    /// Whether comments were mandatory at creation.
    pub comments_required: bool,
    /// Creation comments.
    pub comments: Option<String>,
    /// Additional creation comments.
    pub additional_comments: Option<String>,
    /// Lifecycle status.
    pub status: String,
    /// Number of transitions applied since creation.
    pub revision: i64,
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
    /// Most recent failed QC round as JSON.
    pub previous_review: Option<Value>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Changeset written by a status transition.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub struct TaskProgressChangeset {
    /// Lifecycle status.
    pub status: String,
    /// Number of transitions applied since creation.
    pub revision: i64,
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
    /// Most recent failed QC round as JSON.
    pub previous_review: Option<Value>,
}

/// Query result row for developer records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = developers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DeveloperRow {
    /// Developer identifier.
    pub id: uuid::Uuid,
    /// Developer name.
    pub name: String,
}
