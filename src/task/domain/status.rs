//! Task status values and the table of legal transitions between them.

use super::{ActorRole, ParseTaskStatusError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Created by an admin, not yet picked up.
    Pending,
    /// A developer is implementing the request.
    InProgress,
    /// Implementation delivered and waiting for QC.
    DevComplete,
    /// QC review is under way.
    InQc,
    /// QC accepted the work.
    QcPassed,
    /// QC rejected the work; the developer must resubmit.
    QcFailed,
    /// Closed by an external process.
    Completed,
}

impl TaskStatus {
    /// Every status, in workflow order.
    pub const ALL: [Self; 7] = [
        Self::Pending,
        Self::InProgress,
        Self::DevComplete,
        Self::InQc,
        Self::QcPassed,
        Self::QcFailed,
        Self::Completed,
    ];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::DevComplete => "dev_complete",
            Self::InQc => "in_qc",
            Self::QcPassed => "qc_passed",
            Self::QcFailed => "qc_failed",
            Self::Completed => "completed",
        }
    }

    /// Returns `true` when the transition table has an edge to `target`.
    #[must_use]
    pub fn can_transition_to(self, target: Self) -> bool {
        TransitionRule::lookup(self, target).is_some()
    }

    /// Returns `true` when no transition leaves this status.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        self.allowed_targets().next().is_none()
    }

    /// Returns every status reachable in one step.
    pub fn allowed_targets(self) -> impl Iterator<Item = Self> {
        TRANSITIONS
            .iter()
            .filter(move |rule| rule.from == self)
            .map(|rule| rule.to)
    }

    /// Returns the statuses the given role may move a task to from here.
    pub fn targets_for(self, role: ActorRole) -> impl Iterator<Item = Self> {
        TRANSITIONS
            .iter()
            .filter(move |rule| rule.from == self && rule.actor == role)
            .map(|rule| rule.to)
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| ParseTaskStatusError(value.to_owned()))
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields a transition stamps when it is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageEffect {
    /// Sets `dev_start_time`.
    DevStarted,
    /// Sets `dev_notes` and `dev_completed_time`.
    DevCompleted,
    /// Sets `qc_start_time`.
    QcStarted,
    /// Sets `qc_notes` and `qc_completed_time`.
    QcCompleted,
}

impl StageEffect {
    /// Returns `true` when the transition records a note.
    #[must_use]
    pub const fn records_note(self) -> bool {
        matches!(self, Self::DevCompleted | Self::QcCompleted)
    }
}

/// One legal edge of the workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransitionRule {
    /// Status the task must currently hold.
    pub from: TaskStatus,
    /// Status the task moves to.
    pub to: TaskStatus,
    /// Role allowed to trigger the edge.
    pub actor: ActorRole,
    /// Fields stamped by the edge.
    pub effect: StageEffect,
}

impl TransitionRule {
    /// Finds the rule for an edge, if the edge is legal.
    #[must_use]
    pub fn lookup(from: TaskStatus, to: TaskStatus) -> Option<&'static Self> {
        TRANSITIONS
            .iter()
            .find(|rule| rule.from == from && rule.to == to)
    }

    /// Returns the full transition table.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &TRANSITIONS
    }
}

const TRANSITIONS: [TransitionRule; 6] = [
    TransitionRule {
        from: TaskStatus::Pending,
        to: TaskStatus::InProgress,
        actor: ActorRole::Developer,
        effect: StageEffect::DevStarted,
    },
    TransitionRule {
        from: TaskStatus::InProgress,
        to: TaskStatus::DevComplete,
        actor: ActorRole::Developer,
        effect: StageEffect::DevCompleted,
    },
    TransitionRule {
        from: TaskStatus::QcFailed,
        to: TaskStatus::DevComplete,
        actor: ActorRole::Developer,
        effect: StageEffect::DevCompleted,
    },
    TransitionRule {
        from: TaskStatus::DevComplete,
        to: TaskStatus::InQc,
        actor: ActorRole::QualityControl,
        effect: StageEffect::QcStarted,
    },
    TransitionRule {
        from: TaskStatus::InQc,
        to: TaskStatus::QcPassed,
        actor: ActorRole::QualityControl,
        effect: StageEffect::QcCompleted,
    },
    TransitionRule {
        from: TaskStatus::InQc,
        to: TaskStatus::QcFailed,
        actor: ActorRole::QualityControl,
        effect: StageEffect::QcCompleted,
    },
];
