//! Workflow policy applied by the lifecycle service.

use serde::Deserialize;

/// Configuration for checks layered on top of the transition table.
///
/// # Examples
///
/// ```
/// use buildtrack::task::services::WorkflowPolicy;
///
/// let policy = WorkflowPolicy::default();
/// assert!(policy.enforce_assignee);
///
/// let lenient = WorkflowPolicy::lenient();
/// assert!(!lenient.require_known_developer);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WorkflowPolicy {
    /// Only the assigned developer may move a task through developer edges.
    pub enforce_assignee: bool,
    /// The developer on an intake form must appear in the directory.
    pub require_known_developer: bool,
    /// Maximum note length in characters.
    pub max_note_length: usize,
}

impl Default for WorkflowPolicy {
    fn default() -> Self {
        Self {
            enforce_assignee: true,
            require_known_developer: true,
            max_note_length: 2_000,
        }
    }
}

impl WorkflowPolicy {
    /// Creates a lenient policy that skips identity checks.
    ///
    /// Useful for testing or single-user deployments.
    #[must_use]
    pub fn lenient() -> Self {
        Self {
            enforce_assignee: false,
            require_known_developer: false,
            ..Default::default()
        }
    }

    /// Creates a strict policy with a short note limit.
    #[must_use]
    pub const fn strict() -> Self {
        Self {
            enforce_assignee: true,
            require_known_developer: true,
            max_note_length: 500,
        }
    }

    /// Parses a policy from JSON; omitted keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns a [`serde_json::Error`] when the document is malformed or
    /// contains unknown keys.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
