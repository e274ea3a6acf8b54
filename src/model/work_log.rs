//! Work log types: the unit of tracked work.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::TaskStatus;

/// One user-recorded unit of work.
///
/// Timestamps are epoch milliseconds. `created_at` is set once;
/// `updated_at` moves forward on every mutation, so
/// `created_at <= updated_at` always holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkLog {
    /// Opaque identifier, unique across the collection. Never changes.
    pub id: String,

    /// What the work is about.
    pub requirement: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,

    /// Repository/branch pairs in entry order.
    #[serde(default)]
    pub repo_branches: Vec<RepoBranch>,

    /// External ticket reference (a Yunxiao work item). Empty means none.
    #[serde(rename = "yunxiaoId", default)]
    pub ticket_id: String,

    pub status: TaskStatus,
    pub created_at: i64,
    pub updated_at: i64,
}

impl WorkLog {
    /// Builds a fresh log from form input, stamped at `now`.
    pub fn from_form(id: String, data: WorkLogFormData, now: i64) -> Self {
        Self {
            id,
            requirement: data.requirement,
            note: data.note.filter(|n| !n.is_empty()),
            repo_branches: data.repo_branches,
            ticket_id: data.ticket_id,
            status: data.status,
            created_at: now,
            updated_at: now,
        }
    }

    /// Merges the fields present in `patch` and bumps `updated_at`.
    ///
    /// `updated_at` never moves behind `created_at`, even if the clock
    /// went backwards.
    pub fn apply(&mut self, patch: WorkLogPatch, now: i64) {
        if let Some(requirement) = patch.requirement {
            self.requirement = requirement;
        }
        if let Some(note) = patch.note {
            self.note = (!note.is_empty()).then_some(note);
        }
        if let Some(repo_branches) = patch.repo_branches {
            self.repo_branches = repo_branches;
        }
        if let Some(ticket_id) = patch.ticket_id {
            self.ticket_id = ticket_id;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        self.updated_at = now.max(self.created_at);
    }

    /// Whether any repo/branch pair names exactly `repository`.
    pub fn references_repository(&self, repository: &str) -> bool {
        self.repo_branches
            .iter()
            .any(|rb| rb.repository == repository)
    }
}

/// A repository and branch attached to one work log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoBranch {
    /// Unique within the parent log's list.
    pub id: String,
    pub repository: String,
    pub branch: String,
}

impl RepoBranch {
    pub fn new(repository: impl Into<String>, branch: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            repository: repository.into(),
            branch: branch.into(),
        }
    }

    /// True when both repository and branch are blank.
    pub fn is_blank(&self) -> bool {
        self.repository.trim().is_empty() && self.branch.trim().is_empty()
    }
}

/// Input for a new work log: everything except identity and timestamps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkLogFormData {
    pub requirement: String,
    pub note: Option<String>,
    pub repo_branches: Vec<RepoBranch>,
    pub ticket_id: String,
    pub status: TaskStatus,
}

/// A partial change to an existing work log.
///
/// Only the form fields can be patched; `id` and `created_at` have no slot.
/// An empty `note` clears the note.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkLogPatch {
    pub requirement: Option<String>,
    pub note: Option<String>,
    pub repo_branches: Option<Vec<RepoBranch>>,
    pub ticket_id: Option<String>,
    pub status: Option<TaskStatus>,
}

impl WorkLogPatch {
    pub fn is_empty(&self) -> bool {
        self.requirement.is_none()
            && self.note.is_none()
            && self.repo_branches.is_none()
            && self.ticket_id.is_none()
            && self.status.is_none()
    }
}
