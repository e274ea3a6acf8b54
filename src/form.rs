//! Input validation for work log forms.
//!
//! The store accepts whatever it is given. These checks run in the
//! presentation layer before any store call: a requirement must be
//! non-empty, and a branch needs a repository.

use crate::model::{RepoBranch, WorkLogFormData, WorkLogPatch};

/// A field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("requirement must not be empty")]
    EmptyRequirement,

    #[error("branch `{branch}` (row {row}) needs a repository")]
    BranchWithoutRepository { row: usize, branch: String },
}

/// Checks form input for a new log.
pub fn validate(data: &WorkLogFormData) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();
    if data.requirement.trim().is_empty() {
        errors.push(FieldError::EmptyRequirement);
    }
    check_rows(&data.repo_branches, &mut errors);
    finish(errors)
}

/// Checks the fields a patch sets; absent fields are not inspected.
pub fn validate_patch(patch: &WorkLogPatch) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();
    if patch
        .requirement
        .as_deref()
        .is_some_and(|r| r.trim().is_empty())
    {
        errors.push(FieldError::EmptyRequirement);
    }
    if let Some(rows) = &patch.repo_branches {
        check_rows(rows, &mut errors);
    }
    finish(errors)
}

/// Drops rows where both repository and branch are blank.
pub fn prune_blank_rows(rows: Vec<RepoBranch>) -> Vec<RepoBranch> {
    rows.into_iter().filter(|rb| !rb.is_blank()).collect()
}

fn check_rows(rows: &[RepoBranch], errors: &mut Vec<FieldError>) {
    for (row, rb) in rows.iter().enumerate() {
        if !rb.branch.trim().is_empty() && rb.repository.trim().is_empty() {
            errors.push(FieldError::BranchWithoutRepository {
                row: row + 1,
                branch: rb.branch.clone(),
            });
        }
    }
}

fn finish(errors: Vec<FieldError>) -> Result<(), Vec<FieldError>> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
