//! Workflow trigger validation for code-scanning workflows.
//!
//! This module inspects a parsed CI workflow document and reports structural
//! problems that stop code scanning from comparing pull requests against
//! their base branch:
//! - Missing `push` / `pull_request` triggers
//! - Path filters on the `push` trigger
//! - `pull_request` branches not covered by `push` branches
//! - Steps that check out `HEAD^2` instead of the merge commit
//!
//! Validation never fails: shapes that do not match expectations mean the
//! check does not apply.

mod document;
mod format;
mod load;
pub mod pattern;
mod types;
mod validator;


// Re-export public API
pub use format::{format_workflow_cause, format_workflow_errors};
pub use load::{load_workflow, workflow_errors_for};
pub use pattern::pattern_is_superset;
pub use types::{BranchFilter, WorkflowError};
pub use validator::validate_workflow;
