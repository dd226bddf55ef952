//! Human-readable and machine-readable renderings of workflow diagnostics.

use super::types::WorkflowError;

/// Format diagnostics as a user-facing summary.
///
/// ```text
/// 2 issues were detected with this workflow:
/// Please specify an on.push hook ...
/// git checkout HEAD^2 is no longer necessary ...
/// ```
///
/// Returns an empty string when there is nothing to report.
pub fn format_workflow_errors(errors: &[WorkflowError]) -> String {
    if errors.is_empty() {
        return String::new();
    }

    let issues_were = if errors.len() == 1 {
        "issue was"
    } else {
        "issues were"
    };

    let mut msg = format!(
        "{} {} detected with this workflow:\n",
        errors.len(),
        issues_were
    );
    for error in errors {
        msg.push_str(error.message());
        msg.push('\n');
    }

    msg
}

/// Comma-joined diagnostic codes in input order, or `None` for no diagnostics.
pub fn format_workflow_cause(errors: &[WorkflowError]) -> Option<String> {
    if errors.is_empty() {
        return None;
    }

    Some(
        errors
            .iter()
            .map(WorkflowError::code)
            .collect::<Vec<_>>()
            .join(","),
    )
}
