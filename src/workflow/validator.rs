//! Structural checks over a workflow document.

use super::document::{
    branch_filter, field, has_branch_filter, has_key, mapping_values, sequence_items,
};
use super::types::WorkflowError;
use serde_yaml::Value;
use tracing::debug;

/// The step command that checks out the PR head instead of the merge commit.
const WRONG_CHECKOUT: &str = "git checkout HEAD^2";

/// Validate a parsed workflow document.
///
/// Checks run in a fixed order and the diagnostics are returned in the order
/// they fire:
/// 1. `on` must be a string, sequence, or mapping (`MissingHooks`)
/// 2. both `push` and `pull_request` triggers must be present
///    (`MissingPushHook` takes precedence over `MissingPullRequestHook`)
/// 3. `on.push` must not filter by path (`PathsSpecified`, `PathsIgnoreSpecified`)
/// 4. `on.push.branches` must cover `on.pull_request.branches` (`MismatchedBranches`)
/// 5. no step may run `git checkout HEAD^2` (`CheckoutWrongHead`)
///
/// Check 5 runs regardless of the outcome of checks 1-4.
///
/// # Examples
///
/// ```
/// use scanhook::workflow::{validate_workflow, WorkflowError};
///
/// let doc: serde_yaml::Value = serde_yaml::from_str("on: [push, pull_request]").unwrap();
/// assert!(validate_workflow(&doc).is_empty());
///
/// let doc: serde_yaml::Value = serde_yaml::from_str("jobs: {}").unwrap();
/// assert_eq!(validate_workflow(&doc), vec![WorkflowError::MissingHooks]);
/// ```
pub fn validate_workflow(doc: &Value) -> Vec<WorkflowError> {
    let mut errors = Vec::new();

    check_hooks(doc, &mut errors);

    if has_wrong_checkout(doc) {
        debug!("step runs '{}'", WRONG_CHECKOUT);
        errors.push(WorkflowError::CheckoutWrongHead);
    }

    errors
}

/// Checks 1-4, all driven by the shape of `on`.
fn check_hooks(doc: &Value, errors: &mut Vec<WorkflowError>) {
    let Some(on) = field(doc, "on") else {
        debug!("workflow has no 'on' key");
        errors.push(WorkflowError::MissingHooks);
        return;
    };

    match on {
        Value::String(event) => check_event_list(&[event.as_str()], errors),
        Value::Sequence(items) => {
            let events: Vec<&str> = items.iter().filter_map(Value::as_str).collect();
            check_event_list(&events, errors);
        }
        Value::Mapping(_) => check_trigger_mapping(on, errors),
        _ => {
            debug!("'on' has an unusable shape: {:?}", on);
            errors.push(WorkflowError::MissingHooks);
        }
    }
}

/// Sequence form: `on: [push, pull_request]`.
fn check_event_list(events: &[&str], errors: &mut Vec<WorkflowError>) {
    if !events.contains(&"push") {
        errors.push(WorkflowError::MissingPushHook);
    } else if !events.contains(&"pull_request") {
        errors.push(WorkflowError::MissingPullRequestHook);
    }
}

/// Mapping form: `on: { push: ..., pull_request: ... }`.
fn check_trigger_mapping(on: &Value, errors: &mut Vec<WorkflowError>) {
    // A null trigger reads as "no filters".
    let push = field(on, "push");
    let pull_request = field(on, "pull_request");

    if push.is_none() {
        errors.push(WorkflowError::MissingPushHook);
    } else if pull_request.is_none() {
        errors.push(WorkflowError::MissingPullRequestHook);
    }

    let Some(push) = push else {
        return;
    };
    if has_key(push, "paths") {
        errors.push(WorkflowError::PathsSpecified);
    }
    if has_key(push, "paths-ignore") {
        errors.push(WorkflowError::PathsIgnoreSpecified);
    }

    let Some(pull_request) = pull_request else {
        return;
    };
    if has_branch_filter(push) && has_branch_filter(pull_request) {
        let push_branches = branch_filter(push);
        let pr_branches = branch_filter(pull_request);
        if !pr_branches.is_covered_by(&push_branches) {
            debug!(
                ?push_branches,
                ?pr_branches,
                "pull_request branches are not covered by push branches"
            );
            errors.push(WorkflowError::MismatchedBranches);
        }
    }
}

/// Check 5: any `jobs.*.steps[].run` containing `git checkout HEAD^2`.
fn has_wrong_checkout(doc: &Value) -> bool {
    let Some(jobs) = field(doc, "jobs") else {
        return false;
    };

    mapping_values(jobs)
        .filter_map(|job| field(job, "steps"))
        .flat_map(sequence_items)
        .filter_map(|step| field(step, "run"))
        .filter_map(Value::as_str)
        .any(|command| command.contains(WRONG_CHECKOUT))
}
