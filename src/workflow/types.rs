//! Core types for workflow diagnostics and branch filters.

use std::fmt;

/// A single workflow diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkflowError {
    /// `on` is absent or not a string, sequence, or mapping.
    MissingHooks,
    /// No `push` trigger.
    MissingPushHook,
    /// No `pull_request` trigger.
    MissingPullRequestHook,
    /// `on.push.paths` is set.
    PathsSpecified,
    /// `on.push.paths-ignore` is set.
    PathsIgnoreSpecified,
    /// Some `on.pull_request.branches` pattern is not covered by `on.push.branches`.
    MismatchedBranches,
    /// A step runs `git checkout HEAD^2`.
    CheckoutWrongHead,
}

impl WorkflowError {
    /// The variant name, used as a machine-readable cause tag.
    pub fn code(&self) -> &'static str {
        match self {
            WorkflowError::MissingHooks => "MissingHooks",
            WorkflowError::MissingPushHook => "MissingPushHook",
            WorkflowError::MissingPullRequestHook => "MissingPullRequestHook",
            WorkflowError::PathsSpecified => "PathsSpecified",
            WorkflowError::PathsIgnoreSpecified => "PathsIgnoreSpecified",
            WorkflowError::MismatchedBranches => "MismatchedBranches",
            WorkflowError::CheckoutWrongHead => "CheckoutWrongHead",
        }
    }

    /// Remediation text shown to the user.
    pub fn message(&self) -> &'static str {
        match self {
            WorkflowError::MissingHooks => {
                "Please specify on.push and on.pull_request hooks so that Code Scanning can compare pull requests against the state of the base branch."
            }
            WorkflowError::MissingPushHook => {
                "Please specify an on.push hook so that Code Scanning can compare pull requests against the state of the base branch."
            }
            WorkflowError::MissingPullRequestHook => {
                "Please specify an on.pull_request hook so that Code Scanning is explicitly run against pull requests. This will be required to see results on pull requests."
            }
            WorkflowError::PathsSpecified => {
                "Using on.push.paths can prevent Code Scanning annotating new alerts in your pull requests."
            }
            WorkflowError::PathsIgnoreSpecified => {
                "Using on.push.paths-ignore can prevent Code Scanning annotating new alerts in your pull requests."
            }
            WorkflowError::MismatchedBranches => {
                "Please make sure that every branch in on.pull_request is also in on.push so that Code Scanning can compare pull requests against the state of the base branch."
            }
            WorkflowError::CheckoutWrongHead => {
                "git checkout HEAD^2 is no longer necessary. Please remove this step as Code Scanning recommends analyzing the merge commit for best results."
            }
        }
    }
}

impl fmt::Display for WorkflowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Normalized `branches` filter of a trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BranchFilter {
    /// No usable filter: the trigger fires on every branch.
    All,
    /// Glob patterns; a bare string becomes a single pattern.
    Patterns(Vec<String>),
}

impl BranchFilter {
    /// Whether every branch this filter admits is admitted by `other`.
    ///
    /// Each pattern here needs at least one pattern in `other` that is a
    /// superset of it.
    pub fn is_covered_by(&self, other: &BranchFilter) -> bool {
        match (self, other) {
            (_, BranchFilter::All) => true,
            (BranchFilter::All, BranchFilter::Patterns(_)) => false,
            (BranchFilter::Patterns(mine), BranchFilter::Patterns(theirs)) => mine.iter().all(|p| {
                theirs
                    .iter()
                    .any(|q| super::pattern::pattern_is_superset(q, p))
            }),
        }
    }
}
