//! Resolution of the ref and commit being analyzed.
//!
//! On a `pull_request` event the CI ref is `refs/pull/<N>/merge`. If the
//! checkout step moved `HEAD` away from the merge commit the analysis really
//! ran on the PR head, and results must be attributed to `refs/pull/<N>/head`.

use super::env::{CiEnvironment, optional_var, required_var};
use crate::error::{Result, ScanError};
use crate::git;
use regex::Regex;
use std::path::PathBuf;
use std::sync::LazyLock;
use tracing::{debug, info, warn};

static PULL_MERGE_REF_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^refs/pull/(\d+)/merge$").expect("Invalid pull request ref regex")
});

static WORKFLOW_REF_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^/]+/[^/]+/(.+?)@.+$").expect("Invalid workflow ref regex")
});

/// Resolves revisions to commit OIDs.
pub trait CommitResolver {
    fn commit_oid(&self, rev: &str) -> Result<String>;
}

/// Resolves revisions with `git rev-parse` inside a checkout.
#[derive(Debug, Clone)]
pub struct GitCommitResolver {
    pub checkout_path: PathBuf,
}

impl GitCommitResolver {
    pub fn new(checkout_path: impl Into<PathBuf>) -> Self {
        Self {
            checkout_path: checkout_path.into(),
        }
    }
}

impl CommitResolver for GitCommitResolver {
    fn commit_oid(&self, rev: &str) -> Result<String> {
        git::rev_parse(&self.checkout_path, rev)
    }
}

/// Explicit `--ref` / `--sha` values that bypass environment lookups.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefOverrides {
    pub git_ref: Option<String>,
    pub sha: Option<String>,
}

impl RefOverrides {
    /// Both overrides must be given together, or neither.
    pub fn validate(&self) -> Result<()> {
        let has_ref = self.git_ref.as_deref().is_some_and(|r| !r.is_empty());
        let has_sha = self.sha.as_deref().is_some_and(|s| !s.is_empty());
        if has_ref != has_sha {
            return Err(ScanError::UserError(
                "both --ref and --sha are required if one of them is provided".to_string(),
            ));
        }
        Ok(())
    }
}

/// Resolve the ref that analysis results belong to.
///
/// # Returns
///
/// * `Ok(String)` - The ref, e.g. `refs/heads/main` or `refs/pull/7/head`
/// * `Err(ScanError::UserError)` - If only one of `--ref` / `--sha` was given
/// * `Err(ScanError::EnvError)` - If `GITHUB_REF` or `GITHUB_SHA` is missing
pub fn resolve_ref(
    env: &dyn CiEnvironment,
    resolver: &dyn CommitResolver,
    overrides: &RefOverrides,
) -> Result<String> {
    overrides.validate()?;

    // A user-provided ref is taken at face value.
    if let Some(git_ref) = overrides.git_ref.as_deref().filter(|r| !r.is_empty()) {
        debug!(git_ref, "using explicit ref");
        return Ok(git_ref.to_string());
    }

    let git_ref = required_var(env, "GITHUB_REF")?;
    let sha = required_var(env, "GITHUB_SHA")?;

    let pr_number = PULL_MERGE_REF_REGEX
        .captures(&git_ref)
        .map(|captures| captures[1].to_string());
    let Some(pr_number) = pr_number else {
        return Ok(git_ref);
    };

    let head = match resolver.commit_oid("HEAD") {
        Ok(head) => head,
        Err(e) => {
            warn!("could not resolve HEAD, assuming {}: {}", sha, e);
            return Ok(git_ref);
        }
    };

    if head == sha {
        Ok(git_ref)
    } else {
        let head_ref = format!("refs/pull/{}/head", pr_number);
        info!(%git_ref, %head_ref, "HEAD is not the merge commit, using PR head ref");
        Ok(head_ref)
    }
}

/// Resolve the commit OID being analyzed.
///
/// An explicit `--sha` wins; otherwise `HEAD` of the checkout, falling back
/// to `GITHUB_SHA` when git cannot answer.
pub fn resolve_commit_oid(
    env: &dyn CiEnvironment,
    resolver: &dyn CommitResolver,
    overrides: &RefOverrides,
) -> Result<String> {
    overrides.validate()?;

    if let Some(sha) = overrides.sha.as_deref().filter(|s| !s.is_empty()) {
        return Ok(sha.to_string());
    }

    match resolver.commit_oid("HEAD") {
        Ok(oid) => Ok(oid),
        Err(e) => {
            warn!("could not resolve HEAD, falling back to GITHUB_SHA: {}", e);
            required_var(env, "GITHUB_SHA")
        }
    }
}

/// Repository-relative path of the running workflow file.
///
/// Parsed from `GITHUB_WORKFLOW_REF`, which has the form
/// `owner/repo/.github/workflows/codeql.yml@refs/heads/main`.
pub fn workflow_path(env: &dyn CiEnvironment) -> Result<String> {
    let workflow_ref = required_var(env, "GITHUB_WORKFLOW_REF")?;
    WORKFLOW_REF_REGEX
        .captures(&workflow_ref)
        .map(|captures| captures[1].to_string())
        .ok_or_else(|| {
            ScanError::UserError(format!(
                "GITHUB_WORKFLOW_REF has an unexpected format: '{}'",
                workflow_ref
            ))
        })
}

/// Key identifying one analysis: `<workflow path>:<job name>`.
pub fn analysis_key(env: &dyn CiEnvironment) -> Result<String> {
    let path = workflow_path(env)?;
    let job = required_var(env, "GITHUB_JOB")?;
    Ok(format!("{}:{}", path, job))
}

/// The workflow run ID, if the environment provides a valid one.
pub fn workflow_run_id(env: &dyn CiEnvironment) -> Result<Option<u64>> {
    let Some(raw) = optional_var(env, "GITHUB_RUN_ID") else {
        return Ok(None);
    };

    match raw.parse::<u64>() {
        Ok(id) if id > 0 => Ok(Some(id)),
        _ => Err(ScanError::UserError(format!(
            "GITHUB_RUN_ID must be a positive integer (found '{}')",
            raw
        ))),
    }
}
