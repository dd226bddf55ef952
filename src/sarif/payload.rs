//! Upload payload assembly.
//!
//! The payload is what the ingestion API receives: the combined SARIF log plus
//! the commit, ref, and workflow identity it belongs to. Sending it is left to
//! the caller.

use super::combine::SarifLog;
use crate::ci::{
    CiEnvironment, CommitResolver, RefOverrides, analysis_key, optional_var, resolve_commit_oid,
    resolve_ref, workflow_run_id,
};
use crate::error::{Result, ScanError};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::OpenOptions;
use std::io::Write;
use tracing::{debug, info};

/// Set once a payload has been produced in the current job.
pub const UPLOAD_SENTINEL_VAR: &str = "SCANHOOK_SARIF_UPLOADED";

/// RFC3339 start time of the analysis, exported by the step that started it.
pub const STARTED_AT_VAR: &str = "SCANHOOK_STARTED_AT";

/// Caller-supplied settings for payload assembly.
#[derive(Debug, Clone)]
pub struct PayloadOptions {
    /// Overrides the analysis name; defaults to the analysis key.
    pub analysis_name: Option<String>,
    /// Upper bound on the combined result count.
    pub max_results: usize,
    /// `file://` URI of the checkout root.
    pub checkout_uri: String,
}

/// Body sent to the results-ingestion API.
#[derive(Debug, Clone, Serialize)]
pub struct UploadPayload {
    pub commit_oid: String,
    #[serde(rename = "ref")]
    pub git_ref: String,
    pub analysis_key: String,
    pub analysis_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workflow_run_id: Option<u64>,
    pub checkout_uri: String,
    pub started_at: DateTime<Utc>,
    pub tool_names: Vec<String>,
    pub sarif: SarifLog,
}

impl UploadPayload {
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ScanError::SarifError(format!("failed to serialize payload: {}", e)))
    }
}

/// Whether a payload was already produced earlier in this job.
pub fn upload_already_done(env: &dyn CiEnvironment) -> bool {
    optional_var(env, UPLOAD_SENTINEL_VAR).is_some_and(|v| v == "true")
}

/// Record that this job produced its payload.
///
/// Appends `SCANHOOK_SARIF_UPLOADED=true` to the file named by `GITHUB_ENV`,
/// which the CI runner loads into the environment of later steps. Returns
/// `false` when there is no such file to write to.
pub fn mark_upload_done(env: &dyn CiEnvironment) -> Result<bool> {
    let Some(env_file) = optional_var(env, "GITHUB_ENV") else {
        return Ok(false);
    };

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&env_file)
        .map_err(|e| {
            ScanError::UserError(format!("failed to open GITHUB_ENV file '{}': {}", env_file, e))
        })?;

    writeln!(file, "{}=true", UPLOAD_SENTINEL_VAR).map_err(|e| {
        ScanError::UserError(format!(
            "failed to write GITHUB_ENV file '{}': {}",
            env_file, e
        ))
    })?;

    debug!(%env_file, "recorded upload sentinel");
    Ok(true)
}

fn started_at(env: &dyn CiEnvironment) -> DateTime<Utc> {
    optional_var(env, STARTED_AT_VAR)
        .and_then(|raw| DateTime::parse_from_rfc3339(&raw).ok())
        .map(|t| t.with_timezone(&Utc))
        .unwrap_or_else(Utc::now)
}

/// Assemble the upload payload for a combined SARIF log.
///
/// # Returns
///
/// * `Ok(UploadPayload)` - The assembled payload
/// * `Err(ScanError::UserError)` - If a payload was already produced in this job
/// * `Err(ScanError::SarifError)` - If the log exceeds `max_results`
/// * `Err(ScanError::EnvError)` - If required CI variables are missing
pub fn build_payload(
    env: &dyn CiEnvironment,
    resolver: &dyn CommitResolver,
    overrides: &RefOverrides,
    sarif: SarifLog,
    options: &PayloadOptions,
) -> Result<UploadPayload> {
    if upload_already_done(env) {
        return Err(ScanError::UserError(format!(
            "SARIF results were already packaged in this job ({} is set); combine all files into one upload",
            UPLOAD_SENTINEL_VAR
        )));
    }

    let result_count = sarif.result_count();
    if result_count > options.max_results {
        return Err(ScanError::SarifError(format!(
            "{} results exceed the limit of {}",
            result_count, options.max_results
        )));
    }
    debug!(result_count, "SARIF result count within limit");

    let git_ref = resolve_ref(env, resolver, overrides)?;
    let commit_oid = resolve_commit_oid(env, resolver, overrides)?;
    let analysis_key = analysis_key(env)?;
    let analysis_name = options
        .analysis_name
        .clone()
        .unwrap_or_else(|| analysis_key.clone());

    info!(%git_ref, %commit_oid, %analysis_key, "assembled upload payload");

    Ok(UploadPayload {
        commit_oid,
        git_ref,
        analysis_key,
        analysis_name,
        workflow_run_id: workflow_run_id(env)?,
        checkout_uri: options.checkout_uri.clone(),
        started_at: started_at(env),
        tool_names: sarif.tool_names(),
        sarif,
    })
}
