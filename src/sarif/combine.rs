//! Combining several SARIF logs into one.

use crate::error::{Result, ScanError};
use serde::Serialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// A combined SARIF log: one version, every run from every input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SarifLog {
    #[serde(rename = "$schema", skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    pub version: String,
    pub runs: Vec<Value>,
}

impl SarifLog {
    /// Distinct `runs[].tool.driver.name` values, in order of first appearance.
    pub fn tool_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();

        for run in &self.runs {
            let name = run
                .get("tool")
                .and_then(|tool| tool.get("driver"))
                .and_then(|driver| driver.get("name"))
                .and_then(Value::as_str);

            match name {
                Some(name) if !names.iter().any(|n| n == name) => names.push(name.to_string()),
                _ => {}
            }
        }

        names
    }

    /// Total number of results across all runs.
    pub fn result_count(&self) -> usize {
        self.runs
            .iter()
            .filter_map(|run| run.get("results"))
            .filter_map(Value::as_array)
            .map(Vec::len)
            .sum()
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ScanError::SarifError(format!("failed to serialize SARIF: {}", e)))
    }
}

/// Parse one SARIF document and check the fields combination relies on.
pub fn parse_sarif(content: &str, origin: &Path) -> Result<SarifLog> {
    let doc: Value = serde_json::from_str(content).map_err(|e| {
        ScanError::SarifError(format!("{} is not valid JSON: {}", origin.display(), e))
    })?;

    let Some(object) = doc.as_object() else {
        return Err(ScanError::SarifError(format!(
            "{} must contain a JSON object",
            origin.display()
        )));
    };

    let version = object
        .get("version")
        .and_then(Value::as_str)
        .ok_or_else(|| {
            ScanError::SarifError(format!(
                "{} has no string 'version' field",
                origin.display()
            ))
        })?
        .to_string();

    let runs = object
        .get("runs")
        .and_then(Value::as_array)
        .ok_or_else(|| {
            ScanError::SarifError(format!("{} has no 'runs' array", origin.display()))
        })?
        .clone();

    let schema = object
        .get("$schema")
        .and_then(Value::as_str)
        .map(str::to_string);

    Ok(SarifLog {
        schema,
        version,
        runs,
    })
}

/// Combine SARIF files into a single log.
///
/// All inputs must share one SARIF version; runs are concatenated in input order.
///
/// # Returns
///
/// * `Ok(SarifLog)` - The combined log
/// * `Err(ScanError::UserError)` - If a file cannot be read or the list is empty
/// * `Err(ScanError::SarifError)` - If a file is malformed or versions differ
pub fn combine_sarif_files(files: &[PathBuf]) -> Result<SarifLog> {
    let mut combined: Option<SarifLog> = None;

    for file in files {
        let content = std::fs::read_to_string(file).map_err(|e| {
            ScanError::UserError(format!(
                "failed to read SARIF file '{}': {}",
                file.display(),
                e
            ))
        })?;
        let log = parse_sarif(&content, file)?;

        if log.runs.is_empty() {
            warn!(file = %file.display(), "SARIF file has no runs");
        }

        match combined.as_mut() {
            None => combined = Some(log),
            Some(acc) => {
                if acc.version != log.version {
                    return Err(ScanError::SarifError(format!(
                        "Different SARIF versions encountered: {} and {}",
                        acc.version, log.version
                    )));
                }
                if acc.schema.is_none() {
                    acc.schema = log.schema;
                }
                acc.runs.extend(log.runs);
            }
        }
    }

    let combined = combined
        .ok_or_else(|| ScanError::UserError("no SARIF files to combine".to_string()))?;

    info!(
        files = files.len(),
        runs = combined.runs.len(),
        "combined SARIF files"
    );
    Ok(combined)
}
