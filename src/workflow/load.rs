//! Reading workflow files from disk.

use super::types::WorkflowError;
use super::validator::validate_workflow;
use crate::error::{Result, ScanError};
use serde_yaml::Value;
use std::path::Path;

/// Load a workflow file as an untyped YAML document.
///
/// Any well-formed YAML is accepted, including documents with no `on` key;
/// shape problems are left to [`validate_workflow`].
///
/// # Returns
///
/// * `Ok(Value)` - The parsed document
/// * `Err(ScanError::UserError)` - If the file cannot be read or is not YAML
pub fn load_workflow<P: AsRef<Path>>(path: P) -> Result<Value> {
    let path = path.as_ref();

    let content = std::fs::read_to_string(path).map_err(|e| {
        ScanError::UserError(format!(
            "failed to read workflow file '{}': {}",
            path.display(),
            e
        ))
    })?;

    serde_yaml::from_str(&content).map_err(|e| {
        ScanError::UserError(format!(
            "failed to parse workflow file '{}': {}",
            path.display(),
            e
        ))
    })
}

/// Load and validate a workflow file.
pub fn workflow_errors_for<P: AsRef<Path>>(path: P) -> Result<Vec<WorkflowError>> {
    let doc = load_workflow(path)?;
    Ok(validate_workflow(&doc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn loads_and_validates_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("codeql.yml");
        std::fs::write(
            &path,
            "on:\n  push:\n    branches: [main]\n  pull_request:\n    branches: [feature]\n",
        )
        .unwrap();

        let errors = workflow_errors_for(&path).unwrap();
        assert_eq!(errors, vec![WorkflowError::MismatchedBranches]);
    }

    #[test]
    fn missing_file_is_user_error() {
        let temp_dir = TempDir::new().unwrap();
        let err = load_workflow(temp_dir.path().join("nope.yml")).unwrap_err();
        assert!(matches!(err, ScanError::UserError(_)));
        assert!(err.to_string().contains("failed to read workflow file"));
    }

    #[test]
    fn invalid_yaml_is_user_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.yml");
        std::fs::write(&path, "on: [push\n").unwrap();

        let err = load_workflow(&path).unwrap_err();
        assert!(matches!(err, ScanError::UserError(_)));
        assert!(err.to_string().contains("failed to parse workflow file"));
    }

    #[test]
    fn empty_file_reports_missing_hooks() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("empty.yml");
        std::fs::write(&path, "").unwrap();

        let errors = workflow_errors_for(&path).unwrap();
        assert_eq!(errors, vec![WorkflowError::MissingHooks]);
    }
}
