//! Error types for the scanhook CLI.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.
//! Workflow diagnostics are not errors: the validator returns them as data and
//! only the `check-workflow --strict` path turns them into `ValidationError`.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for scanhook operations.
#[derive(Error, Debug)]
pub enum ScanError {
    /// Invalid arguments, unreadable input files, or invalid configuration.
    #[error("{0}")]
    UserError(String),

    /// The workflow has diagnostics and the caller asked for a hard failure.
    #[error("Workflow validation failed: {0}")]
    ValidationError(String),

    /// Git operation failed.
    #[error("Git operation failed: {0}")]
    GitError(String),

    /// A required CI environment variable is missing or empty.
    #[error("{0} environment variable must be set")]
    EnvError(String),

    /// SARIF input is malformed or cannot be combined.
    #[error("Invalid SARIF: {0}")]
    SarifError(String),
}

impl ScanError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            ScanError::UserError(_) => exit_codes::USER_ERROR,
            ScanError::ValidationError(_) => exit_codes::VALIDATION_FAILURE,
            ScanError::GitError(_) => exit_codes::GIT_FAILURE,
            ScanError::EnvError(_) => exit_codes::ENV_FAILURE,
            ScanError::SarifError(_) => exit_codes::SARIF_FAILURE,
        }
    }
}

/// Result type alias for scanhook operations.
pub type Result<T> = std::result::Result<T, ScanError>;
