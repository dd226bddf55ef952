//! Exit code constants for the scanhook CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, unreadable input, invalid config)
//! - 2: Workflow validation failure (only under `--strict`)
//! - 3: Git operation failure
//! - 4: Required CI environment variable missing
//! - 5: Invalid or inconsistent SARIF input

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, unreadable files, or invalid configuration.
pub const USER_ERROR: i32 = 1;

/// Workflow validation failure: the workflow has diagnostics and strict mode is on.
pub const VALIDATION_FAILURE: i32 = 2;

/// Git operation failure: `rev-parse` or repository detection errors.
pub const GIT_FAILURE: i32 = 3;

/// Environment failure: a required CI variable is unset or empty.
pub const ENV_FAILURE: i32 = 4;

/// SARIF failure: malformed documents, mismatched versions, too many results.
pub const SARIF_FAILURE: i32 = 5;
