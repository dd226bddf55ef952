//! Config struct definition and default implementation.

use super::types::*;
use serde::{Deserialize, Serialize};

/// Configuration for scanhook.
///
/// This struct represents the contents of `.scanhook.yaml`.
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // =========================================================================
    // Workflow settings
    // =========================================================================
    /// Workflow file checked by `check-workflow` when no path is given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow_path: Option<String>,

    /// Treat workflow diagnostics as a failure (same as `--strict`).
    #[serde(default)]
    pub fail_on_workflow_errors: bool,

    // =========================================================================
    // Checkout settings
    // =========================================================================
    /// Path of the analyzed checkout, used for `git rev-parse` and the checkout URI.
    #[serde(default = "default_checkout_path")]
    pub checkout_path: String,

    // =========================================================================
    // SARIF settings
    // =========================================================================
    /// File extensions treated as SARIF when searching directories (no leading dots).
    #[serde(default = "default_sarif_extensions")]
    pub sarif_extensions: Vec<String>,

    /// Maximum number of results accepted in one upload.
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    /// Analysis name override; defaults to the analysis key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis_name: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            workflow_path: None,
            fail_on_workflow_errors: false,
            checkout_path: default_checkout_path(),
            sarif_extensions: default_sarif_extensions(),
            max_results: default_max_results(),
            analysis_name: None,
        }
    }
}
