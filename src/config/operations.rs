//! Config loading, validation, and utility operations.

use super::model::Config;
use crate::error::{Result, ScanError};
use std::path::Path;
use tracing::debug;

impl Config {
    /// Load config from a YAML file.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    ///
    /// # Returns
    ///
    /// * `Ok(Config)` - Successfully loaded and validated config
    /// * `Err(ScanError::UserError)` - Read error, parse error, or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            ScanError::UserError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Load config from `path` if it exists, otherwise use defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            debug!(path = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Parse config from a YAML string.
    ///
    /// An empty document yields the defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = if yaml.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(yaml)
                .map_err(|e| ScanError::UserError(format!("failed to parse config YAML: {}", e)))?
        };

        config.validate()?;
        Ok(config)
    }

    /// Serialize config to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| ScanError::UserError(format!("failed to serialize config to YAML: {}", e)))
    }

    /// Validate config values and return error on invalid values.
    ///
    /// Validation rules:
    /// - `max_results` must be positive
    /// - `sarif_extensions` must be non-empty, entries non-empty with no leading dots
    /// - `checkout_path` must be non-empty
    pub fn validate(&self) -> Result<()> {
        if self.max_results == 0 {
            return Err(ScanError::UserError(
                "config validation failed: max_results must be greater than 0".to_string(),
            ));
        }

        if self.checkout_path.trim().is_empty() {
            return Err(ScanError::UserError(
                "config validation failed: checkout_path must not be empty".to_string(),
            ));
        }

        if self.sarif_extensions.is_empty() {
            return Err(ScanError::UserError(
                "config validation failed: sarif_extensions must list at least one extension"
                    .to_string(),
            ));
        }

        for ext in &self.sarif_extensions {
            if ext.is_empty() {
                return Err(ScanError::UserError(
                    "config validation failed: sarif_extensions entries must be non-empty"
                        .to_string(),
                ));
            }
            if ext.starts_with('.') {
                return Err(ScanError::UserError(format!(
                    "config validation failed: sarif_extensions entries must not have leading dots (found '{}'). Use '{}' instead.",
                    ext,
                    ext.trim_start_matches('.')
                )));
            }
        }

        Ok(())
    }
}
