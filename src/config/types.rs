//! Configuration defaults for scanhook.

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = ".scanhook.yaml";

/// Default file extensions treated as SARIF when searching directories.
pub fn default_sarif_extensions() -> Vec<String> {
    vec!["sarif".to_string()]
}

// Default value functions for serde
pub(crate) fn default_checkout_path() -> String {
    ".".to_string()
}
pub(crate) fn default_max_results() -> usize {
    25_000
}
