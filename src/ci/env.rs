//! CI environment lookups.

use crate::error::{Result, ScanError};
use std::collections::HashMap;

/// Source of CI environment variables.
pub trait CiEnvironment {
    /// Look up a variable. Unset variables are `None`.
    fn var(&self, name: &str) -> Option<String>;
}

/// Reads variables from the process environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnvironment;

impl CiEnvironment for ProcessEnvironment {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// In-memory environment, used for overrides and tests.
#[derive(Debug, Default, Clone)]
pub struct MapEnvironment {
    vars: HashMap<String, String>,
}

impl MapEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }
}

impl CiEnvironment for MapEnvironment {
    fn var(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}

/// Look up a variable that must be set and non-empty.
///
/// # Returns
///
/// * `Ok(String)` - The variable's value
/// * `Err(ScanError::EnvError)` - If the variable is unset or empty
pub fn required_var(env: &dyn CiEnvironment, name: &str) -> Result<String> {
    match env.var(name) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(ScanError::EnvError(name.to_string())),
    }
}

/// Look up a variable, treating empty values as unset.
pub fn optional_var(env: &dyn CiEnvironment, name: &str) -> Option<String> {
    env.var(name).filter(|value| !value.is_empty())
}
