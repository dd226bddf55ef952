//! Scanhook: code-scanning helper for CI jobs.
//!
//! - [`workflow`] checks that a workflow file triggers analysis correctly
//! - [`ci`] resolves the ref and commit being analyzed
//! - [`sarif`] combines result files and assembles the upload payload

pub mod ci;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod exit_codes;
pub mod git;
pub mod logging;
pub mod sarif;
pub mod workflow;

#[cfg(test)]
mod test_support;
