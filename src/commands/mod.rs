//! Command implementations for scanhook.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations. Each command loads its inputs, calls into the library
//! modules, and prints results to stdout.

mod check_workflow;
mod package;
mod resolve_ref;

use crate::cli::{Cli, Command, CombineArgs, RefArgs};
use crate::ci::RefOverrides;
use crate::config::{Config, DEFAULT_CONFIG_FILE};
use crate::error::{Result, ScanError};
use crate::sarif::{collect_sarif_inputs, combine_sarif_files};
use std::path::{Path, PathBuf};
use tracing::info;

pub use check_workflow::cmd_check_workflow;
pub use package::cmd_package;
pub use resolve_ref::cmd_resolve_ref;

/// Dispatch a command to its implementation.
///
/// Loads the config (explicit `--config`, or `.scanhook.yaml` when present)
/// and routes to the command handler.
pub fn dispatch(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::load_or_default(DEFAULT_CONFIG_FILE)?,
    };

    match cli.command {
        Command::CheckWorkflow(args) => cmd_check_workflow(args, &config),
        Command::ResolveRef(args) => cmd_resolve_ref(args, &config),
        Command::Combine(args) => cmd_combine(args, &config),
        Command::Package(args) => cmd_package(args, &config),
    }
}

fn cmd_combine(args: CombineArgs, config: &Config) -> Result<()> {
    let files = collect_sarif_inputs(&args.paths, &config.sarif_extensions)?;
    let combined = combine_sarif_files(&files)?;
    write_output(args.output.as_deref(), &combined.to_json()?)
}

// ============================================================================
// Shared helpers
// ============================================================================

impl From<RefArgs> for RefOverrides {
    fn from(args: RefArgs) -> Self {
        Self {
            git_ref: args.git_ref,
            sha: args.sha,
        }
    }
}

/// The checkout path from the command line, falling back to config.
fn checkout_path(arg: Option<PathBuf>, config: &Config) -> PathBuf {
    arg.unwrap_or_else(|| PathBuf::from(&config.checkout_path))
}

/// Write command output to a file, or stdout when no file is given.
fn write_output(output: Option<&Path>, content: &str) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, format!("{}\n", content)).map_err(|e| {
                ScanError::UserError(format!(
                    "failed to write output file '{}': {}",
                    path.display(),
                    e
                ))
            })?;
            info!(path = %path.display(), "wrote output");
            Ok(())
        }
        None => {
            println!("{}", content);
            Ok(())
        }
    }
}
