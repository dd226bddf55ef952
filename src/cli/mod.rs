//! CLI argument parsing for scanhook.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Scanhook: code-scanning helper for CI jobs.
///
/// Checks that a workflow triggers analysis correctly, resolves the ref
/// being analyzed, and packages SARIF results for upload.
#[derive(Parser, Debug)]
#[command(name = "scanhook")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the config file (default: .scanhook.yaml).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging on stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Available commands for scanhook.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check a workflow file for code-scanning trigger problems.
    ///
    /// Reports missing push/pull_request triggers, push path filters,
    /// mismatched branch filters, and `git checkout HEAD^2` steps.
    CheckWorkflow(CheckWorkflowArgs),

    /// Print the ref that analysis results belong to.
    ResolveRef(ResolveRefArgs),

    /// Combine SARIF files into a single log.
    Combine(CombineArgs),

    /// Combine SARIF files and wrap them in an upload payload.
    Package(PackageArgs),
}

/// Explicit ref and commit, bypassing CI environment lookups.
#[derive(Args, Debug, Clone, Default)]
pub struct RefArgs {
    /// Ref to attribute results to (requires --sha).
    #[arg(long = "ref")]
    pub git_ref: Option<String>,

    /// Commit SHA to attribute results to (requires --ref).
    #[arg(long)]
    pub sha: Option<String>,
}

/// Arguments for the `check-workflow` command.
#[derive(Parser, Debug)]
pub struct CheckWorkflowArgs {
    /// Workflow file to check. Defaults to the config's `workflow_path`,
    /// then to the running workflow from GITHUB_WORKFLOW_REF.
    pub path: Option<PathBuf>,

    /// Exit with a validation failure when issues are found.
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for the `resolve-ref` command.
#[derive(Parser, Debug)]
pub struct ResolveRefArgs {
    #[command(flatten)]
    pub refs: RefArgs,

    /// Checkout to inspect with git (overrides config `checkout_path`).
    #[arg(long)]
    pub checkout_path: Option<PathBuf>,
}

/// Arguments for the `combine` command.
#[derive(Parser, Debug)]
pub struct CombineArgs {
    /// SARIF files or directories to search.
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Write the combined log here instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the `package` command.
#[derive(Parser, Debug)]
pub struct PackageArgs {
    /// SARIF files or directories to search.
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Write the payload here instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub refs: RefArgs,

    /// Checkout to inspect with git (overrides config `checkout_path`).
    #[arg(long)]
    pub checkout_path: Option<PathBuf>,
}
