//! `check-workflow`: report code-scanning trigger problems in a workflow file.

use crate::ci::{CiEnvironment, ProcessEnvironment, workflow_path};
use crate::cli::CheckWorkflowArgs;
use crate::config::Config;
use crate::error::{Result, ScanError};
use crate::workflow::{
    WorkflowError, format_workflow_cause, format_workflow_errors, workflow_errors_for,
};
use std::path::PathBuf;
use tracing::debug;

pub fn cmd_check_workflow(args: CheckWorkflowArgs, config: &Config) -> Result<()> {
    let path = target_path(args.path, config, &ProcessEnvironment)?;
    debug!(path = %path.display(), "checking workflow");

    let errors = workflow_errors_for(&path)?;
    print!("{}", render_report(&errors));

    if !(args.strict || config.fail_on_workflow_errors) {
        return Ok(());
    }

    match format_workflow_cause(&errors) {
        Some(cause) => Err(ScanError::ValidationError(cause)),
        None => Ok(()),
    }
}

/// Pick the workflow file: argument, then config, then the running workflow.
fn target_path(
    arg: Option<PathBuf>,
    config: &Config,
    env: &dyn CiEnvironment,
) -> Result<PathBuf> {
    if let Some(path) = arg {
        return Ok(path);
    }
    if let Some(path) = &config.workflow_path {
        return Ok(PathBuf::from(path));
    }

    let relative = workflow_path(env).map_err(|_| {
        ScanError::UserError(
            "no workflow file given; pass a path, set workflow_path in the config, or run inside a CI job"
                .to_string(),
        )
    })?;
    Ok(PathBuf::from(&config.checkout_path).join(relative))
}

fn render_report(errors: &[WorkflowError]) -> String {
    match format_workflow_cause(errors) {
        None => "No issues detected with this workflow.\n".to_string(),
        Some(cause) => format!("{}cause: {}\n", format_workflow_errors(errors), cause),
    }
}
