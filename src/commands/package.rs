//! `package`: combine SARIF files into an upload payload.

use super::{checkout_path, write_output};
use crate::ci::{CiEnvironment, CommitResolver, GitCommitResolver, ProcessEnvironment, RefOverrides};
use crate::cli::PackageArgs;
use crate::config::Config;
use crate::error::{Result, ScanError};
use crate::sarif::{
    PayloadOptions, UploadPayload, build_payload, collect_sarif_inputs, combine_sarif_files,
    mark_upload_done,
};
use std::path::Path;
use tracing::info;

pub fn cmd_package(args: PackageArgs, config: &Config) -> Result<()> {
    let checkout = checkout_path(args.checkout_path.clone(), config);
    let resolver = GitCommitResolver::new(&checkout);

    let payload = assemble(&args, config, &checkout, &ProcessEnvironment, &resolver)?;
    write_output(args.output.as_deref(), &payload.to_json()?)?;

    if mark_upload_done(&ProcessEnvironment)? {
        info!("marked SARIF upload as done for this job");
    }
    Ok(())
}

fn assemble(
    args: &PackageArgs,
    config: &Config,
    checkout: &Path,
    env: &dyn CiEnvironment,
    resolver: &dyn CommitResolver,
) -> Result<UploadPayload> {
    let files = collect_sarif_inputs(&args.paths, &config.sarif_extensions)?;
    let sarif = combine_sarif_files(&files)?;

    let options = PayloadOptions {
        analysis_name: config.analysis_name.clone(),
        max_results: config.max_results,
        checkout_uri: checkout_uri(checkout)?,
    };

    build_payload(
        env,
        resolver,
        &RefOverrides::from(args.refs.clone()),
        sarif,
        &options,
    )
}

/// `file://` URI of the canonicalized checkout root.
fn checkout_uri(checkout: &Path) -> Result<String> {
    let absolute = checkout.canonicalize().map_err(|e| {
        ScanError::UserError(format!(
            "checkout path '{}' is not accessible: {}",
            checkout.display(),
            e
        ))
    })?;
    Ok(format!("file://{}", absolute.display()))
}
