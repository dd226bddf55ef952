//! `resolve-ref`: print the ref that analysis results belong to.

use super::checkout_path;
use crate::ci::{GitCommitResolver, ProcessEnvironment, RefOverrides, resolve_ref};
use crate::cli::ResolveRefArgs;
use crate::config::Config;
use crate::error::Result;

pub fn cmd_resolve_ref(args: ResolveRefArgs, config: &Config) -> Result<()> {
    let resolver = GitCommitResolver::new(checkout_path(args.checkout_path, config));
    let overrides = RefOverrides::from(args.refs);

    let git_ref = resolve_ref(&ProcessEnvironment, &resolver, &overrides)?;
    println!("{}", git_ref);
    Ok(())
}
