//! CI runtime collaborators: environment variables and the VCS.

mod env;
mod refs;


// Re-export public API
pub use env::{CiEnvironment, MapEnvironment, ProcessEnvironment, optional_var, required_var};
pub use refs::{
    CommitResolver, GitCommitResolver, RefOverrides, analysis_key, resolve_commit_oid,
    resolve_ref, workflow_path, workflow_run_id,
};
