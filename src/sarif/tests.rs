//! Tests for SARIF discovery, combination, and payload assembly.

use super::*;
use crate::ci::{CommitResolver, MapEnvironment, RefOverrides};
use crate::error::{Result, ScanError};
use serde_json::json;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const SHA: &str = "abcdefabcdefabcdefabcdefabcdefabcdefabcd";

fn sarif_doc(version: &str, tool: &str, results: usize) -> String {
    let results: Vec<_> = (0..results)
        .map(|i| json!({"ruleId": format!("R{}", i), "message": {"text": "x"}}))
        .collect();
    json!({
        "$schema": "https://json.schemastore.org/sarif-2.1.0.json",
        "version": version,
        "runs": [{"tool": {"driver": {"name": tool}}, "results": results}]
    })
    .to_string()
}

fn write(dir: &Path, rel: &str, content: &str) -> PathBuf {
    let path = dir.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
    path
}

fn sarif_extensions() -> Vec<String> {
    vec!["sarif".to_string()]
}

// =========================================================================
// Discovery
// =========================================================================

#[test]
fn test_find_sarif_files_recursive_and_sorted() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    write(dir, "b.sarif", "{}");
    write(dir, "nested/deeper/a.sarif", "{}");
    write(dir, "a.sarif", "{}");
    write(dir, "notes.txt", "{}");
    write(dir, "nested/c.json", "{}");

    let files = find_sarif_files(dir, &sarif_extensions()).unwrap();

    assert_eq!(
        files,
        vec![
            dir.join("a.sarif"),
            dir.join("b.sarif"),
            dir.join("nested/deeper/a.sarif"),
        ]
    );
}

#[cfg(unix)]
#[test]
fn test_find_sarif_files_does_not_follow_directory_links() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    write(dir, "nested/a.sarif", "{}");
    std::os::unix::fs::symlink(dir, dir.join("nested/loop")).unwrap();

    let files = find_sarif_files(dir, &sarif_extensions()).unwrap();
    assert_eq!(files, vec![dir.join("nested/a.sarif")]);
}

#[test]
fn test_find_sarif_files_multiple_extensions() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    write(dir, "a.sarif", "{}");
    write(dir, "b.sarif.json", "{}");

    let extensions = vec!["sarif".to_string(), "sarif.json".to_string()];
    let files = find_sarif_files(dir, &extensions).unwrap();
    assert_eq!(files.len(), 2);
}

#[test]
fn test_collect_inputs_mixes_files_and_dirs() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    let explicit = write(dir, "explicit.json", "{}");
    write(dir, "results/x.sarif", "{}");

    let files =
        collect_sarif_inputs(&[explicit.clone(), dir.join("results")], &sarif_extensions())
            .unwrap();
    assert_eq!(files, vec![explicit, dir.join("results/x.sarif")]);
}

#[test]
fn test_collect_inputs_missing_path_fails() {
    let temp_dir = TempDir::new().unwrap();
    let err = collect_sarif_inputs(&[temp_dir.path().join("missing")], &sarif_extensions())
        .unwrap_err();
    assert!(matches!(err, ScanError::UserError(_)));
    assert!(err.to_string().contains("path does not exist"));
}

#[test]
fn test_collect_inputs_empty_dir_fails() {
    let temp_dir = TempDir::new().unwrap();
    let err =
        collect_sarif_inputs(&[temp_dir.path().to_path_buf()], &sarif_extensions()).unwrap_err();
    assert!(err.to_string().contains("no SARIF files found"));
}

// =========================================================================
// Combination
// =========================================================================

#[test]
fn test_combine_concatenates_runs_in_order() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    let a = write(dir, "a.sarif", &sarif_doc("2.1.0", "CodeQL", 2));
    let b = write(dir, "b.sarif", &sarif_doc("2.1.0", "clippy", 1));
    let c = write(dir, "c.sarif", &sarif_doc("2.1.0", "CodeQL", 0));

    let combined = combine_sarif_files(&[a, b, c]).unwrap();

    assert_eq!(combined.version, "2.1.0");
    assert_eq!(combined.runs.len(), 3);
    assert_eq!(combined.result_count(), 3);
    assert_eq!(combined.tool_names(), vec!["CodeQL", "clippy"]);
    assert_eq!(
        combined.schema.as_deref(),
        Some("https://json.schemastore.org/sarif-2.1.0.json")
    );
}

#[test]
fn test_combine_rejects_mismatched_versions() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    let a = write(dir, "a.sarif", &sarif_doc("2.1.0", "CodeQL", 0));
    let b = write(dir, "b.sarif", &sarif_doc("2.0.0", "CodeQL", 0));

    let err = combine_sarif_files(&[a, b]).unwrap_err();
    assert!(matches!(err, ScanError::SarifError(_)));
    assert!(
        err.to_string()
            .contains("Different SARIF versions encountered: 2.1.0 and 2.0.0")
    );
}

#[test]
fn test_combine_rejects_malformed_documents() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();

    let cases = [
        ("not_json.sarif", "{"),
        ("array.sarif", "[]"),
        ("no_version.sarif", r#"{"runs": []}"#),
        ("numeric_version.sarif", r#"{"version": 2, "runs": []}"#),
        ("no_runs.sarif", r#"{"version": "2.1.0"}"#),
        ("object_runs.sarif", r#"{"version": "2.1.0", "runs": {}}"#),
    ];

    for (name, content) in cases {
        let path = write(dir, name, content);
        let err = combine_sarif_files(&[path]).unwrap_err();
        assert!(
            matches!(err, ScanError::SarifError(_)),
            "{} produced {:?}",
            name,
            err
        );
    }
}

#[test]
fn test_combine_empty_list_fails() {
    let err = combine_sarif_files(&[]).unwrap_err();
    assert!(matches!(err, ScanError::UserError(_)));
}

#[test]
fn test_tool_names_skip_runs_without_driver() {
    let log = parse_sarif(
        r#"{"version": "2.1.0", "runs": [{"results": []}, {"tool": {"driver": {"name": "eslint"}}}]}"#,
        Path::new("inline.sarif"),
    )
    .unwrap();
    assert_eq!(log.tool_names(), vec!["eslint"]);
    assert_eq!(log.result_count(), 0);
    assert_eq!(log.schema, None);
}

// =========================================================================
// Payload
// =========================================================================

struct FixedHead;

impl CommitResolver for FixedHead {
    fn commit_oid(&self, _rev: &str) -> Result<String> {
        Ok(SHA.to_string())
    }
}

fn ci_env() -> MapEnvironment {
    MapEnvironment::new()
        .with("GITHUB_REF", "refs/heads/main")
        .with("GITHUB_SHA", SHA)
        .with(
            "GITHUB_WORKFLOW_REF",
            "octo/hello/.github/workflows/codeql.yml@refs/heads/main",
        )
        .with("GITHUB_JOB", "analyze")
        .with("GITHUB_RUN_ID", "42")
}

fn options() -> PayloadOptions {
    PayloadOptions {
        analysis_name: None,
        max_results: 10,
        checkout_uri: "file:///work/hello".to_string(),
    }
}

fn combined_log(results: usize) -> SarifLog {
    parse_sarif(&sarif_doc("2.1.0", "CodeQL", results), Path::new("x.sarif")).unwrap()
}

#[test]
fn test_build_payload_fills_identity() {
    let payload = build_payload(
        &ci_env(),
        &FixedHead,
        &RefOverrides::default(),
        combined_log(2),
        &options(),
    )
    .unwrap();

    assert_eq!(payload.commit_oid, SHA);
    assert_eq!(payload.git_ref, "refs/heads/main");
    assert_eq!(payload.analysis_key, ".github/workflows/codeql.yml:analyze");
    assert_eq!(payload.analysis_name, payload.analysis_key);
    assert_eq!(payload.workflow_run_id, Some(42));
    assert_eq!(payload.tool_names, vec!["CodeQL"]);

    let json: serde_json::Value = serde_json::from_str(&payload.to_json().unwrap()).unwrap();
    assert_eq!(json["ref"], "refs/heads/main");
    assert_eq!(json["sarif"]["version"], "2.1.0");
    assert_eq!(json["checkout_uri"], "file:///work/hello");
}

#[test]
fn test_build_payload_uses_exported_start_time() {
    let env = ci_env().with(STARTED_AT_VAR, "2026-01-02T03:04:05Z");
    let payload = build_payload(
        &env,
        &FixedHead,
        &RefOverrides::default(),
        combined_log(0),
        &options(),
    )
    .unwrap();
    assert_eq!(payload.started_at.to_rfc3339(), "2026-01-02T03:04:05+00:00");
}

#[test]
fn test_build_payload_analysis_name_override() {
    let mut opts = options();
    opts.analysis_name = Some("nightly".to_string());
    let payload = build_payload(
        &ci_env(),
        &FixedHead,
        &RefOverrides::default(),
        combined_log(0),
        &opts,
    )
    .unwrap();
    assert_eq!(payload.analysis_name, "nightly");
}

#[test]
fn test_build_payload_rejects_too_many_results() {
    let err = build_payload(
        &ci_env(),
        &FixedHead,
        &RefOverrides::default(),
        combined_log(11),
        &options(),
    )
    .unwrap_err();
    assert!(matches!(err, ScanError::SarifError(_)));
}

#[test]
fn test_build_payload_only_once_per_job() {
    let env = ci_env().with(UPLOAD_SENTINEL_VAR, "true");
    assert!(upload_already_done(&env));

    let err = build_payload(
        &env,
        &FixedHead,
        &RefOverrides::default(),
        combined_log(0),
        &options(),
    )
    .unwrap_err();
    assert!(matches!(err, ScanError::UserError(_)));
}

#[test]
fn test_build_payload_requires_job_identity() {
    let env = MapEnvironment::new()
        .with("GITHUB_REF", "refs/heads/main")
        .with("GITHUB_SHA", SHA);
    let err = build_payload(
        &env,
        &FixedHead,
        &RefOverrides::default(),
        combined_log(0),
        &options(),
    )
    .unwrap_err();
    assert!(matches!(err, ScanError::EnvError(ref name) if name == "GITHUB_WORKFLOW_REF"));
}

#[test]
fn test_mark_upload_done_appends_to_github_env() {
    let temp_dir = TempDir::new().unwrap();
    let env_file = temp_dir.path().join("github_env");
    std::fs::write(&env_file, "EXISTING=1\n").unwrap();

    let env = ci_env().with("GITHUB_ENV", env_file.to_string_lossy().to_string());
    assert!(mark_upload_done(&env).unwrap());

    let content = std::fs::read_to_string(&env_file).unwrap();
    assert_eq!(content, "EXISTING=1\nSCANHOOK_SARIF_UPLOADED=true\n");
}

#[test]
fn test_mark_upload_done_without_github_env() {
    assert!(!mark_upload_done(&ci_env()).unwrap());
}
