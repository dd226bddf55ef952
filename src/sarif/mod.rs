//! SARIF result handling.
//!
//! - Discovery: find result files under directories by extension
//! - Combination: merge runs from several logs that share one SARIF version
//! - Payload: attach commit, ref, and workflow identity for upload

mod combine;
mod files;
mod payload;

#[cfg(test)]
mod tests;

// Re-export public API
pub use combine::{SarifLog, combine_sarif_files, parse_sarif};
pub use files::{collect_sarif_inputs, find_sarif_files};
pub use payload::{
    PayloadOptions, STARTED_AT_VAR, UPLOAD_SENTINEL_VAR, UploadPayload, build_payload,
    mark_upload_done, upload_already_done,
};
