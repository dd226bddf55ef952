//! Locating SARIF files on disk.

use crate::error::{Result, ScanError};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Build a GlobSet matching `**/*.<ext>` for each extension.
fn build_extension_globset(extensions: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();

    for ext in extensions {
        let pattern = format!("**/*.{}", ext);
        let glob = Glob::new(&pattern).map_err(|e| {
            ScanError::UserError(format!(
                "invalid SARIF extension '{}': {}",
                ext, e
            ))
        })?;
        builder.add(glob);
    }

    builder
        .build()
        .map_err(|e| ScanError::UserError(format!("failed to compile SARIF globs: {}", e)))
}

/// Recursively find SARIF files under `dir`, sorted by path.
pub fn find_sarif_files<P: AsRef<Path>>(dir: P, extensions: &[String]) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let globset = build_extension_globset(extensions)?;

    let mut found = Vec::new();
    walk(dir, &globset, &mut found)?;
    found.sort();

    debug!(dir = %dir.display(), count = found.len(), "found SARIF files");
    Ok(found)
}

fn walk(dir: &Path, globset: &GlobSet, found: &mut Vec<PathBuf>) -> Result<()> {
    let entries = fs::read_dir(dir).map_err(|e| {
        ScanError::UserError(format!(
            "failed to read directory '{}': {}",
            dir.display(),
            e
        ))
    })?;

    for entry in entries {
        let entry = entry.map_err(|e| {
            ScanError::UserError(format!(
                "failed to read directory entry in '{}': {}",
                dir.display(),
                e
            ))
        })?;
        let path = entry.path();
        let file_type = entry.file_type().map_err(|e| {
            ScanError::UserError(format!(
                "failed to read file type of '{}': {}",
                path.display(),
                e
            ))
        })?;

        // Symlinked directories are not followed, so a link to an ancestor
        // cannot loop the walk.
        if file_type.is_dir() {
            walk(&path, globset, found)?;
        } else if globset.is_match(&path) {
            found.push(path);
        }
    }

    Ok(())
}

/// Expand command-line inputs into a list of SARIF files.
///
/// Directories are searched recursively; files are taken as given, whatever
/// their extension.
///
/// # Returns
///
/// * `Ok(Vec<PathBuf>)` - At least one SARIF file
/// * `Err(ScanError::UserError)` - If a path does not exist or nothing was found
pub fn collect_sarif_inputs(paths: &[PathBuf], extensions: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_dir() {
            files.extend(find_sarif_files(path, extensions)?);
        } else if path.is_file() {
            files.push(path.clone());
        } else {
            return Err(ScanError::UserError(format!(
                "path does not exist: {}",
                path.display()
            )));
        }
    }

    if files.is_empty() {
        return Err(ScanError::UserError(format!(
            "no SARIF files found (looked for extensions: {})",
            extensions.join(", ")
        )));
    }

    Ok(files)
}
