//! Output directory garbage collection
//!
//! After a build the output directory must hold exactly manifest.json,
//! version.json and one file per manifest entry. Everything else at the
//! top level (archives with old hashes, stray temp files) is deleted.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::common::fs::{list_files, remove_file};
use crate::error::Result;
use crate::manifest::{MANIFEST_FILE, ManifestIndex, VERSION_FILE};

/// File names that must exist in the output directory for `manifest`
pub fn expected_files(manifest: &ManifestIndex) -> HashSet<String> {
    let mut expected: HashSet<String> = manifest.bundles().iter().map(|b| b.file_name()).collect();
    expected.insert(MANIFEST_FILE.to_string());
    expected.insert(VERSION_FILE.to_string());
    expected
}

/// Delete every file in `output_dir` the manifest does not reference
///
/// Returns the deleted paths, sorted. Subdirectories are left alone.
pub fn reconcile(output_dir: &Path, manifest: &ManifestIndex) -> Result<Vec<PathBuf>> {
    let expected = expected_files(manifest);
    let mut removed = Vec::new();

    for path in list_files(output_dir)? {
        let keep = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| expected.contains(name));
        if keep {
            continue;
        }

        tracing::debug!(path = %path.display(), "removing stale output file");
        remove_file(&path)?;
        removed.push(path);
    }

    if !removed.is_empty() {
        tracing::info!(count = removed.len(), "removed stale files from output");
    }
    Ok(removed)
}
