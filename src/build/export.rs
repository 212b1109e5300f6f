//! Export of a tag-selected subset of a build
//!
//! Copies the bundles carrying any selected tag, plus everything they
//! depend on, into another directory together with a manifest listing only
//! what was copied. With no tags the whole output directory is copied.

use std::collections::HashSet;
use std::path::Path;

use crate::common::fs::{copy_dir_recursive, copy_file, ensure_dir};
use crate::common::path_normalizer::normalize_root;
use crate::error::{BuildStage, Result, build_failed};
use crate::error::fs::write_error;
use crate::manifest::{BundleInfo, ManifestData, ManifestIndex, VersionInfo, build_timestamp};

/// What an export copied
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportSummary {
    /// Bundle names copied, in manifest order
    pub copied: Vec<String>,
    /// Selected bundles whose file was absent from the output directory
    pub missing: Vec<String>,
    /// Whether the output directory was copied as a whole
    pub full_copy: bool,
}

/// Export `output_dir` into `dest`, clearing `dest` first
pub fn export<S: AsRef<str>>(output_dir: &Path, dest: &Path, tags: &[S]) -> Result<ExportSummary> {
    if overlaps(output_dir, dest) {
        return Err(build_failed(
            BuildStage::Export,
            format!(
                "destination {} overlaps the build output directory",
                dest.display()
            ),
        ));
    }

    let manifest = ManifestIndex::load(output_dir)?;

    if tags.is_empty() {
        clear_dir(dest)?;
        copy_dir_recursive(output_dir, dest)?;
        tracing::info!(dest = %dest.display(), "copied full output");
        return Ok(ExportSummary {
            copied: manifest.bundles().iter().map(|b| b.bundle_name.clone()).collect(),
            missing: Vec::new(),
            full_copy: true,
        });
    }

    let selected = select(&manifest, tags);

    clear_dir(dest)?;

    let mut summary = ExportSummary::default();
    let mut copied: HashSet<&str> = HashSet::new();
    for bundle in &selected {
        let source = output_dir.join(bundle.file_name());
        if !source.is_file() {
            tracing::warn!(bundle = %bundle.bundle_name, file = %source.display(), "bundle file missing, not exported");
            summary.missing.push(bundle.bundle_name.clone());
            continue;
        }
        copy_file(&source, &dest.join(bundle.file_name()))?;
        copied.insert(bundle.bundle_name.as_str());
        summary.copied.push(bundle.bundle_name.clone());
    }

    let pruned = prune(&manifest, &copied);
    pruned.write(dest)?;

    let previous = VersionInfo::load(output_dir).ok();
    let (min_app_version, force_update) = previous.map_or_else(
        || (manifest.version().to_string(), false),
        |v| (v.min_app_version, v.force_update),
    );
    VersionInfo::for_manifest(
        &dest.join(crate::manifest::MANIFEST_FILE),
        &pruned.version,
        &build_timestamp(),
        &min_app_version,
        force_update,
    )?
    .write(dest)?;

    tracing::info!(
        dest = %dest.display(),
        bundles = summary.copied.len(),
        "exported tagged bundles"
    );
    Ok(summary)
}

/// Bundles carrying any of `tags` and their dependency closure, in
/// manifest order
pub fn select<'m, S: AsRef<str>>(manifest: &'m ManifestIndex, tags: &[S]) -> Vec<&'m BundleInfo> {
    let mut wanted: HashSet<&str> = HashSet::new();

    for tag in tags {
        let tagged = manifest.bundles_by_tag(tag.as_ref());
        if tagged.is_empty() {
            tracing::warn!(tag = %tag.as_ref(), "no bundles carry tag");
        }
        for bundle in tagged {
            wanted.insert(bundle.bundle_name.as_str());
            for dep in manifest.all_dependencies(&bundle.bundle_name) {
                wanted.insert(dep.bundle_name.as_str());
            }
        }
    }

    manifest
        .bundles()
        .iter()
        .filter(|b| wanted.contains(b.bundle_name.as_str()))
        .collect()
}

/// Manifest holding only `keep`, with dependency lists limited to `keep`
pub fn prune(manifest: &ManifestIndex, keep: &HashSet<&str>) -> ManifestData {
    let mut data = ManifestData::new(manifest.version(), manifest.build_time(), manifest.platform());
    data.bundles = manifest
        .bundles()
        .iter()
        .filter(|b| keep.contains(b.bundle_name.as_str()))
        .map(|b| {
            let mut bundle = b.clone();
            bundle.dependencies.retain(|d| keep.contains(d.as_str()));
            bundle
        })
        .collect();
    data
}

fn clear_dir(dir: &Path) -> Result<()> {
    if dir.exists() {
        std::fs::remove_dir_all(dir).map_err(write_error(dir))?;
    }
    ensure_dir(dir)
}

/// Whether `dest` is `output_dir`, lies inside it, or contains it
fn overlaps(output_dir: &Path, dest: &Path) -> bool {
    let output = normalize_root(output_dir);
    let dest = normalize_root(dest);
    dest.starts_with(&output) || output.starts_with(&dest)
}
