//! Human-readable build report (build_report.txt)

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use crate::common::display_utils::format_file_size;
use crate::common::fs::write_atomic;
use crate::error::Result;
use crate::manifest::ManifestIndex;

/// Report file name in the output directory
pub const REPORT_FILE: &str = "build_report.txt";

/// Render the report text for `manifest`
pub fn render(manifest: &ManifestIndex) -> String {
    let mut out = String::new();
    let rule = "=".repeat(50);

    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "Build Report");
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "Version: {}", manifest.version());
    let _ = writeln!(out, "Platform: {}", manifest.platform());
    let _ = writeln!(out, "Build Time: {}", manifest.build_time());
    let _ = writeln!(out);

    let _ = writeln!(out, "[Bundle Summary]");
    let _ = writeln!(out, "Total Bundles: {}", manifest.bundles().len());
    let _ = writeln!(out, "Total Size: {}", format_file_size(manifest.total_size()));
    let _ = writeln!(out, "Total Assets: {}", manifest.asset_count());
    let _ = writeln!(out);

    let _ = writeln!(out, "[Bundle Details]");
    let mut bundles: Vec<_> = manifest.bundles().iter().collect();
    bundles.sort_by(|a, b| b.size.cmp(&a.size));
    for bundle in bundles {
        let kind = if bundle.is_raw_file { " (raw)" } else { "" };
        let _ = writeln!(out, "  {}{kind}", bundle.bundle_name);
        let _ = writeln!(out, "    Size: {}", format_file_size(bundle.size));
        let _ = writeln!(out, "    Assets: {}", bundle.assets.len());
        let _ = writeln!(out, "    Priority: {}", bundle.priority);
        if !bundle.dependencies.is_empty() {
            let _ = writeln!(out, "    Dependencies: {}", bundle.dependencies.join(", "));
        }
        if !bundle.tags.is_empty() {
            let _ = writeln!(out, "    Tags: {}", bundle.tags.join(", "));
        }
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "[Tag Summary]");
    for tag in manifest.tags() {
        let _ = writeln!(
            out,
            "  {tag}: {} bundles, {}",
            manifest.bundles_by_tag(tag).len(),
            format_file_size(manifest.size_by_tag(tag))
        );
    }

    out
}

/// Write the report into `dir`
pub fn write(dir: &Path, manifest: &ManifestIndex) -> Result<PathBuf> {
    let path = dir.join(REPORT_FILE);
    write_atomic(&path, render(manifest).as_bytes())?;
    Ok(path)
}
