//! Query command implementation
//!
//! Answers index queries against the manifest of the last build.

use std::path::PathBuf;

use crate::cli::{QueryArgs, QuerySubcommand};
use crate::commands::helpers::Project;
use crate::common::display_utils::{bundle_name, dim, format_file_size, label};
use crate::error::{Result, item_not_found};
use crate::manifest::{BundleInfo, ManifestIndex};

/// Run query command
pub fn run(project: Option<PathBuf>, config: Option<PathBuf>, args: QueryArgs) -> Result<()> {
    let project = Project::open(project, config)?;
    let manifest = ManifestIndex::load(&project.output_dir(args.platform.as_deref()))?;

    match args.command {
        QuerySubcommand::Bundle { name } => show_bundle(&manifest, &name),
        QuerySubcommand::Item { path } => show_item(&manifest, &path),
        QuerySubcommand::Tag { tags } => {
            show_tags(&manifest, &tags);
            Ok(())
        }
        QuerySubcommand::Summary => {
            show_summary(&manifest);
            Ok(())
        }
    }
}

fn show_bundle(manifest: &ManifestIndex, name: &str) -> Result<()> {
    let bundle = manifest.require_bundle(name)?;

    println!("{}", bundle_name().apply_to(&bundle.bundle_name));
    println!("  {} {}", label().apply_to("File:"), bundle.file_name());
    println!("  {} {}", label().apply_to("Hash:"), bundle.hash);
    println!("  {} {:08x}", label().apply_to("CRC:"), bundle.crc);
    println!(
        "  {} {}",
        label().apply_to("Size:"),
        format_file_size(bundle.size)
    );
    println!("  {} {}", label().apply_to("Priority:"), bundle.priority);
    if bundle.is_raw_file {
        println!("  {} yes", label().apply_to("Raw:"));
    }
    if !bundle.tags.is_empty() {
        println!("  {} {}", label().apply_to("Tags:"), bundle.tags.join(", "));
    }

    println!("  {}", label().apply_to("Assets:"));
    for asset in &bundle.assets {
        println!("    {asset}");
    }

    let deps = manifest.all_dependencies(name);
    if !deps.is_empty() {
        println!("  {}", label().apply_to("Dependencies (all):"));
        print_bundles(&deps, "    ");
    }
    Ok(())
}

fn show_item(manifest: &ManifestIndex, path: &str) -> Result<()> {
    let required = manifest.required_bundles(path);
    if required.is_empty() {
        return Err(item_not_found(path));
    }

    println!("{} {path}", label().apply_to("Required bundles for"));
    print_bundles(&required, "  ");
    Ok(())
}

fn show_tags(manifest: &ManifestIndex, tags: &[String]) {
    let bundles = manifest.bundles_by_tags(tags);
    let total: u64 = bundles.iter().map(|b| b.size).sum();

    println!(
        "{} {} bundles, {}",
        label().apply_to(format!("[{}]", tags.join(", "))),
        bundles.len(),
        format_file_size(total)
    );
    print_bundles(&bundles, "  ");

    if tags.len() > 1 {
        for tag in tags {
            println!(
                "  {} {}",
                dim().apply_to(format!("{tag}:")),
                format_file_size(manifest.size_by_tag(tag))
            );
        }
    }
}

fn show_summary(manifest: &ManifestIndex) {
    println!("{} {}", label().apply_to("Version:"), manifest.version());
    println!("{} {}", label().apply_to("Platform:"), manifest.platform());
    println!("{} {}", label().apply_to("Build time:"), manifest.build_time());
    println!("{} {}", label().apply_to("Bundles:"), manifest.bundles().len());
    println!("{} {}", label().apply_to("Items:"), manifest.asset_count());
    println!(
        "{} {}",
        label().apply_to("Total size:"),
        format_file_size(manifest.total_size())
    );

    let tags = manifest.tags();
    if !tags.is_empty() {
        println!("{}", label().apply_to("Tags:"));
        for tag in tags {
            println!(
                "  {tag}: {} bundles, {}",
                manifest.bundles_by_tag(tag).len(),
                format_file_size(manifest.size_by_tag(tag))
            );
        }
    }
}

fn print_bundles(bundles: &[&BundleInfo], indent: &str) {
    for bundle in bundles {
        println!(
            "{indent}{} {}",
            bundle_name().apply_to(&bundle.bundle_name),
            dim().apply_to(format_file_size(bundle.size))
        );
    }
}
