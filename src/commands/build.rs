//! Build command implementation

use std::path::PathBuf;

use crate::archive::TarArchiveBuilder;
use crate::build::{BuildOutcome, BuildPipeline};
use crate::cli::BuildArgs;
use crate::commands::helpers::Project;
use crate::common::display_utils::{bundle_name, dim, format_file_size, label};
use crate::error::Result;

/// Run build command
pub fn run(project: Option<PathBuf>, config: Option<PathBuf>, args: BuildArgs) -> Result<()> {
    let project = Project::open(project, config)?;

    let mut pipeline = BuildPipeline::new(&project.config, &project.root, TarArchiveBuilder::new())
        .with_report(project.config.generate_report && !args.no_report)
        .with_progress(console::Term::stderr().is_term());
    if let Some(platform) = args.platform {
        pipeline = pipeline.with_platform(platform);
    }

    let outcome = pipeline.run()?;
    print_outcome(&outcome);
    Ok(())
}

fn print_outcome(outcome: &BuildOutcome) {
    let manifest = &outcome.manifest;

    println!(
        "{} {} bundles, {} items, {}",
        label().apply_to("Built"),
        manifest.bundles().len(),
        manifest.asset_count(),
        format_file_size(manifest.total_size())
    );
    println!(
        "{} {}",
        label().apply_to("Output:"),
        outcome.output_dir.display()
    );
    println!(
        "{} {} {}",
        label().apply_to("Manifest:"),
        outcome.version.version,
        dim().apply_to(&outcome.version.manifest_hash)
    );

    for bundle in manifest.bundles() {
        println!(
            "  {} {}",
            bundle_name().apply_to(bundle.file_name()),
            dim().apply_to(format_file_size(bundle.size))
        );
    }

    if !outcome.removed.is_empty() {
        println!(
            "{} {} stale files",
            label().apply_to("Removed"),
            outcome.removed.len()
        );
    }
    if let Some(report) = &outcome.report {
        println!("{} {}", label().apply_to("Report:"), report.display());
    }
}
