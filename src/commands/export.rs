//! Export command implementation

use std::path::PathBuf;

use crate::build::export::export;
use crate::cli::ExportArgs;
use crate::commands::helpers::Project;
use crate::common::display_utils::{bundle_name, label};
use crate::error::Result;

/// Run export command
pub fn run(project: Option<PathBuf>, config: Option<PathBuf>, args: ExportArgs) -> Result<()> {
    let project = Project::open(project, config)?;
    let output_dir = project.output_dir(args.platform.as_deref());

    let tags = if args.tags.is_empty() {
        project.config.builtin_tags.clone()
    } else {
        args.tags
    };

    let summary = export(&output_dir, &args.dest, &tags)?;

    if summary.full_copy {
        println!(
            "{} all {} bundles to {}",
            label().apply_to("Exported"),
            summary.copied.len(),
            args.dest.display()
        );
        return Ok(());
    }

    println!(
        "{} {} bundles for tags [{}] to {}",
        label().apply_to("Exported"),
        summary.copied.len(),
        tags.join(", "),
        args.dest.display()
    );
    for name in &summary.copied {
        println!("  {}", bundle_name().apply_to(name));
    }
    for name in &summary.missing {
        println!("  {name} (missing from output)");
    }
    Ok(())
}
