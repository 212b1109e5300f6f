use clap::Parser;
use std::path::PathBuf;

/// Arguments for the export command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Export the bundles tagged by builtin_tags:\n    bundlekit export ./app/data\n\n\
                  Export specific tags:\n    bundlekit export ./app/data --tag startup --tag ui\n\n\
                  Export from another platform's output:\n    bundlekit export ./app/data --platform Android")]
pub struct ExportArgs {
    /// Destination directory (cleared before copying)
    pub dest: PathBuf,

    /// Tags to export (defaults to builtin_tags; none copies everything)
    #[arg(long = "tag", short = 't')]
    pub tags: Vec<String>,

    /// Platform output to export from
    #[arg(long)]
    pub platform: Option<String>,
}
