use clap::Parser;

/// Arguments for the build command
#[derive(Parser, Debug, Default)]
#[command(after_help = "EXAMPLES:\n  \
                  Build for the configured platform:\n    bundlekit build\n\n\
                  Build for another platform:\n    bundlekit build --platform Android\n\n\
                  Skip build_report.txt:\n    bundlekit build --no-report")]
pub struct BuildArgs {
    /// Platform to build for (overrides `platform` in bundlekit.yaml)
    #[arg(long)]
    pub platform: Option<String>,

    /// Do not write build_report.txt
    #[arg(long)]
    pub no_report: bool,
}
