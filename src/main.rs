//! bundlekit - content-addressed bundle packager
//!
//! Packages content files into bundles, writes a manifest with a tag index
//! and dependency graph, and answers queries against it.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use bundlekit::cli::{Cli, Commands};
use bundlekit::commands;

/// Install the stderr log subscriber
///
/// `RUST_LOG` selects the filter, `info` by default. `--verbose` forces
/// `debug`.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Build(args) => commands::build::run(cli.project, cli.config, args),
        Commands::Export(args) => commands::export::run(cli.project, cli.config, args),
        Commands::Query(args) => commands::query::run(cli.project, cli.config, args),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
