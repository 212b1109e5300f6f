//! CLI definitions using clap derive API
//!
//! This module is organized into submodules for each command's argument types:
//! - build: Build command arguments
//! - export: Export command arguments
//! - query: Query command arguments
//! - completions: Completions command arguments

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod build;
pub mod completions;
pub mod export;
pub mod query;

pub use build::BuildArgs;
pub use completions::CompletionsArgs;
pub use export::ExportArgs;
pub use query::{QueryArgs, QuerySubcommand};

/// bundlekit - content-addressed bundle packager
#[derive(Parser, Debug)]
#[command(
    name = "bundlekit",
    author,
    version,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Package content files into content-addressed bundles",
    long_about = "bundlekit partitions a content tree into bundles following the rules in \
                  bundlekit.yaml, writes one archive per bundle under a content-addressed name, \
                  and records names, hashes, tags and dependencies in manifest.json.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  bundlekit build                       \x1b[90m# Build for the configured platform\x1b[0m\n   \
                  bundlekit build --platform Android    \x1b[90m# Build for another platform\x1b[0m\n   \
                  bundlekit query item ui/icons/a.png   \x1b[90m# Bundles needed for an item\x1b[0m\n   \
                  bundlekit export ./app/data           \x1b[90m# Copy builtin-tagged bundles\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    /// Project directory (defaults to current directory)
    #[arg(long, short = 'p', global = true, env = "BUNDLEKIT_PROJECT")]
    pub project: Option<PathBuf>,

    /// Configuration file (defaults to bundlekit.yaml in the project)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build bundles and manifest
    Build(BuildArgs),

    /// Copy tagged bundles and their dependencies to a directory
    Export(ExportArgs),

    /// Query the manifest of the last build
    Query(QueryArgs),

    /// Show version information
    #[command(hide = true)]
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing_build() {
        let cli = Cli::try_parse_from(["bundlekit", "build", "--platform", "Android", "--no-report"])
            .unwrap();
        match cli.command {
            Commands::Build(args) => {
                assert_eq!(args.platform, Some("Android".to_string()));
                assert!(args.no_report);
            }
            _ => panic!("Expected Build command"),
        }
    }

    #[test]
    fn test_cli_parsing_export_tags() {
        let cli =
            Cli::try_parse_from(["bundlekit", "export", "out", "--tag", "ui", "-t", "startup"])
                .unwrap();
        match cli.command {
            Commands::Export(args) => {
                assert_eq!(args.dest, PathBuf::from("out"));
                assert_eq!(args.tags, vec!["ui".to_string(), "startup".to_string()]);
            }
            _ => panic!("Expected Export command"),
        }
    }

    #[test]
    fn test_cli_parsing_query_tag_requires_tags() {
        assert!(Cli::try_parse_from(["bundlekit", "query", "tag"]).is_err());

        let cli = Cli::try_parse_from(["bundlekit", "query", "tag", "ui", "audio"]).unwrap();
        match cli.command {
            Commands::Query(QueryArgs {
                command: QuerySubcommand::Tag { tags },
                ..
            }) => assert_eq!(tags.len(), 2),
            _ => panic!("Expected Query tag command"),
        }
    }

    #[test]
    fn test_cli_parsing_query_item() {
        let cli =
            Cli::try_parse_from(["bundlekit", "query", "item", "ui/a.png", "--platform", "iOS"])
                .unwrap();
        match cli.command {
            Commands::Query(args) => {
                assert_eq!(args.platform, Some("iOS".to_string()));
                assert!(matches!(args.command, QuerySubcommand::Item { .. }));
            }
            _ => panic!("Expected Query command"),
        }
    }

    #[test]
    fn test_cli_parsing_version() {
        let cli = Cli::try_parse_from(["bundlekit", "version"]).unwrap();
        assert!(matches!(cli.command, Commands::Version));
    }

    #[test]
    fn test_cli_global_options() {
        let cli = Cli::try_parse_from([
            "bundlekit",
            "-v",
            "-p",
            "/tmp/project",
            "-c",
            "/tmp/other.yaml",
            "build",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.project, Some(PathBuf::from("/tmp/project")));
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/other.yaml")));
    }

    #[test]
    fn test_cli_parsing_completions() {
        let cli = Cli::try_parse_from(["bundlekit", "completions", "bash"]).unwrap();
        match cli.command {
            Commands::Completions(args) => {
                assert_eq!(args.shell, "bash");
            }
            _ => panic!("Expected Completions command"),
        }
    }
}
