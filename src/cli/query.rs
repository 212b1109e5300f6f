use clap::{Parser, Subcommand};

/// Arguments for the query command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Show a bundle and its dependencies:\n    bundlekit query bundle ui_icons\n\n\
                  Bundles needed to load an item:\n    bundlekit query item ui/icons/logo.png\n\n\
                  Bundles carrying any of several tags:\n    bundlekit query tag startup ui\n\n\
                  Totals for the last build:\n    bundlekit query summary")]
pub struct QueryArgs {
    /// Platform output to read
    #[arg(long, global = true)]
    pub platform: Option<String>,

    #[command(subcommand)]
    pub command: QuerySubcommand,
}

#[derive(Subcommand, Debug)]
pub enum QuerySubcommand {
    /// Show a bundle and its transitive dependencies
    Bundle {
        /// Bundle name
        name: String,
    },

    /// Show the bundles required to load an item
    Item {
        /// Logical item path
        path: String,
    },

    /// Show bundles carrying any of the given tags
    Tag {
        /// Tags (union)
        #[arg(required = true)]
        tags: Vec<String>,
    },

    /// Show manifest totals
    Summary,
}
