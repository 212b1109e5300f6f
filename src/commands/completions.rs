//! `bundlekit completions`

use std::io::Write;

use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::{Cli, CompletionsArgs};
use crate::error::{BundleKitError, Result};

/// Print the completion script for the requested shell
pub fn run(args: CompletionsArgs) -> Result<()> {
    let shell = parse_shell(&args.shell)?;
    write_completions(shell, &mut std::io::stdout().lock());
    Ok(())
}

/// Shell names are case-insensitive and `pwsh` is PowerShell
fn parse_shell(name: &str) -> Result<Shell> {
    match name.to_lowercase().as_str() {
        "pwsh" => Ok(Shell::PowerShell),
        lower => lower.parse().map_err(|_| BundleKitError::InvalidArgument {
            message: format!(
                "unknown shell '{name}', supported shells: bash, elvish, fish, powershell, zsh"
            ),
        }),
    }
}

fn write_completions(shell: Shell, out: &mut impl Write) {
    clap_complete::generate(shell, &mut Cli::command(), "bundlekit", out);
}
