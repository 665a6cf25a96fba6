//! CLI help and command-name contract for logging and routing.

use crate::cli::parse::Commands;

/// Command name string recorded on the command span (e.g. "diff", "tree").
pub fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Diff { .. } => "diff",
        Commands::Ls { .. } => "ls",
        Commands::Tree { .. } => "tree",
        Commands::Show { .. } => "show",
        Commands::Watch { .. } => "watch",
        Commands::Config => "config",
    }
}
