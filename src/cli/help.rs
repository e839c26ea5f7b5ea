//! CLI command-name contract for logging spans.

use crate::cli::parse::Commands;

/// Command name string used in log fields (e.g. "run", "params").
pub fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Recipes { .. } => "recipes",
        Commands::Params { .. } => "params",
        Commands::Frames { .. } => "frames",
        Commands::Run { .. } => "run",
        Commands::Config { .. } => "config",
    }
}
