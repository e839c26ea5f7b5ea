//! CLI parse: clap types for framekit. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// framekit CLI - frame-set bookkeeping and recipe runs
#[derive(Parser)]
#[command(name = "framekit")]
#[command(version)]
#[command(about = "Inspect sets of frames and run pipeline recipes on them")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory (holds framekit.toml)
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (default: warnings only)
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List available recipes
    Recipes {
        /// Output format (text or json)
        #[arg(long)]
        format: Option<String>,
    },
    /// Show the parameters of a recipe
    Params {
        /// Recipe name
        recipe: String,
        /// Output format (text or json)
        #[arg(long)]
        format: Option<String>,
    },
    /// Inspect a set-of-frames file
    Frames {
        /// Set-of-frames file (`filename tag [group]` per line)
        sof: PathBuf,
        /// Summarize frame counts per tag
        #[arg(long)]
        by_tag: bool,
        /// Output format (text or json)
        #[arg(long)]
        format: Option<String>,
    },
    /// Run a recipe on a set of frames
    Run {
        /// Recipe name
        recipe: String,
        /// Set-of-frames file
        sof: PathBuf,
        /// Parameter override as alias=value (repeatable)
        #[arg(long = "param", short = 'p', value_name = "ALIAS=VALUE")]
        params: Vec<String>,
        /// Directory for products (overrides configuration)
        #[arg(long)]
        output_dir: Option<PathBuf>,
        /// Output format (text or json)
        #[arg(long)]
        format: Option<String>,
    },
    /// Show the effective configuration
    Config {
        /// Output format (toml or json)
        #[arg(long, default_value = "toml")]
        format: String,
    },
}
