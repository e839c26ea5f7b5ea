//! Framekit CLI Binary
//!
//! Command-line host for framekit recipes.

use anyhow::Context;
use clap::Parser;
use framekit::cli::{map_error, Cli, RunContext};
use framekit::config::ConfigLoader;
use framekit::logging::{init_logging, LoggingConfig};
use std::process;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();

    let logging_config = match build_logging_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{:#}", e);
            process::exit(1);
        }
    };

    if let Err(e) = init_logging(Some(&logging_config)) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("framekit starting");

    let context = match RunContext::new(cli.workspace.clone(), cli.config.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            error!("Error loading configuration: {}", e);
            eprintln!("{}", map_error(&e));
            process::exit(1);
        }
    };

    match context.execute(&cli.command) {
        Ok(output) => {
            info!("Command completed successfully");
            println!("{}", output);
        }
        Err(e) => {
            error!("Command failed: {}", e);
            eprintln!("{}", map_error(&e));
            process::exit(1);
        }
    }
}

/// Build logging configuration from CLI args and the config file.
///
/// `--verbose` raises the level to `debug`; `--log-level` wins over both.
fn build_logging_config(cli: &Cli) -> anyhow::Result<LoggingConfig> {
    // A broken config file is reported by RunContext; logging falls back
    let mut config = match cli.config {
        Some(ref path) => ConfigLoader::load_from_file(path).map(|c| c.logging),
        None => ConfigLoader::load(&cli.workspace).map(|c| c.logging),
    }
    .unwrap_or_default();

    if cli.verbose {
        config.level = "debug".to_string();
    }
    if let Some(ref level) = cli.log_level {
        config.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }
    if let Some(ref output) = cli.log_output {
        config.output = output.clone();
    }
    if let Some(ref file) = cli.log_file {
        config.file = file.clone();
    } else if config.file.is_relative() {
        config.file = cli.workspace.join(&config.file);
    }

    config
        .validate()
        .map_err(anyhow::Error::msg)
        .context("Invalid logging options")?;
    Ok(config)
}
