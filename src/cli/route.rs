//! CLI route: single route table and run context. Dispatches to the host
//! and presentation.

use crate::cli::help::command_name;
use crate::cli::parse::Commands;
use crate::cli::presentation::{
    format_frames_json, format_frames_text, format_parameters_json, format_parameters_text,
    format_recipe_list_json, format_recipe_list_text, format_run_report_json,
    format_run_report_text, format_tag_counts_text, to_json,
};
use crate::config::{ConfigLoader, FramekitConfig};
use crate::error::CoreError;
use crate::frame::sof::{load_sof, SofOptions};
use crate::host::Host;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info_span};

/// Runtime context for CLI execution: workspace, effective configuration
/// and the recipe host.
#[derive(Debug)]
pub struct RunContext {
    workspace_root: PathBuf,
    config: FramekitConfig,
}

impl RunContext {
    /// Create run context from workspace root and optional config path.
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, CoreError> {
        let config = match config_path {
            Some(ref path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load(&workspace_root)?,
        };
        Self::with_config(workspace_root, config)
    }

    /// Create run context from an already loaded configuration.
    pub fn with_config(workspace_root: PathBuf, config: FramekitConfig) -> Result<Self, CoreError> {
        config.validate().map_err(|errors| {
            let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            CoreError::Config(format!(
                "Configuration validation failed:\n{}",
                messages.join("\n")
            ))
        })?;
        Ok(Self {
            workspace_root,
            config,
        })
    }

    pub fn config(&self) -> &FramekitConfig {
        &self.config
    }

    /// Relative paths resolve against the workspace root.
    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.workspace_root.join(path)
        }
    }

    fn format<'a>(&'a self, requested: &'a Option<String>) -> Result<&'a str, CoreError> {
        let format = requested.as_deref().unwrap_or(&self.config.output.format);
        match format {
            "text" | "json" => Ok(format),
            other => Err(CoreError::IllegalInput(format!(
                "Unknown output format '{}' (expected text or json)",
                other
            ))),
        }
    }

    /// Execute a CLI command via the single route table.
    pub fn execute(&self, command: &Commands) -> Result<String, CoreError> {
        let span = info_span!("command", name = command_name(command));
        let _entered = span.enter();
        let started = Instant::now();
        let result = self.execute_inner(command);
        debug!(
            ok = result.is_ok(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Command finished"
        );
        result
    }

    fn execute_inner(&self, command: &Commands) -> Result<String, CoreError> {
        match command {
            Commands::Recipes { format } => {
                let recipes = Host::new(self.config.host.clone()).recipes()?;
                match self.format(format)? {
                    "json" => format_recipe_list_json(&recipes),
                    _ => Ok(format_recipe_list_text(&recipes, self.config.output.color)),
                }
            }
            Commands::Params { recipe, format } => {
                let parameters = Host::new(self.config.host.clone()).recipe_parameters(recipe)?;
                match self.format(format)? {
                    "json" => format_parameters_json(recipe, &parameters),
                    _ => Ok(format_parameters_text(
                        recipe,
                        &parameters,
                        self.config.output.color,
                    )),
                }
            }
            Commands::Frames {
                sof,
                by_tag,
                format,
            } => {
                let options = SofOptions {
                    check_exists: self.config.host.check_sof_exists,
                    ..SofOptions::default()
                };
                let frames = load_sof(&self.resolve(sof), &options)?;
                match (self.format(format)?, by_tag) {
                    ("json", by_tag) => format_frames_json(&frames, *by_tag),
                    (_, true) => Ok(format_tag_counts_text(&frames, self.config.output.color)),
                    (_, false) => Ok(format_frames_text(&frames, self.config.output.color)),
                }
            }
            Commands::Run {
                recipe,
                sof,
                params,
                output_dir,
                format,
            } => {
                let format = self.format(format)?;
                let overrides = parse_overrides(params)?;
                let mut host_config = self.config.host.clone();
                if let Some(dir) = output_dir {
                    host_config.output_dir = dir.clone();
                }
                host_config.output_dir = self.resolve(&host_config.output_dir);
                let dump = host_config.dump_products;

                let report = Host::new(host_config).run_sof(recipe, &self.resolve(sof), &overrides)?;
                match format {
                    "json" => format_run_report_json(&report),
                    _ => Ok(format_run_report_text(
                        &report,
                        dump,
                        self.config.output.color,
                    )),
                }
            }
            Commands::Config { format } => match format.as_str() {
                "json" => to_json(&self.config),
                "toml" => toml::to_string_pretty(&self.config)
                    .map_err(|e| CoreError::Config(format!("Cannot encode TOML: {}", e))),
                other => Err(CoreError::IllegalInput(format!(
                    "Unknown config format '{}' (expected toml or json)",
                    other
                ))),
            },
        }
    }
}

/// Split `alias=value` overrides.
pub fn parse_overrides(params: &[String]) -> Result<Vec<(String, String)>, CoreError> {
    params
        .iter()
        .map(|param| match param.split_once('=') {
            Some((alias, value)) if !alias.trim().is_empty() => {
                Ok((alias.trim().to_string(), value.to_string()))
            }
            _ => Err(CoreError::IllegalInput(format!(
                "Parameter override '{}' is not of the form alias=value",
                param
            ))),
        })
        .collect()
}
