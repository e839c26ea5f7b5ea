//! Recipe host
//!
//! Loads recipes from a plugin entry point and drives one run: create the
//! recipe, apply parameter overrides, hand it the frames, execute, then
//! assemble the headers of the products it added before tearing it down.

use crate::config::HostConfig;
use crate::dfs::{setup_product_header, PropertyList};
use crate::error::{CoreError, HistoryEntry};
use crate::frame::sof::{load_sof, SofOptions};
use crate::frame::{Frame, FrameGroup, Frameset};
use crate::parameter::{ParameterList, ParameterMode};
use crate::plugin::{Plugin, PluginInfo, PluginInfoFn, PluginList};
use crate::recipes;
use serde::Serialize;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

/// Prefix of environment variables that set recipe parameters.
pub const ENV_PREFIX: &str = "FRAMEKIT_";

/// Product frame with its assembled header
#[derive(Debug, Clone, Serialize)]
pub struct Product {
    pub frame: Frame,
    pub header: PropertyList,
}

/// Outcome of a successful run
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub recipe: String,
    pub parameters: ParameterList,
    pub frames: Frameset,
    pub products: Vec<Product>,
    /// Errors the recipe recorded without failing
    pub errors: Vec<HistoryEntry>,
    pub elapsed_ms: u128,
}

/// Recipe host
pub struct Host {
    config: HostConfig,
    entry: PluginInfoFn,
    env_lookup: fn(&str) -> Option<String>,
}

fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

impl Host {
    /// Host serving the built-in recipes.
    pub fn new(config: HostConfig) -> Self {
        Self::with_plugins(config, recipes::register)
    }

    /// Host serving the recipes registered by `entry`.
    pub fn with_plugins(config: HostConfig, entry: PluginInfoFn) -> Self {
        Host {
            config,
            entry,
            env_lookup: process_env,
        }
    }

    /// Replace the environment used for parameter overrides.
    pub fn with_env_lookup(mut self, lookup: fn(&str) -> Option<String>) -> Self {
        self.env_lookup = lookup;
        self
    }

    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    /// Fresh, uninitialized plugins.
    pub fn plugins(&self) -> Result<PluginList, CoreError> {
        PluginList::from_info_fn(self.entry)
    }

    /// Metadata of every available recipe.
    pub fn recipes(&self) -> Result<Vec<PluginInfo>, CoreError> {
        Ok(self
            .plugins()?
            .iter()
            .filter(|p| p.recipe().is_some())
            .map(|p| p.info().clone())
            .collect())
    }

    fn instantiate(&self, name: &str) -> Result<Plugin, CoreError> {
        let plugin = self
            .plugins()?
            .take(name)
            .ok_or_else(|| CoreError::DataNotFound(format!("No recipe named '{}'", name)))?;
        if plugin.recipe().is_none() {
            return Err(CoreError::IllegalInput(format!(
                "Plugin '{}' is not a recipe",
                name
            )));
        }
        Ok(plugin)
    }

    /// Parameter list of `name` with its defaults.
    pub fn recipe_parameters(&self, name: &str) -> Result<ParameterList, CoreError> {
        let mut plugin = self.instantiate(name)?;
        let outcome = plugin.initialize().and_then(|_| {
            plugin
                .recipe()
                .and_then(|r| r.parameters())
                .cloned()
                .ok_or_else(|| CoreError::NullInput(format!("recipe '{}' parameters", name)))
        });
        if let Err(e) = plugin.deinitialize() {
            warn!(recipe = name, error = %e, "Recipe teardown failed");
        }
        outcome
    }

    /// Load the set of frames at `sof` and run `name` on it.
    pub fn run_sof(
        &self,
        name: &str,
        sof: &Path,
        overrides: &[(String, String)],
    ) -> Result<RunReport, CoreError> {
        let options = SofOptions {
            check_exists: self.config.check_sof_exists,
            ..SofOptions::default()
        };
        let frames = load_sof(sof, &options)?;
        self.run(name, frames, overrides)
    }

    /// Run recipe `name` on `frames`.
    ///
    /// `overrides` are `(alias, value)` pairs matched against command-line
    /// aliases, falling back to full parameter names. They take precedence
    /// over `FRAMEKIT_<ALIAS>` environment variables.
    #[instrument(skip(self, frames, overrides), fields(frames = frames.len()))]
    pub fn run(
        &self,
        name: &str,
        frames: Frameset,
        overrides: &[(String, String)],
    ) -> Result<RunReport, CoreError> {
        let started = Instant::now();
        let mut plugin = self.instantiate(name)?;

        let outcome = self.drive(&mut plugin, frames, overrides);
        if let Err(e) = plugin.deinitialize() {
            warn!(recipe = name, error = %e, "Recipe teardown failed");
        }

        let mut report = outcome?;
        report.elapsed_ms = started.elapsed().as_millis();
        info!(
            recipe = name,
            products = report.products.len(),
            elapsed_ms = report.elapsed_ms as u64,
            "Recipe finished"
        );
        Ok(report)
    }

    fn drive(
        &self,
        plugin: &mut Plugin,
        frames: Frameset,
        overrides: &[(String, String)],
    ) -> Result<RunReport, CoreError> {
        plugin.initialize()?;
        let name = plugin.name().to_string();
        let recipe = plugin
            .recipe_mut()
            .ok_or_else(|| CoreError::IllegalInput(format!("Plugin '{}' is not a recipe", name)))?;

        let parameters = recipe
            .parameters_mut()
            .ok_or_else(|| CoreError::NullInput(format!("recipe '{}' parameters", name)))?;
        self.apply_environment(parameters)?;
        apply_overrides(parameters, overrides)?;
        if self.config.check_constraints {
            for parameter in parameters.iter().filter(|p| !p.satisfies_constraint()) {
                warn!(
                    recipe = %name,
                    parameter = parameter.name(),
                    value = %parameter.value(),
                    "Parameter value outside its admissible values"
                );
            }
        }

        let inputs: Vec<_> = frames.iter_with_ids().map(|(id, _)| id).collect();
        recipe.set_output_dir(&self.config.output_dir);
        recipe.set_frames(frames);

        let executed = plugin.execute();
        let recipe = plugin
            .recipe_mut()
            .ok_or_else(|| CoreError::IllegalInput(format!("Plugin '{}' is not a recipe", name)))?;
        let frames = recipe
            .take_frames()
            .ok_or_else(|| CoreError::NullInput(format!("recipe '{}' frames", name)))?;
        executed?;

        let parameters = recipe.parameters().cloned().unwrap_or_default();
        let mut products = Vec::new();
        for (id, frame) in frames.iter_with_ids() {
            if frame.group() != FrameGroup::Product || inputs.contains(&id) {
                continue;
            }
            let header = setup_product_header(
                frame,
                &frames,
                &parameters,
                &name,
                &self.config.pipeline_id,
                &self.config.dictionary_id,
            )?;
            products.push(Product {
                frame: frame.clone(),
                header,
            });
        }

        Ok(RunReport {
            recipe: name,
            parameters,
            errors: recipe.last_history().entries().to_vec(),
            frames,
            products,
            elapsed_ms: 0,
        })
    }

    fn apply_environment(&self, parameters: &mut ParameterList) -> Result<(), CoreError> {
        for parameter in parameters.iter_mut() {
            if !parameter.is_enabled(ParameterMode::Env) {
                continue;
            }
            let Some(alias) = parameter.alias(ParameterMode::Env) else {
                continue;
            };
            let key = format!("{}{}", ENV_PREFIX, alias);
            if let Some(text) = (self.env_lookup)(&key) {
                parameter
                    .set_from_str(&text)
                    .map_err(|e| e.with_context(&key))?;
                parameter.set_default_flag(true);
                debug!(parameter = parameter.name(), source = %key, "Parameter set from environment");
            }
        }
        Ok(())
    }
}

fn apply_overrides(
    parameters: &mut ParameterList,
    overrides: &[(String, String)],
) -> Result<(), CoreError> {
    for (alias, text) in overrides {
        let name = parameters
            .find_alias(ParameterMode::Cli, alias)
            .map(|p| p.name().to_string())
            .unwrap_or_else(|| alias.clone());
        let parameter = parameters
            .find_mut(&name)
            .ok_or_else(|| CoreError::DataNotFound(format!("Unknown parameter '{}'", alias)))?;
        parameter.set_from_str(text).map_err(|e| e.with_context(alias))?;
        parameter.set_default_flag(true);
        debug!(parameter = parameter.name(), value = %text, "Parameter set from command line");
    }
    Ok(())
}
