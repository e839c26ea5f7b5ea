//! Recipes: plugins that process a frameset under a parameter list
//!
//! A recipe author implements [`RecipeDefinition`]; [`Recipe`] and
//! [`RecipeV2`] wrap a definition in the plugin handlers that manage its
//! parameter list and frames across create, exec and destroy.

pub mod config;

pub use config::{CountRange, RecipeConfig};

use crate::error::{CoreError, ErrorHistory};
use crate::frame::Frameset;
use crate::parameter::ParameterList;
use crate::plugin::{
    check_version_skew, Plugin, PluginHandlers, PluginInfo, PluginType, Version, PLUGIN_API,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// Descriptive metadata of a recipe
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeInfo {
    pub name: String,
    pub version: Version,
    pub synopsis: String,
    pub description: String,
    pub author: String,
    pub email: String,
    pub copyright: String,
}

impl RecipeInfo {
    fn plugin_info(&self, plugin_type: PluginType) -> PluginInfo {
        PluginInfo {
            api: PLUGIN_API,
            version: self.version.code(),
            plugin_type,
            name: self.name.clone(),
            synopsis: self.synopsis.clone(),
            description: self.description.clone(),
            author: self.author.clone(),
            email: self.email.clone(),
            copyright: self.copyright.clone(),
        }
    }
}

/// What a recipe author writes.
pub trait RecipeDefinition: Send + Sync {
    fn info(&self) -> RecipeInfo;

    /// Library version the recipe was written for.
    fn built_against(&self) -> Version {
        Version::current()
    }

    /// Append the recipe's parameters to an empty list.
    fn fill_parameterlist(&self, parameters: &mut ParameterList) -> Result<(), CoreError>;

    /// The recipe's work; products are inserted into `frames`.
    fn run(
        &self,
        frames: &mut Frameset,
        parameters: &ParameterList,
        context: &mut RecipeContext,
    ) -> Result<(), CoreError>;

    /// Frame configuration; only consulted for version 2 recipes.
    fn recipe_config(&self) -> Option<RecipeConfig> {
        None
    }
}

/// Per-execution state handed to [`RecipeDefinition::run`]
#[derive(Debug)]
pub struct RecipeContext {
    recipe: String,
    output_dir: PathBuf,
    history: ErrorHistory,
}

impl RecipeContext {
    pub fn new(recipe: &str, output_dir: &Path) -> Self {
        RecipeContext {
            recipe: recipe.to_string(),
            output_dir: output_dir.to_path_buf(),
            history: ErrorHistory::new(),
        }
    }

    pub fn recipe(&self) -> &str {
        &self.recipe
    }

    /// Directory products are written to.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Record a failure for the post-run diagnostics dump.
    pub fn record(&mut self, location: &str, error: CoreError) -> CoreError {
        self.history.record(location, error)
    }

    pub fn history(&self) -> &ErrorHistory {
        &self.history
    }

    pub fn into_history(self) -> ErrorHistory {
        self.history
    }
}

/// Recipe plugin state: the definition plus what it owns between
/// create and destroy.
pub struct Recipe {
    name: String,
    definition: Box<dyn RecipeDefinition>,
    parameters: Option<ParameterList>,
    frames: Option<Frameset>,
    output_dir: PathBuf,
    last_history: ErrorHistory,
}

impl Recipe {
    pub fn new(definition: Box<dyn RecipeDefinition>) -> Self {
        Recipe {
            name: definition.info().name,
            definition,
            parameters: None,
            frames: None,
            output_dir: PathBuf::from("."),
            last_history: ErrorHistory::new(),
        }
    }

    /// Wrap `definition` in a plugin of type RECIPE.
    pub fn plugin(definition: Box<dyn RecipeDefinition>) -> Result<Plugin, CoreError> {
        let info = definition.info().plugin_info(PluginType::RECIPE);
        Plugin::new(info, Box::new(Recipe::new(definition)))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn definition(&self) -> &dyn RecipeDefinition {
        self.definition.as_ref()
    }

    /// Present between a successful create and destroy.
    pub fn parameters(&self) -> Option<&ParameterList> {
        self.parameters.as_ref()
    }

    pub fn parameters_mut(&mut self) -> Option<&mut ParameterList> {
        self.parameters.as_mut()
    }

    pub fn frames(&self) -> Option<&Frameset> {
        self.frames.as_ref()
    }

    /// Attach the frames to process; returns any set attached before.
    pub fn set_frames(&mut self, frames: Frameset) -> Option<Frameset> {
        self.frames.replace(frames)
    }

    /// Hand the frames back to the host. Destroy leaves them attached.
    pub fn take_frames(&mut self) -> Option<Frameset> {
        self.frames.take()
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn set_output_dir(&mut self, dir: impl Into<PathBuf>) {
        self.output_dir = dir.into();
    }

    /// Errors recorded during the most recent execution.
    pub fn last_history(&self) -> &ErrorHistory {
        &self.last_history
    }

    fn create(&mut self) -> Result<(), CoreError> {
        check_version_skew(&self.definition.built_against(), &Version::current())
            .map_err(|e| e.with_context(&format!("Cannot create recipe '{}'", self.name)))?;

        let mut parameters = ParameterList::new();
        if let Err(e) = self.definition.fill_parameterlist(&mut parameters) {
            error!(recipe = %self.name, error = %e, "Parameter list setup failed");
            return Err(e.with_context(&format!(
                "Could not create the parameter list of recipe '{}'",
                self.name
            )));
        }

        debug!(recipe = %self.name, parameters = parameters.len(), "Recipe created");
        self.parameters = Some(parameters);
        Ok(())
    }

    fn exec(&mut self, plugin: &PluginInfo) -> Result<(), CoreError> {
        if !plugin.plugin_type.contains(PluginType::RECIPE) {
            return Err(CoreError::IllegalInput(format!(
                "Plugin '{}' is of type {}, not a recipe",
                plugin.name, plugin.plugin_type
            )));
        }
        let parameters = self
            .parameters
            .as_ref()
            .ok_or_else(|| CoreError::NullInput(format!("recipe '{}' parameters", self.name)))?;
        let frames = self
            .frames
            .as_mut()
            .ok_or_else(|| CoreError::NullInput(format!("recipe '{}' frames", self.name)))?;

        info!(recipe = %self.name, frames = frames.len(), "Executing recipe");
        let mut context = RecipeContext::new(&self.name, &self.output_dir);
        let result = self.definition.run(frames, parameters, &mut context);

        if let Err(e) = &result {
            if context.history().is_empty() {
                context.history.note(&self.name, e);
            }
        }
        if !context.history().is_empty() {
            warn!(
                recipe = %self.name,
                errors = context.history().len(),
                "Recipe reported errors"
            );
            context.history().dump();
        }
        self.last_history = context.into_history();
        result
    }

    fn destroy(&mut self) {
        if self.parameters.take().is_some() {
            debug!(recipe = %self.name, "Recipe parameters released");
        }
    }
}

impl PluginHandlers for Recipe {
    fn plugin_type(&self) -> PluginType {
        PluginType::RECIPE
    }

    fn initialize(&mut self, _info: &PluginInfo) -> Result<(), CoreError> {
        self.create()
    }

    fn execute(&mut self, info: &PluginInfo) -> Result<(), CoreError> {
        self.exec(info)
    }

    fn deinitialize(&mut self, _info: &PluginInfo) -> Result<(), CoreError> {
        self.destroy();
        Ok(())
    }

    fn as_recipe(&self) -> Option<&Recipe> {
        Some(self)
    }

    fn as_recipe_mut(&mut self) -> Option<&mut Recipe> {
        Some(self)
    }
}

/// A recipe with a frame configuration
pub struct RecipeV2 {
    recipe: Recipe,
    config: Option<RecipeConfig>,
}

impl RecipeV2 {
    pub fn new(definition: Box<dyn RecipeDefinition>) -> Self {
        RecipeV2 {
            recipe: Recipe::new(definition),
            config: None,
        }
    }

    /// Wrap `definition` in a plugin of type RECIPE_V2.
    pub fn plugin(definition: Box<dyn RecipeDefinition>) -> Result<Plugin, CoreError> {
        let info = definition.info().plugin_info(PluginType::RECIPE_V2);
        Plugin::new(info, Box::new(RecipeV2::new(definition)))
    }

    pub fn recipe(&self) -> &Recipe {
        &self.recipe
    }

    /// Present between a successful create and destroy.
    pub fn config(&self) -> Option<&RecipeConfig> {
        self.config.as_ref()
    }

    /// Check attached frames against every configured tag they contain.
    fn check_frames(&self) -> Result<(), CoreError> {
        let (Some(config), Some(frames)) = (&self.config, self.recipe.frames()) else {
            return Ok(());
        };
        let mut matched = false;
        for tag in config.tags() {
            if frames.count_tags(tag) > 0 {
                matched = true;
                config.validate_frames(frames, tag)?;
            }
        }
        if !matched {
            warn!(
                recipe = %self.recipe.name,
                "No input frame matches a configured tag"
            );
        }
        Ok(())
    }
}

impl PluginHandlers for RecipeV2 {
    fn plugin_type(&self) -> PluginType {
        PluginType::RECIPE_V2
    }

    fn initialize(&mut self, _info: &PluginInfo) -> Result<(), CoreError> {
        self.recipe.create()?;
        self.config = self.recipe.definition.recipe_config();
        Ok(())
    }

    fn execute(&mut self, info: &PluginInfo) -> Result<(), CoreError> {
        self.check_frames()?;
        self.recipe.exec(info)
    }

    fn deinitialize(&mut self, _info: &PluginInfo) -> Result<(), CoreError> {
        self.recipe.destroy();
        self.config = None;
        Ok(())
    }

    fn as_recipe(&self) -> Option<&Recipe> {
        Some(&self.recipe)
    }

    fn as_recipe_mut(&mut self) -> Option<&mut Recipe> {
        Some(&mut self.recipe)
    }

    fn as_recipe_v2(&self) -> Option<&RecipeV2> {
        Some(self)
    }
}
