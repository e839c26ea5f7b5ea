//! Plugin descriptors and lifecycle
//!
//! A plugin pairs static metadata ([`PluginInfo`]) with three handlers:
//! initialize, execute and deinitialize. [`Plugin`] drives the handlers
//! through a fixed state machine; recipes are the only plugin kind so far
//! and are reached through a checked downcast on the type tag.

pub mod list;
pub mod version;

pub use list::{PluginInfoFn, PluginList};
pub use version::{check_version_skew, Version};

use crate::error::CoreError;
use crate::recipe::{Recipe, RecipeV2};
use serde::Serialize;
use std::fmt;
use tracing::{debug, instrument};

/// Plugin interface version understood by this library.
pub const PLUGIN_API: u32 = 1;

/// Plugin kind bitmask
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PluginType(u32);

impl PluginType {
    pub const NONE: PluginType = PluginType(0);
    pub const RECIPE: PluginType = PluginType(1);
    /// Version 2 recipes carry a frame configuration and are recipes too.
    pub const RECIPE_V2: PluginType = PluginType(2 | 1);

    pub fn bits(self) -> u32 {
        self.0
    }

    /// Every bit of `other` is set in `self`.
    pub fn contains(self, other: PluginType) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn as_str(self) -> &'static str {
        if self.contains(PluginType::RECIPE_V2) {
            "recipe_v2"
        } else if self.contains(PluginType::RECIPE) {
            "recipe"
        } else {
            "none"
        }
    }
}

impl fmt::Display for PluginType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static plugin metadata
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PluginInfo {
    /// Interface version; checked before anything else is trusted.
    pub api: u32,
    /// Plugin's own version, packed as by [`Version::code`].
    pub version: u64,
    pub plugin_type: PluginType,
    pub name: String,
    pub synopsis: String,
    pub description: String,
    pub author: String,
    pub email: String,
    pub copyright: String,
}

/// Lifecycle position of a [`Plugin`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PluginState {
    Uninitialized,
    Initialized,
    Deinitialized,
}

/// Handlers a plugin kind implements. Every handler defaults to a no-op.
pub trait PluginHandlers: Send {
    /// Kind these handlers implement; the plugin's info must include it.
    fn plugin_type(&self) -> PluginType {
        PluginType::NONE
    }

    fn initialize(&mut self, _info: &PluginInfo) -> Result<(), CoreError> {
        Ok(())
    }

    fn execute(&mut self, _info: &PluginInfo) -> Result<(), CoreError> {
        Ok(())
    }

    fn deinitialize(&mut self, _info: &PluginInfo) -> Result<(), CoreError> {
        Ok(())
    }

    fn as_recipe(&self) -> Option<&Recipe> {
        None
    }

    fn as_recipe_mut(&mut self) -> Option<&mut Recipe> {
        None
    }

    fn as_recipe_v2(&self) -> Option<&RecipeV2> {
        None
    }
}

/// Plugin handlers with no behaviour at all.
#[derive(Debug, Default)]
pub struct NoopHandlers;

impl PluginHandlers for NoopHandlers {}

/// A plugin instance moving Uninitialized → Initialized → Deinitialized.
pub struct Plugin {
    info: PluginInfo,
    state: PluginState,
    handlers: Box<dyn PluginHandlers>,
}

impl Plugin {
    /// Wrap handlers; `info.api` must match [`PLUGIN_API`].
    pub fn new(info: PluginInfo, handlers: Box<dyn PluginHandlers>) -> Result<Self, CoreError> {
        if info.api != PLUGIN_API {
            return Err(CoreError::IncompatibleVersion(format!(
                "Plugin '{}' uses interface {}, expected {}",
                info.name, info.api, PLUGIN_API
            )));
        }
        if info.name.is_empty() {
            return Err(CoreError::NullInput("plugin name".into()));
        }
        if !info.plugin_type.contains(handlers.plugin_type()) {
            return Err(CoreError::IllegalInput(format!(
                "Plugin '{}' declared as {} but its handlers implement {}",
                info.name,
                info.plugin_type,
                handlers.plugin_type()
            )));
        }
        Ok(Plugin {
            info,
            state: PluginState::Uninitialized,
            handlers,
        })
    }

    pub fn info(&self) -> &PluginInfo {
        &self.info
    }

    pub fn name(&self) -> &str {
        &self.info.name
    }

    pub fn plugin_type(&self) -> PluginType {
        self.info.plugin_type
    }

    pub fn state(&self) -> PluginState {
        self.state
    }

    /// Run the initialize handler. On failure the plugin stays
    /// uninitialized and may still be deinitialized.
    #[instrument(skip(self), fields(plugin = %self.info.name))]
    pub fn initialize(&mut self) -> Result<(), CoreError> {
        if self.state != PluginState::Uninitialized {
            return Err(self.out_of_order("initialize"));
        }
        self.handlers.initialize(&self.info)?;
        self.state = PluginState::Initialized;
        debug!("Plugin initialized");
        Ok(())
    }

    #[instrument(skip(self), fields(plugin = %self.info.name))]
    pub fn execute(&mut self) -> Result<(), CoreError> {
        if self.state != PluginState::Initialized {
            return Err(self.out_of_order("execute"));
        }
        self.handlers.execute(&self.info)
    }

    /// Run the deinitialize handler. Calling it again once the plugin is
    /// deinitialized does nothing.
    #[instrument(skip(self), fields(plugin = %self.info.name))]
    pub fn deinitialize(&mut self) -> Result<(), CoreError> {
        if self.state == PluginState::Deinitialized {
            return Ok(());
        }
        self.state = PluginState::Deinitialized;
        self.handlers.deinitialize(&self.info)?;
        debug!("Plugin deinitialized");
        Ok(())
    }

    /// Recipe view of this plugin, if its type tag says it is one.
    pub fn recipe(&self) -> Option<&Recipe> {
        if self.info.plugin_type.contains(PluginType::RECIPE) {
            self.handlers.as_recipe()
        } else {
            None
        }
    }

    pub fn recipe_mut(&mut self) -> Option<&mut Recipe> {
        if self.info.plugin_type.contains(PluginType::RECIPE) {
            self.handlers.as_recipe_mut()
        } else {
            None
        }
    }

    pub fn recipe_v2(&self) -> Option<&RecipeV2> {
        if self.info.plugin_type.contains(PluginType::RECIPE_V2) {
            self.handlers.as_recipe_v2()
        } else {
            None
        }
    }

    fn out_of_order(&self, action: &str) -> CoreError {
        CoreError::IllegalInput(format!(
            "Cannot {} plugin '{}' in state {:?}",
            action, self.info.name, self.state
        ))
    }
}

impl fmt::Debug for Plugin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Plugin")
            .field("info", &self.info)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Plugin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Plugin: {} ({})", self.info.name, self.info.plugin_type)?;
        writeln!(f, "  Version:   {}", self.info.version)?;
        writeln!(f, "  Synopsis:  {}", self.info.synopsis)?;
        writeln!(f, "  Author:    {} <{}>", self.info.author, self.info.email)?;
        write!(f, "  Copyright: {}", self.info.copyright)
    }
}
