//! Plugin registries

use crate::error::CoreError;
use crate::plugin::Plugin;

/// Entry point a plugin library exposes to fill a host's list.
pub type PluginInfoFn = fn(&mut PluginList) -> Result<(), CoreError>;

/// Plugins in registration order; names are unique.
#[derive(Debug, Default)]
pub struct PluginList {
    plugins: Vec<Plugin>,
}

impl PluginList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a list from a plugin library entry point.
    pub fn from_info_fn(info_fn: PluginInfoFn) -> Result<Self, CoreError> {
        let mut list = PluginList::new();
        info_fn(&mut list)?;
        Ok(list)
    }

    pub fn append(&mut self, plugin: Plugin) -> Result<(), CoreError> {
        if self.find(plugin.name()).is_some() {
            return Err(CoreError::IllegalInput(format!(
                "Plugin '{}' already registered",
                plugin.name()
            )));
        }
        self.plugins.push(plugin);
        Ok(())
    }

    pub fn find(&self, name: &str) -> Option<&Plugin> {
        self.plugins.iter().find(|p| p.name() == name)
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut Plugin> {
        self.plugins.iter_mut().find(|p| p.name() == name)
    }

    /// Remove and return the named plugin.
    pub fn take(&mut self, name: &str) -> Option<Plugin> {
        let index = self.plugins.iter().position(|p| p.name() == name)?;
        Some(self.plugins.remove(index))
    }

    pub fn names(&self) -> Vec<&str> {
        self.plugins.iter().map(Plugin::name).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Plugin> {
        self.plugins.iter()
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}
