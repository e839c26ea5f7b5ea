//! Configuration loading entry points

use super::merge::merge_policy;
use super::sources::{global_file, workspace_file};
use super::FramekitConfig;
use crate::error::CoreError;
use config::File;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Loads [`FramekitConfig`] from its layered sources.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Defaults, global file, `<workspace>/framekit.toml`, environment.
    pub fn load(workspace_root: &Path) -> Result<FramekitConfig, CoreError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = workspace_file::add_to_builder(builder, workspace_root)?;
        let config = builder
            .add_source(merge_policy::environment())
            .build()?
            .try_deserialize::<FramekitConfig>()?;
        debug!(workspace = %workspace_root.display(), "Configuration loaded");
        Ok(config)
    }

    /// Defaults plus a single file; no global, workspace or environment layer.
    pub fn load_from_file(path: &Path) -> Result<FramekitConfig, CoreError> {
        if !path.exists() {
            return Err(CoreError::FileNotFound(path.to_path_buf()));
        }
        let config = merge_policy::builder_with_defaults()?
            .add_source(File::from(path))
            .build()?
            .try_deserialize::<FramekitConfig>()?;
        Ok(config)
    }

    /// Location of the global configuration file, if one can be derived.
    pub fn global_config_path() -> Option<PathBuf> {
        global_file::global_config_path()
    }
}
