//! Built-in recipes

pub mod frame_groups;

pub use frame_groups::FrameGroups;

use crate::error::CoreError;
use crate::plugin::PluginList;
use crate::recipe::Recipe;

/// Register every built-in recipe. Matches [`crate::plugin::PluginInfoFn`].
pub fn register(list: &mut PluginList) -> Result<(), CoreError> {
    list.append(Recipe::plugin(Box::new(FrameGroups))?)?;
    Ok(())
}
