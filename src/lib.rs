//! Framekit: frame-set bookkeeping for data-reduction pipelines
//!
//! Tagged sets of frames, typed recipe parameters, and the plugin and recipe
//! lifecycle a host drives to run a recipe and describe its products.

pub mod cli;
pub mod config;
pub mod dfs;
pub mod error;
pub mod frame;
pub mod host;
pub mod logging;
pub mod parameter;
pub mod plugin;
pub mod recipe;
pub mod recipes;
