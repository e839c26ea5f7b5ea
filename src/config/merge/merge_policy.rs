//! Merge rules: defaults, override order, conflict handling.

use crate::config::HostConfig;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment};

/// Create a Config builder with the built-in defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let host = HostConfig::default();
    Config::builder()
        .set_default("host.output_dir", host.output_dir.to_string_lossy().into_owned())?
        .set_default("host.pipeline_id", host.pipeline_id)?
        .set_default("host.dictionary_id", host.dictionary_id)?
        .set_default("host.check_constraints", host.check_constraints)?
        .set_default("host.check_sof_exists", host.check_sof_exists)?
        .set_default("host.dump_products", host.dump_products)
}

/// Environment layer, applied last: `FRAMEKIT__HOST__OUTPUT_DIR` sets
/// `host.output_dir`.
pub fn environment() -> Environment {
    Environment::with_prefix("FRAMEKIT")
        .separator("__")
        .try_parsing(true)
}
