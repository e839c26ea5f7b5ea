//! Configuration System
//!
//! Layered configuration for the host: built-in defaults, then the global
//! file, then the workspace file, then `FRAMEKIT__*` environment
//! variables.

use crate::logging::LoggingConfig;
use crate::plugin::Version;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FramekitConfig {
    /// Recipe run settings
    #[serde(default)]
    pub host: HostConfig,

    /// Command output settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Recipe run settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostConfig {
    /// Directory recipes write products to
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Pipeline identifier written to product headers
    #[serde(default = "default_pipeline_id")]
    pub pipeline_id: String,

    /// Data dictionary identifier written to product headers
    #[serde(default = "default_dictionary_id")]
    pub dictionary_id: String,

    /// Warn when a parameter value falls outside its range or alternatives
    #[serde(default = "default_true")]
    pub check_constraints: bool,

    /// Require every file listed in a set of frames to exist
    #[serde(default)]
    pub check_sof_exists: bool,

    /// Print assembled product headers after a run
    #[serde(default)]
    pub dump_products: bool,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_pipeline_id() -> String {
    format!("framekit/{}", Version::current())
}

fn default_dictionary_id() -> String {
    "PRO-1.15".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            pipeline_id: default_pipeline_id(),
            dictionary_id: default_dictionary_id(),
            check_constraints: default_true(),
            check_sof_exists: false,
            dump_products: false,
        }
    }
}

/// Command output settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default output format: text, json
    #[serde(default = "default_output_format")]
    pub format: String,

    /// Colored text output
    #[serde(default = "default_true")]
    pub color: bool,
}

fn default_output_format() -> String {
    "text".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_output_format(),
            color: default_true(),
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    Host(String),
    Output(String),
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Host(msg) => write!(f, "Host: {}", msg),
            ValidationError::Output(msg) => write!(f, "Output: {}", msg),
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl HostConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.output_dir.as_os_str().is_empty() {
            return Err("Output directory cannot be empty".to_string());
        }
        if self.pipeline_id.trim().is_empty() {
            return Err("Pipeline id cannot be empty".to_string());
        }
        if self.dictionary_id.trim().is_empty() {
            return Err("Dictionary id cannot be empty".to_string());
        }
        Ok(())
    }
}

impl OutputConfig {
    pub fn validate(&self) -> Result<(), String> {
        match self.format.as_str() {
            "text" | "json" => Ok(()),
            other => Err(format!(
                "Invalid output format: {} (must be 'text' or 'json')",
                other
            )),
        }
    }
}

impl FramekitConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = self.host.validate() {
            errors.push(ValidationError::Host(e));
        }
        if let Err(e) = self.output.validate() {
            errors.push(ValidationError::Output(e));
        }
        if let Err(e) = self.logging.validate() {
            errors.push(ValidationError::Logging(e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
