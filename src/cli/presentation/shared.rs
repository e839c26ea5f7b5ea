//! Shared presentation helpers.

use crate::error::CoreError;
use owo_colors::OwoColorize;
use serde::Serialize;

/// Format a section heading, bold/underlined when `color` is set.
pub(super) fn format_section_heading(title: &str, color: bool) -> String {
    if color {
        format!("{}", title.bold().underline())
    } else {
        title.to_string()
    }
}

/// Pretty JSON for any serializable result.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, CoreError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| CoreError::IllegalInput(format!("Cannot encode JSON output: {}", e)))
}

pub(super) fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}
