//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::CoreError;

/// Map a domain error to a single line for CLI output, prefixed with its
/// taxonomy name.
pub fn map_error(e: &CoreError) -> String {
    format!("[{}] {}", e.kind(), e)
}
