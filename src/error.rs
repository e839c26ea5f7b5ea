//! Error types for the framekit frame, parameter and plugin layers.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Coarse error taxonomy shared by every layer of the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    NullInput,
    IllegalInput,
    InvalidType,
    TypeMismatch,
    AccessOutOfRange,
    DataNotFound,
    StaleIterator,
    IncompatibleVersion,
    FileNotFound,
    BadFileFormat,
    FileIo,
    Config,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::NullInput => "NULL_INPUT",
            ErrorKind::IllegalInput => "ILLEGAL_INPUT",
            ErrorKind::InvalidType => "INVALID_TYPE",
            ErrorKind::TypeMismatch => "TYPE_MISMATCH",
            ErrorKind::AccessOutOfRange => "ACCESS_OUT_OF_RANGE",
            ErrorKind::DataNotFound => "DATA_NOT_FOUND",
            ErrorKind::StaleIterator => "STALE_ITERATOR",
            ErrorKind::IncompatibleVersion => "INCOMPATIBLE_VERSION",
            ErrorKind::FileNotFound => "FILE_NOT_FOUND",
            ErrorKind::BadFileFormat => "BAD_FILE_FORMAT",
            ErrorKind::FileIo => "FILE_IO",
            ErrorKind::Config => "CONFIG",
        };
        f.write_str(name)
    }
}

/// Errors raised by framesets, parameters, plugins and their collaborators
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Required input missing: {0}")]
    NullInput(String),

    #[error("Illegal input: {0}")]
    IllegalInput(String),

    #[error("Invalid type: {0}")]
    InvalidType(String),

    #[error("Type mismatch: {0}")]
    TypeMismatch(String),

    #[error("Access out of range: {0}")]
    AccessOutOfRange(String),

    #[error("Data not found: {0}")]
    DataNotFound(String),

    #[error("Stale iterator: frameset changed from generation {expected} to {actual}")]
    StaleIterator { expected: u64, actual: u64 },

    #[error("Incompatible version: {0}")]
    IncompatibleVersion(String),

    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Bad file format in {}: {message}", path.display())]
    BadFileFormat { path: PathBuf, message: String },

    #[error("File I/O error: {0}")]
    FileIo(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl CoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::NullInput(_) => ErrorKind::NullInput,
            CoreError::IllegalInput(_) => ErrorKind::IllegalInput,
            CoreError::InvalidType(_) => ErrorKind::InvalidType,
            CoreError::TypeMismatch(_) => ErrorKind::TypeMismatch,
            CoreError::AccessOutOfRange(_) => ErrorKind::AccessOutOfRange,
            CoreError::DataNotFound(_) => ErrorKind::DataNotFound,
            CoreError::StaleIterator { .. } => ErrorKind::StaleIterator,
            CoreError::IncompatibleVersion(_) => ErrorKind::IncompatibleVersion,
            CoreError::FileNotFound(_) => ErrorKind::FileNotFound,
            CoreError::BadFileFormat { .. } => ErrorKind::BadFileFormat,
            CoreError::FileIo(_) => ErrorKind::FileIo,
            CoreError::Config(_) => ErrorKind::Config,
        }
    }

    /// Prefix the message with `context`, keeping the kind.
    pub fn with_context(self, context: &str) -> Self {
        let wrap = |message: String| format!("{}: {}", context, message);
        match self {
            CoreError::NullInput(m) => CoreError::NullInput(wrap(m)),
            CoreError::IllegalInput(m) => CoreError::IllegalInput(wrap(m)),
            CoreError::InvalidType(m) => CoreError::InvalidType(wrap(m)),
            CoreError::TypeMismatch(m) => CoreError::TypeMismatch(wrap(m)),
            CoreError::AccessOutOfRange(m) => CoreError::AccessOutOfRange(wrap(m)),
            CoreError::DataNotFound(m) => CoreError::DataNotFound(wrap(m)),
            CoreError::IncompatibleVersion(m) => CoreError::IncompatibleVersion(wrap(m)),
            CoreError::BadFileFormat { path, message } => CoreError::BadFileFormat {
                path,
                message: wrap(message),
            },
            CoreError::Config(m) => CoreError::Config(wrap(m)),
            other => other,
        }
    }
}

impl From<config::ConfigError> for CoreError {
    fn from(err: config::ConfigError) -> Self {
        CoreError::Config(err.to_string())
    }
}

/// One recorded failure, with the place it was recorded from.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntry {
    pub kind: ErrorKind,
    pub location: String,
    pub message: String,
}

/// Errors accumulated while a recipe runs.
///
/// A recipe records every failure it decides to report here; the plugin
/// exec wrapper dumps the history when it is non-empty after the run.
#[derive(Debug, Default, Clone, Serialize)]
pub struct ErrorHistory {
    entries: Vec<HistoryEntry>,
}

impl ErrorHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error and hand it back so the caller can keep propagating it.
    pub fn record(&mut self, location: &str, error: CoreError) -> CoreError {
        self.entries.push(HistoryEntry {
            kind: error.kind(),
            location: location.to_string(),
            message: error.to_string(),
        });
        error
    }

    /// Record an error the caller keeps ownership of.
    pub fn note(&mut self, location: &str, error: &CoreError) {
        self.entries.push(HistoryEntry {
            kind: error.kind(),
            location: location.to_string(),
            message: error.to_string(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Emit every recorded entry, oldest first, through `tracing`.
    pub fn dump(&self) {
        for (index, entry) in self.entries.iter().enumerate() {
            tracing::error!(
                index = index + 1,
                total = self.entries.len(),
                kind = %entry.kind,
                location = %entry.location,
                "{}",
                entry.message
            );
        }
    }
}
