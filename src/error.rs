//! Error types for argbind

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for argbind operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for argbind
#[derive(Error, Debug)]
pub enum Error {
    // -------------------------------------------------------------------------
    // Declaration Source Errors
    // -------------------------------------------------------------------------
    #[error("Failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode declarations from '{path}': {reason}")]
    Decode { path: PathBuf, reason: String },

    // -------------------------------------------------------------------------
    // Coercion Errors
    // -------------------------------------------------------------------------
    #[error("Invalid value '{raw}' for argument '{name}': {reason}")]
    Parse {
        name: String,
        raw: String,
        reason: String,
    },

    #[error("Unsupported type '{type_name}' for argument '{name}'")]
    UnsupportedType { name: String, type_name: String },

    #[error("Type mismatch for field '{field}': expected {expected}, got {actual}")]
    TypeMismatch {
        field: String,
        expected: String,
        actual: String,
    },

    // -------------------------------------------------------------------------
    // Registration Errors
    // -------------------------------------------------------------------------
    #[error("Flag '--{flag}' declared by '{second}' is already registered by '{first}'")]
    DuplicateFlag {
        flag: String,
        first: String,
        second: String,
    },

    #[error("Argument '{0}' is already loaded")]
    DuplicateArgument(String),

    // -------------------------------------------------------------------------
    // Resolution Errors
    // -------------------------------------------------------------------------
    #[error("Required argument '{0}' has no flag, environment or default value")]
    MissingRequired(String),

    #[error("Argument not found: {0}")]
    NotFound(String),

    #[error("Failed to parse command-line flags: {0}")]
    FlagParse(#[from] clap::Error),
}

impl Error {
    /// Check if this is a "not found" type error
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }

    /// Check if this error can only come out of `Registry::load`
    #[must_use]
    pub fn is_load_error(&self) -> bool {
        matches!(
            self,
            Error::UnsupportedType { .. }
                | Error::DuplicateFlag { .. }
                | Error::DuplicateArgument(_)
        )
    }

    pub(crate) fn parse(name: &str, raw: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::Parse {
            name: name.to_string(),
            raw: raw.into(),
            reason: reason.into(),
        }
    }
}
