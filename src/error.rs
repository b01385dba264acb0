//! Error types for tabular export
//!
//! This module defines the error hierarchy for the whole crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.
//! A row rejected by a transform is not an error: `write` reports it as `Ok(false)`.

use thiserror::Error;

/// The main error type for tabular export
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Invalid namespace '{value}': {message}")]
    InvalidNamespace { value: String, message: String },

    // ============================================================================
    // Output Errors
    // ============================================================================
    #[error("Failed to open '{path}' for writing: {source}")]
    SinkOpen {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize cell for column '{column}': {message}")]
    CellSerialization { column: String, message: String },

    #[error("Writer for '{path}' is already closed")]
    WriterClosed { path: String },

    #[error("Invalid input at line {line}: {message}")]
    Input { line: usize, message: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid config value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an invalid namespace error
    pub fn namespace(value: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidNamespace {
            value: value.into(),
            message: message.into(),
        }
    }

    /// Create a cell serialization error
    pub fn cell(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::CellSerialization {
            column: column.into(),
            message: message.into(),
        }
    }

    /// Create an input error
    pub fn input(line: usize, message: impl Into<String>) -> Self {
        Self::Input {
            line,
            message: message.into(),
        }
    }

    /// Check if this error came from the output sink
    pub fn is_io(&self) -> bool {
        matches!(self, Error::Io(_) | Error::SinkOpen { .. })
    }
}

/// Result type alias for tabular export
pub type Result<T> = std::result::Result<T, Error>;
