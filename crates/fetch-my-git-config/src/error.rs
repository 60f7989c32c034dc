//! Configuration error types.

use std::path::PathBuf;

use thiserror::Error;

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file could not be read.
    #[error("can't read config file {path}: {source}")]
    Io {
        /// Path of the configuration file.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Invalid INI syntax.
    #[error("invalid INI: {0}")]
    Parse(#[from] ini::ParseError),

    /// The same section is declared more than once.
    #[error("section '{0}' already exists")]
    DuplicateSection(String),

    /// A section lacks a required key.
    #[error("no option '{key}' in section: '{section}'")]
    MissingKey {
        /// Section name.
        section: String,
        /// Missing key.
        key: &'static str,
    },

    /// A boolean key holds something other than a boolean spelling.
    #[error("invalid boolean '{value}' for option '{key}' in section: '{section}'")]
    InvalidBool {
        /// Section name.
        section: String,
        /// Offending key.
        key: &'static str,
        /// Raw value found in the file.
        value: String,
    },
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
