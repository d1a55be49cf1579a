//! Configuration error types.

use thiserror::Error;

/// Configuration error types
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("IO error reading {path}: {message}")]
    Io {
        /// Config file path
        path: String,
        /// Underlying error
        message: String,
    },

    /// Config file is not valid TOML or has wrong types
    #[error("Parse error: {0}")]
    Parse(String),

    /// Invalid log level name
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    /// An environment variable holds an unusable value
    #[error("Environment variable {name}: {message}")]
    Env {
        /// Variable name
        name: String,
        /// What is wrong with it
        message: String,
    },

    /// One or more fields failed validation
    #[error("Validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}
