//! Error types for the report processing service.

use std::path::PathBuf;

use adapter_xml::XmlError;
use fleet_core::types::CoreError;
use infra_config::ConfigError;
use thiserror::Error;

/// Service error type
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Report, reference or output XML failure
    #[error("XML error: {0}")]
    Xml(#[from] XmlError),

    /// Aggregation failure
    #[error("Calculation error: {0}")]
    Core(#[from] CoreError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Processing a report took longer than the configured limit
    #[error("Processing {} timed out after {secs}s", path.display())]
    Timeout {
        /// Report being processed
        path: PathBuf,
        /// Configured limit
        secs: u64,
    },

    /// A processing task panicked or was cancelled
    #[error("Task failed: {0}")]
    Task(String),
}

impl ServiceError {
    /// Create a task error
    pub fn task(msg: impl Into<String>) -> Self {
        Self::Task(msg.into())
    }
}

/// Result type for service operations
pub type Result<T> = std::result::Result<T, ServiceError>;
