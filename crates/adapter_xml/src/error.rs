//! XML adapter error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading or writing XML files.
#[derive(Debug, Error)]
pub enum XmlError {
    /// Input file is missing or the path is blank
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Filesystem error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error reported by the XML reader or writer
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Structurally broken document
    #[error("Malformed XML: {0}")]
    Malformed(String),

    /// A required element is absent
    #[error("Missing required element <{0}>")]
    MissingElement(String),

    /// An element that must hold a number does not
    #[error("Invalid number in <{element}>: '{value}'")]
    InvalidNumber {
        /// Element name
        element: String,
        /// Offending text
        value: String,
    },
}

impl XmlError {
    /// Create a malformed document error
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::Malformed(msg.into())
    }

    /// Create a missing element error
    pub fn missing_element(name: impl Into<String>) -> Self {
        Self::MissingElement(name.into())
    }
}
