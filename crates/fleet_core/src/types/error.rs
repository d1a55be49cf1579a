//! Error types for the calculation engine.

use thiserror::Error;

/// Errors raised by the calculation engine.
///
/// Zero net generation is deliberately absent: it is a defined input that
/// yields a heat rate of 0, not a failure.
///
/// # Examples
/// ```
/// use fleet_core::types::CoreError;
///
/// let err = CoreError::InvalidCategory("Nuclear".to_string());
/// assert_eq!(format!("{}", err), "Invalid generator category: Nuclear");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A category outside the closed set reached the factor resolver or a parser.
    #[error("Invalid generator category: {0}")]
    InvalidCategory(String),

    /// A formatted value or date could not be read back.
    #[error("Format error: {0}")]
    Format(String),
}

impl CoreError {
    /// Create an invalid category error
    pub fn invalid_category(category: impl Into<String>) -> Self {
        Self::InvalidCategory(category.into())
    }

    /// Create a format error
    pub fn format(msg: impl Into<String>) -> Self {
        Self::Format(msg.into())
    }
}
