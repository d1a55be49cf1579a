//! File name filter for the watched folder.
//!
//! Supports an exact name (`GenerationReport.xml`), match-all (`*` or `*.*`)
//! and a single `*` wildcard (`*.xml`, `Report_*.xml`). Matching ignores
//! ASCII case.

use std::fmt;

use crate::error::ConfigError;

/// Parsed file name filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileFilter {
    /// Every file
    Any,
    /// Exactly this name
    Exact(String),
    /// Starts with `prefix` and ends with `suffix`
    Wildcard {
        /// Text before the `*`
        prefix: String,
        /// Text after the `*`
        suffix: String,
    },
}

impl FileFilter {
    /// Parse a filter pattern.
    ///
    /// # Examples
    ///
    /// ```
    /// use infra_config::FileFilter;
    ///
    /// let filter = FileFilter::parse("*.xml").unwrap();
    /// assert!(filter.matches("GenerationReport.XML"));
    /// assert!(!filter.matches("notes.txt"));
    /// ```
    pub fn parse(pattern: &str) -> Result<Self, ConfigError> {
        let pattern = pattern.trim();
        if pattern.is_empty() {
            return Err(ConfigError::Validation(vec![
                "file_filter cannot be empty".to_string(),
            ]));
        }
        if pattern == "*" || pattern == "*.*" {
            return Ok(FileFilter::Any);
        }

        match pattern.split_once('*') {
            None => Ok(FileFilter::Exact(pattern.to_string())),
            Some((_, rest)) if rest.contains('*') => Err(ConfigError::Validation(vec![format!(
                "file_filter '{}' may contain at most one '*'",
                pattern
            )])),
            Some((prefix, suffix)) => Ok(FileFilter::Wildcard {
                prefix: prefix.to_string(),
                suffix: suffix.to_string(),
            }),
        }
    }

    /// Whether `file_name` passes the filter
    pub fn matches(&self, file_name: &str) -> bool {
        let name = file_name.to_ascii_lowercase();
        match self {
            FileFilter::Any => true,
            FileFilter::Exact(expected) => name == expected.to_ascii_lowercase(),
            FileFilter::Wildcard { prefix, suffix } => {
                let prefix = prefix.to_ascii_lowercase();
                let suffix = suffix.to_ascii_lowercase();
                name.len() >= prefix.len() + suffix.len()
                    && name.starts_with(&prefix)
                    && name.ends_with(&suffix)
            }
        }
    }
}

impl fmt::Display for FileFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileFilter::Any => write!(f, "*"),
            FileFilter::Exact(name) => write!(f, "{}", name),
            FileFilter::Wildcard { prefix, suffix } => write!(f, "{}*{}", prefix, suffix),
        }
    }
}
