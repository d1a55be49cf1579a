//! # infra_config: Processor Configuration
//!
//! Loads [`AppConfig`] from, lowest to highest priority:
//! 1. Default values
//! 2. A TOML file
//! 3. `FLEET_*` environment variables
//! 4. Command-line overrides ([`CliOverrides`])
//!
//! and validates the merged result.

pub mod config;
pub mod error;
pub mod filter;

pub use config::{build_config, AppConfig, CliOverrides, LogLevel};
pub use error::ConfigError;
pub use filter::FileFilter;
