//! Processor configuration management.
//!
//! Handles loading configuration from TOML files, environment variables and
//! CLI arguments.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::error::ConfigError;
use crate::filter::FileFilter;

/// Config file read when no path is given and the file exists.
pub const DEFAULT_CONFIG_FILE: &str = "fleet-report.toml";

/// Prefix of every environment override.
pub const ENV_PREFIX: &str = "FLEET_";

const MAX_WORKERS: usize = 64;

/// Log levels supported by the processor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Trace level
    Trace,
    /// Debug level
    Debug,
    /// Info level
    #[default]
    Info,
    /// Warn level
    Warn,
    /// Error level
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

impl<'de> Deserialize<'de> for LogLevel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        LogLevel::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// Processor configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Folder watched for incoming reports
    pub input_folder: PathBuf,
    /// Folder the output document is written to
    pub output_folder: PathBuf,
    /// Reference factor file, loaded once at startup
    pub reference_data_path: PathBuf,
    /// Name pattern of report files to pick up
    pub file_filter: String,
    /// Name of the output document
    pub output_file_name: String,
    /// Folder scan interval in milliseconds
    pub poll_interval_ms: u64,
    /// Number of reports processed concurrently
    pub worker_count: usize,
    /// Pending report events held before the watcher waits
    pub channel_capacity: usize,
    /// Wall-clock limit for processing one report
    pub processing_timeout_secs: Option<u64>,
    /// Log level
    pub log_level: LogLevel,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            input_folder: PathBuf::from("input"),
            output_folder: PathBuf::from("output"),
            reference_data_path: PathBuf::from("ReferenceData.xml"),
            file_filter: "GenerationReport.xml".to_string(),
            output_file_name: "GenerationOutput.xml".to_string(),
            poll_interval_ms: 500,
            worker_count: 1,
            channel_capacity: 64,
            processing_timeout_secs: None,
            log_level: LogLevel::Info,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply `FLEET_*` environment variable overrides
    pub fn with_env_override(self) -> Result<Self, ConfigError> {
        self.with_env_override_from(|name| std::env::var(name).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn with_env_override_from<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(&format!("{}{}", ENV_PREFIX, key));

        if let Some(value) = var("INPUT_FOLDER") {
            self.input_folder = PathBuf::from(value);
        }
        if let Some(value) = var("OUTPUT_FOLDER") {
            self.output_folder = PathBuf::from(value);
        }
        if let Some(value) = var("REFERENCE_DATA_PATH") {
            self.reference_data_path = PathBuf::from(value);
        }
        if let Some(value) = var("FILE_FILTER") {
            self.file_filter = value;
        }
        if let Some(value) = var("OUTPUT_FILE_NAME") {
            self.output_file_name = value;
        }
        if let Some(value) = var("POLL_INTERVAL_MS") {
            self.poll_interval_ms = parse_env("POLL_INTERVAL_MS", &value)?;
        }
        if let Some(value) = var("WORKER_COUNT") {
            self.worker_count = parse_env("WORKER_COUNT", &value)?;
        }
        if let Some(value) = var("CHANNEL_CAPACITY") {
            self.channel_capacity = parse_env("CHANNEL_CAPACITY", &value)?;
        }
        if let Some(value) = var("PROCESSING_TIMEOUT_SECS") {
            self.processing_timeout_secs = Some(parse_env("PROCESSING_TIMEOUT_SECS", &value)?);
        }
        if let Some(value) = var("LOG_LEVEL") {
            self.log_level = LogLevel::from_str(&value)?;
        }

        Ok(self)
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliOverrides) {
        if let Some(input_folder) = &cli.input_folder {
            self.input_folder = input_folder.clone();
        }
        if let Some(output_folder) = &cli.output_folder {
            self.output_folder = output_folder.clone();
        }
        if let Some(reference_data_path) = &cli.reference_data_path {
            self.reference_data_path = reference_data_path.clone();
        }
        if let Some(log_level) = cli.log_level {
            self.log_level = log_level;
        }
    }

    /// Validate the configuration, collecting every problem
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.input_folder.as_os_str().is_empty() {
            errors.push("input_folder cannot be empty".to_string());
        }
        if self.output_folder.as_os_str().is_empty() {
            errors.push("output_folder cannot be empty".to_string());
        }
        if self.reference_data_path.as_os_str().is_empty() {
            errors.push("reference_data_path cannot be empty".to_string());
        }

        if let Err(ConfigError::Validation(filter_errors)) = FileFilter::parse(&self.file_filter) {
            errors.extend(filter_errors);
        }

        if self.output_file_name.trim().is_empty() {
            errors.push("output_file_name cannot be empty".to_string());
        } else if self.output_file_name.contains(['/', '\\']) {
            errors.push(format!(
                "output_file_name '{}' must be a file name, not a path",
                self.output_file_name
            ));
        }

        if self.poll_interval_ms == 0 {
            errors.push("poll_interval_ms must be greater than 0".to_string());
        }

        if self.worker_count == 0 {
            errors.push("worker_count must be greater than 0".to_string());
        }
        if self.worker_count > MAX_WORKERS {
            errors.push(format!(
                "worker_count {} exceeds maximum allowed ({})",
                self.worker_count, MAX_WORKERS
            ));
        }

        if self.channel_capacity == 0 {
            errors.push("channel_capacity must be greater than 0".to_string());
        }

        if self.processing_timeout_secs == Some(0) {
            errors.push("processing_timeout_secs must be greater than 0 when set".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Parsed report file filter
    pub fn file_filter(&self) -> Result<FileFilter, ConfigError> {
        FileFilter::parse(&self.file_filter)
    }

    /// Full path of the output document
    pub fn output_path(&self) -> PathBuf {
        self.output_folder.join(&self.output_file_name)
    }

    /// Folder scan interval
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Processing time limit, if any
    pub fn processing_timeout(&self) -> Option<Duration> {
        self.processing_timeout_secs.map(Duration::from_secs)
    }
}

fn parse_env<T: FromStr>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::Env {
        name: format!("{}{}", ENV_PREFIX, key),
        message: format!("'{}': {}", value, e),
    })
}

/// Values given on the command line
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    /// Config file path
    pub config_file: Option<PathBuf>,
    /// Watched folder override
    pub input_folder: Option<PathBuf>,
    /// Output folder override
    pub output_folder: Option<PathBuf>,
    /// Reference data path override
    pub reference_data_path: Option<PathBuf>,
    /// Log level override
    pub log_level: Option<LogLevel>,
}

/// Build configuration from all sources
///
/// Priority (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables
/// 3. Config file (explicit, or `fleet-report.toml` when present)
/// 4. Default values
pub fn build_config(cli: &CliOverrides) -> Result<AppConfig, ConfigError> {
    let default_file = Path::new(DEFAULT_CONFIG_FILE);
    let mut config = match &cli.config_file {
        Some(path) => AppConfig::from_file(path)?,
        None if default_file.is_file() => AppConfig::from_file(default_file)?,
        None => AppConfig::default(),
    };

    config = config.with_env_override()?;
    config.merge_with_cli(cli);
    config.validate()?;

    debug!(?config, "Configuration built");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.input_folder, PathBuf::from("input"));
        assert_eq!(config.file_filter, "GenerationReport.xml");
        assert_eq!(config.output_path(), PathBuf::from("output").join("GenerationOutput.xml"));
        assert_eq!(config.worker_count, 1);
        assert_eq!(config.processing_timeout(), None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::from_str("trace").unwrap(), LogLevel::Trace);
        assert_eq!(LogLevel::from_str("DEBUG").unwrap(), LogLevel::Debug);
        assert_eq!(LogLevel::from_str("Warn").unwrap(), LogLevel::Warn);
        assert!(LogLevel::from_str("loud").is_err());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
            input_folder = "/data/in"
            worker_count = 2
            log_level = "DEBUG"
            processing_timeout_secs = 30
            "#,
        )
        .unwrap();

        assert_eq!(config.input_folder, PathBuf::from("/data/in"));
        assert_eq!(config.worker_count, 2);
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.processing_timeout(), Some(Duration::from_secs(30)));
        assert_eq!(config.output_folder, PathBuf::from("output"));
    }

    #[test]
    fn test_example_config_matches_defaults() {
        let content = include_str!("../../../config/fleet-report.example.toml");
        let config = AppConfig::from_toml_str(content).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_toml_type_error() {
        let err = AppConfig::from_toml_str("worker_count = \"many\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));

        let err = AppConfig::from_toml_str("log_level = \"loud\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_env_override() {
        let config = AppConfig::default()
            .with_env_override_from(lookup(&[
                ("FLEET_INPUT_FOLDER", "/watch"),
                ("FLEET_POLL_INTERVAL_MS", "250"),
                ("FLEET_PROCESSING_TIMEOUT_SECS", "5"),
                ("FLEET_LOG_LEVEL", "warn"),
            ]))
            .unwrap();

        assert_eq!(config.input_folder, PathBuf::from("/watch"));
        assert_eq!(config.poll_interval(), Duration::from_millis(250));
        assert_eq!(config.processing_timeout_secs, Some(5));
        assert_eq!(config.log_level, LogLevel::Warn);
    }

    #[test]
    fn test_env_override_bad_number() {
        let err = AppConfig::default()
            .with_env_override_from(lookup(&[("FLEET_WORKER_COUNT", "lots")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Env { ref name, .. } if name == "FLEET_WORKER_COUNT"));
    }

    #[test]
    fn test_cli_takes_precedence() {
        let mut config = AppConfig::default()
            .with_env_override_from(lookup(&[("FLEET_OUTPUT_FOLDER", "/env/out")]))
            .unwrap();
        config.merge_with_cli(&CliOverrides {
            output_folder: Some(PathBuf::from("/cli/out")),
            log_level: Some(LogLevel::Trace),
            ..CliOverrides::default()
        });

        assert_eq!(config.output_folder, PathBuf::from("/cli/out"));
        assert_eq!(config.log_level, LogLevel::Trace);
    }

    #[test]
    fn test_validate_multiple_errors() {
        let config = AppConfig {
            poll_interval_ms: 0,
            worker_count: 0,
            channel_capacity: 0,
            output_file_name: "out/GenerationOutput.xml".to_string(),
            file_filter: "*a*".to_string(),
            processing_timeout_secs: Some(0),
            ..AppConfig::default()
        };

        let Err(ConfigError::Validation(errors)) = config.validate() else {
            panic!("Expected validation error");
        };
        assert_eq!(errors.len(), 6, "{errors:?}");
        assert!(errors.iter().any(|e| e.contains("poll_interval_ms")));
        assert!(errors.iter().any(|e| e.contains("not a path")));
        assert!(errors.iter().any(|e| e.contains("at most one")));
    }

    #[test]
    fn test_validate_worker_cap() {
        let config = AppConfig {
            worker_count: MAX_WORKERS + 1,
            ..AppConfig::default()
        };
        let Err(ConfigError::Validation(errors)) = config.validate() else {
            panic!("Expected validation error");
        };
        assert!(errors[0].contains("exceeds maximum"));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fleet-report.toml");
        std::fs::write(&path, "file_filter = \"*.xml\"\n").unwrap();

        let config = AppConfig::from_file(&path).unwrap();
        assert_eq!(config.file_filter().unwrap(), FileFilter::parse("*.xml").unwrap());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = AppConfig::from_file(Path::new("/no/such/fleet-report.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_build_config_with_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "reference_data_path = \"refs/ReferenceData.xml\"\n").unwrap();

        let config = build_config(&CliOverrides {
            config_file: Some(path),
            input_folder: Some(PathBuf::from("cli-in")),
            ..CliOverrides::default()
        })
        .unwrap();

        assert_eq!(config.reference_data_path, PathBuf::from("refs/ReferenceData.xml"));
        assert_eq!(config.input_folder, PathBuf::from("cli-in"));
    }
}
