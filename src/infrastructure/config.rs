//! Configuration file loading with precedence handling.
//!
//! Precedence, lowest to highest: built-in defaults, the TOML config file,
//! command line arguments.

use crate::domain::Operation;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read an existing config file.
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    /// Config file is not valid TOML or has unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },
}

/// TOML configuration file structure. Every key is optional.
///
/// ```toml
/// default_base = 2.0
/// default_operation = "antilog"
/// log_file_path = "/tmp/logbook.log"
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub default_base: Option<f64>,

    #[serde(default)]
    pub default_operation: Option<Operation>,

    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Configuration after defaults, file and CLI have been merged.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// Text pre-filled into the base field
    pub base: String,
    pub operation: Operation,
    /// Text pre-filled into the value field
    pub value: String,
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            base: "10".to_string(),
            operation: Operation::Log,
            value: String::new(),
            log_file_path: default_log_path(),
        }
    }
}

/// Overrides taken from the command line; `None` leaves the lower layer alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliOverrides {
    pub base: Option<f64>,
    pub operation: Option<Operation>,
    pub value: Option<f64>,
}

/// `~/.config/logbook/config.toml`, or `./logbook.toml` when there is no config dir.
pub fn default_config_path() -> PathBuf {
    match dirs::config_dir() {
        Some(dir) => dir.join("logbook").join("config.toml"),
        None => PathBuf::from("logbook.toml"),
    }
}

/// `~/.local/state/logbook/logbook.log` on Unix-like systems.
pub fn default_log_path() -> PathBuf {
    match dirs::state_dir() {
        Some(dir) => dir.join("logbook").join("logbook.log"),
        None => PathBuf::from("logbook.log"),
    }
}

/// Loads a config file.
///
/// A missing file is not an error and yields `Ok(None)`.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_config_file(path: &Path) -> Result<Option<ConfigFile>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let config = toml::from_str(&contents).map_err(|e: toml::de::Error| ConfigError::ParseError {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Merges a loaded config file over the defaults.
pub fn merge_config(file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();
    let Some(file) = file else {
        return defaults;
    };

    ResolvedConfig {
        base: file.default_base.map(format_number_input).unwrap_or(defaults.base),
        operation: file.default_operation.unwrap_or(defaults.operation),
        value: defaults.value,
        log_file_path: file.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Applies command line overrides on top of a resolved config.
pub fn apply_cli_overrides(config: ResolvedConfig, cli: &CliOverrides) -> ResolvedConfig {
    ResolvedConfig {
        base: cli.base.map(format_number_input).unwrap_or(config.base),
        operation: cli.operation.unwrap_or(config.operation),
        value: cli.value.map(format_number_input).unwrap_or(config.value),
        log_file_path: config.log_file_path,
    }
}

/// Loads the file at `path` (or the default location) and applies all layers.
///
/// # Errors
///
/// Propagates [`ConfigError`] from [`load_config_file`].
pub fn resolve_config(path: Option<&Path>, cli: &CliOverrides) -> Result<ResolvedConfig, ConfigError> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    let file = load_config_file(&path)?;
    Ok(apply_cli_overrides(merge_config(file), cli))
}

fn format_number_input(x: f64) -> String {
    crate::domain::plain(x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_none() {
        let dir = TempDir::new().unwrap();
        let result = load_config_file(&dir.path().join("absent.toml"));
        assert_eq!(result, Ok(None));
    }

    #[test]
    fn test_load_full_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "default_base = 2.0\ndefault_operation = \"antilog\"\nlog_file_path = \"/tmp/x.log\"\n",
        )
        .unwrap();

        let file = load_config_file(&path).unwrap().unwrap();
        assert_eq!(file.default_base, Some(2.0));
        assert_eq!(file.default_operation, Some(Operation::Antilog));
        assert_eq!(file.log_file_path, Some(PathBuf::from("/tmp/x.log")));
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "default_base = [").unwrap();
        assert!(matches!(load_config_file(&path), Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn test_unknown_key_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "precision = 8\n").unwrap();
        assert!(matches!(load_config_file(&path), Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn test_merge_without_file_gives_defaults() {
        let config = merge_config(None);
        assert_eq!(config, ResolvedConfig::default());
        assert_eq!(config.base, "10");
        assert_eq!(config.operation, Operation::Log);
        assert!(config.value.is_empty());
    }

    #[test]
    fn test_file_then_cli_precedence() {
        let file = ConfigFile {
            default_base: Some(2.0),
            default_operation: Some(Operation::Antilog),
            log_file_path: None,
        };
        let merged = merge_config(Some(file));
        assert_eq!(merged.base, "2");
        assert_eq!(merged.operation, Operation::Antilog);

        let cli = CliOverrides { base: Some(3.5), operation: None, value: Some(4.0) };
        let resolved = apply_cli_overrides(merged, &cli);
        assert_eq!(resolved.base, "3.5");
        assert_eq!(resolved.operation, Operation::Antilog);
        assert_eq!(resolved.value, "4");
    }

    #[test]
    fn test_resolve_config_from_explicit_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "default_operation = \"antilog\"\n").unwrap();

        let config = resolve_config(Some(&path), &CliOverrides::default()).unwrap();
        assert_eq!(config.operation, Operation::Antilog);
        assert_eq!(config.base, "10");
    }
}
