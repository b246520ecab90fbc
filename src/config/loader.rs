//! Configuration loading: optional TOML file, then flags and environment.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::schema::{FileConfig, ReloaderArgs, WatchConfig};
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {}: {source}", .path.display())]
    Io { path: PathBuf, source: std::io::Error },

    #[error("cannot parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid configuration: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors.iter().map(|e| e.to_string()).collect::<Vec<_>>().join(", ")
}

/// Parse a TOML config file.
pub fn load_file(path: &Path) -> Result<FileConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(toml::from_str(&content)?)
}

/// Resolve and validate the configuration from all layers.
pub fn load_config(args: &ReloaderArgs) -> Result<WatchConfig, ConfigError> {
    let file = match &args.config_file {
        Some(path) if !path.as_os_str().is_empty() => load_file(path)?,
        _ => FileConfig::default(),
    };

    validate_config(&file.overlay(args)).map_err(ConfigError::Validation)
}
