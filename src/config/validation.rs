//! Configuration validation.
//!
//! # Responsibilities
//! - Required settings are present (directory, process name)
//! - The directory exists, is a directory and can be listed
//! - The reload signal resolves to an OS signal number
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Runs before any watcher or signal handler is created

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::schema::{FileConfig, WatchConfig};
use crate::process::signal::{ReloadSignal, UnknownSignal};

/// A single semantic problem with the configuration.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("missing config directory (CONFIG_DIR is empty)")]
    MissingConfigDir,

    #[error("config directory {} does not exist", .0.display())]
    ConfigDirNotFound(PathBuf),

    #[error("{} is not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("config directory {} is not readable: {reason}", .path.display())]
    ConfigDirUnreadable { path: PathBuf, reason: String },

    #[error("missing process name (PROCESS_NAME is empty)")]
    MissingProcessName,

    #[error(transparent)]
    UnknownSignal(#[from] UnknownSignal),
}

/// Validate the merged configuration layers into a [`WatchConfig`].
pub fn validate_config(raw: &FileConfig) -> Result<WatchConfig, Vec<ValidationError>> {
    let mut errors = Vec::new();

    let directory = match &raw.config_dir {
        Some(dir) => match check_directory(dir) {
            Ok(()) => Some(dir.clone()),
            Err(e) => {
                errors.push(e);
                None
            }
        },
        None => {
            errors.push(ValidationError::MissingConfigDir);
            None
        }
    };

    let process_name = match raw.process_name.as_deref() {
        Some(name) if !name.trim().is_empty() => Some(name.to_string()),
        _ => {
            errors.push(ValidationError::MissingProcessName);
            None
        }
    };

    let signal = match raw.reload_signal.as_deref() {
        Some(name) => match name.parse::<ReloadSignal>() {
            Ok(signal) => Some(signal),
            Err(e) => {
                errors.push(e.into());
                None
            }
        },
        None => Some(ReloadSignal::default()),
    };

    match (directory, process_name, signal) {
        (Some(directory), Some(process_name), Some(signal)) if errors.is_empty() => Ok(WatchConfig {
            directory,
            process_name,
            signal,
        }),
        _ => Err(errors),
    }
}

fn check_directory(dir: &Path) -> Result<(), ValidationError> {
    let metadata = match fs::metadata(dir) {
        Ok(m) => m,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ValidationError::ConfigDirNotFound(dir.to_path_buf()));
        }
        Err(e) => {
            return Err(ValidationError::ConfigDirUnreadable {
                path: dir.to_path_buf(),
                reason: e.to_string(),
            });
        }
    };

    if !metadata.is_dir() {
        return Err(ValidationError::NotADirectory(dir.to_path_buf()));
    }

    fs::read_dir(dir).map_err(|e| ValidationError::ConfigDirUnreadable {
        path: dir.to_path_buf(),
        reason: e.to_string(),
    })?;

    Ok(())
}
