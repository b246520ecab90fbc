//! Configuration schema definitions.
//!
//! Three layers describe the same settings:
//! - [`ReloaderArgs`]: command-line flags, each backed by an environment variable
//! - [`FileConfig`]: optional TOML file, overridden by the flags
//! - [`WatchConfig`]: the validated, immutable result handed to the watch loop

use std::path::PathBuf;

use clap::Parser;
use serde::{Deserialize, Serialize};

use crate::process::signal::ReloadSignal;

/// Command-line and environment inputs.
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "config-reloader")]
#[command(about = "Watch a config directory and signal a process to reload it", long_about = None)]
pub struct ReloaderArgs {
    /// Directory to watch for changes.
    #[arg(long, env = "CONFIG_DIR")]
    pub config_dir: Option<PathBuf>,

    /// Executable name of the process to signal (exact match).
    #[arg(long, env = "PROCESS_NAME")]
    pub process_name: Option<String>,

    /// Signal sent on change (e.g. SIGHUP, USR1). Defaults to SIGHUP.
    #[arg(long, env = "RELOAD_SIGNAL")]
    pub reload_signal: Option<String>,

    /// Optional TOML file providing defaults for the settings above.
    #[arg(long, env = "RELOADER_CONFIG")]
    pub config_file: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error). RUST_LOG takes precedence.
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

/// Settings read from the optional TOML file.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub config_dir: Option<PathBuf>,
    pub process_name: Option<String>,
    pub reload_signal: Option<String>,
}

impl FileConfig {
    /// Overlay the command-line values on top of this file layer.
    ///
    /// Empty strings count as absent in both layers.
    pub fn overlay(self, args: &ReloaderArgs) -> FileConfig {
        FileConfig {
            config_dir: non_empty_path(args.config_dir.clone()).or(non_empty_path(self.config_dir)),
            process_name: non_empty(args.process_name.clone()).or(non_empty(self.process_name)),
            reload_signal: non_empty(args.reload_signal.clone()).or(non_empty(self.reload_signal)),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn non_empty_path(value: Option<PathBuf>) -> Option<PathBuf> {
    value.filter(|p| !p.as_os_str().is_empty())
}

/// Validated configuration, immutable for the lifetime of the process.
#[derive(Debug, Clone, PartialEq)]
pub struct WatchConfig {
    /// Directory being watched.
    pub directory: PathBuf,

    /// Exact executable name of the target process.
    pub process_name: String,

    /// Signal delivered on each qualifying change.
    pub signal: ReloadSignal,
}

impl WatchConfig {
    pub fn new(directory: impl Into<PathBuf>, process_name: impl Into<String>, signal: ReloadSignal) -> Self {
        Self {
            directory: directory.into(),
            process_name: process_name.into(),
            signal,
        }
    }
}
