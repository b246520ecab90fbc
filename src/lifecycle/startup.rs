//! Startup orchestration.
//!
//! # Responsibilities
//! - Load and validate configuration
//! - Subscribe to shutdown signals
//! - Register the directory watcher
//! - Hand everything to the watch loop
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Configuration is validated before any OS resource is acquired

use thiserror::Error;

use crate::config::{load_config, ConfigError, ReloaderArgs, WatchConfig};
use crate::lifecycle::signals::ShutdownSignals;
use crate::process::{KillSender, Reloader, SystemProcessTable};
use crate::watch::{DirWatcher, WatchError, WatchLoop};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to subscribe to shutdown signals: {0}")]
    Signals(#[source] std::io::Error),

    #[error("failed to watch config directory: {0}")]
    Watcher(#[source] notify::Error),

    #[error(transparent)]
    Watch(#[from] WatchError),
}

/// Load configuration from the parsed arguments and run until shutdown.
pub async fn run_from_args(args: &ReloaderArgs) -> Result<(), StartupError> {
    let config = load_config(args)?;
    run(config).await
}

/// Run the reloader against the live process table.
pub async fn run(config: WatchConfig) -> Result<(), StartupError> {
    let mut signals = ShutdownSignals::register().map_err(StartupError::Signals)?;
    let watcher = DirWatcher::watch(&config.directory).map_err(StartupError::Watcher)?;
    let reloader = Reloader::new(SystemProcessTable::new(), KillSender);

    tracing::info!(
        config_dir = ?config.directory,
        process_name = %config.process_name,
        reload_signal = %config.signal,
        "Starting watcher"
    );

    WatchLoop::new(config, reloader, watcher)
        .run(signals.recv())
        .await?;

    Ok(())
}
