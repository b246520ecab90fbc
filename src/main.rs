//! Config reloader sidecar.
//!
//! # Architecture Overview
//!
//! ```text
//!     config source                                          long-lived service
//!   (volume, git-sync)                                          (nginx, ...)
//!          │                                                         ▲
//!          ▼                                                         │ SIGHUP
//!   ┌─────────────┐    ┌──────────────┐    ┌─────────────┐    ┌──────┴──────┐
//!   │ CONFIG_DIR  │───▶│   watcher    │───▶│ watch loop  │───▶│  reloader   │
//!   │  (notify)   │    │ events/errors│    │  (select)   │    │locate+kill  │
//!   └─────────────┘    └──────────────┘    └──────▲──────┘    └─────────────┘
//!                                                 │
//!                                          SIGINT/SIGTERM
//! ```
//!
//! # Inputs
//! - `CONFIG_DIR`: directory to watch (required)
//! - `PROCESS_NAME`: executable name of the process to signal (required)
//! - `RELOAD_SIGNAL`: signal to send, defaults to `SIGHUP`

use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;

use config_reloader::config::ReloaderArgs;
use config_reloader::lifecycle::run_from_args;
use config_reloader::observability::init_logging;

#[tokio::main]
async fn main() -> ExitCode {
    let args = match ReloaderArgs::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };
    init_logging(&args.log_level);

    tracing::info!("config-reloader v{} starting", env!("CARGO_PKG_VERSION"));

    match run_from_args(&args).await {
        Ok(()) => {
            tracing::info!("Shutdown complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Config reloader exited with error");
            ExitCode::FAILURE
        }
    }
}
