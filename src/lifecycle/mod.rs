//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load config → Validate → Subscribe signals → Watch directory → Run loop
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Watch loop drains and exits cleanly
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, OS resources after
//! - Exit status: 0 on signal-triggered shutdown, 1 on any error

pub mod signals;
pub mod startup;

pub use signals::{ShutdownSignal, ShutdownSignals};
pub use startup::{run, run_from_args, StartupError};
