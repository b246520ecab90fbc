//! Config reloader library.
//!
//! Watches a configuration directory and sends a reload signal (SIGHUP by
//! default) to a named process whenever the directory's contents change.

pub mod config;
pub mod lifecycle;
pub mod observability;
pub mod process;
pub mod watch;

pub use config::{ReloaderArgs, WatchConfig};
pub use lifecycle::{ShutdownSignal, StartupError};
pub use process::{ReloadSignal, Reloader};
pub use watch::{DirWatcher, LoopState, WatchLoop};
