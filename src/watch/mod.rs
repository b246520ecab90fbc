//! Watch subsystem.
//!
//! # Data Flow
//! ```text
//! notify watcher thread
//!     → watcher.rs (callback splits into event / error channels)
//!     → supervisor.rs (select over events, errors, shutdown)
//!         → event.rs (noise or change?)
//!         → process::Reloader (locate + signal, errors logged)
//! ```

pub mod event;
pub mod supervisor;
pub mod watcher;

pub use event::{classify, EventClass};
pub use supervisor::{LoopState, WatchError, WatchLoop};
pub use watcher::{DirWatcher, WatchFeed, WatchHandle};
