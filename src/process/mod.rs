//! Process subsystem: find the target process and signal it.
//!
//! # Data Flow
//! ```text
//! reload(name, signal)
//!     → locator.rs (snapshot process table, first exact name match)
//!     → dispatcher.rs (kill(pid, signal))
//!     → Ok(pid) | ReloadError
//! ```
//!
//! # Design Decisions
//! - Lookup and delivery race: a process can exit in between; that surfaces
//!   as `DeliveryError::ProcessGone`, never as a panic or a retry
//! - Traits at the OS boundary so the watch loop can run against fakes

pub mod dispatcher;
pub mod locator;
pub mod reload;
pub mod signal;

pub use dispatcher::{DeliveryError, KillSender, SignalSender};
pub use locator::{LocateError, Pid, ProcessRecord, ProcessTable, SystemProcessTable};
pub use reload::{ReloadError, Reloader};
pub use signal::{ReloadSignal, UnknownSignal};
