//! Reload coordination: locate the target, then signal it.

use thiserror::Error;

use crate::process::dispatcher::{DeliveryError, SignalSender};
use crate::process::locator::{LocateError, Pid, ProcessTable};
use crate::process::signal::ReloadSignal;

#[derive(Debug, Error)]
pub enum ReloadError {
    #[error(transparent)]
    Locate(#[from] LocateError),

    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}

/// Composes a [`ProcessTable`] and a [`SignalSender`].
///
/// One `reload` call is exactly one lookup plus at most one delivery;
/// there is no retry.
pub struct Reloader<T, S> {
    table: T,
    sender: S,
}

impl<T: ProcessTable, S: SignalSender> Reloader<T, S> {
    pub fn new(table: T, sender: S) -> Self {
        Self { table, sender }
    }

    /// Signal the first process named `name`. Returns the pid that was signaled.
    pub fn reload(&self, name: &str, signal: ReloadSignal) -> Result<Pid, ReloadError> {
        let pid = self.table.locate(name)?;
        self.sender.deliver(pid, signal)?;

        tracing::info!(
            signal = %signal,
            process = name,
            pid = %pid,
            "Signal sent"
        );
        Ok(pid)
    }
}
