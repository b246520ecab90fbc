//! Signal delivery to a single process.

use std::io;

use thiserror::Error;

use crate::process::locator::Pid;
use crate::process::signal::ReloadSignal;

#[derive(Debug, Error)]
pub enum DeliveryError {
    /// The process exited between lookup and delivery.
    #[error("could not send signal: process {0} no longer exists")]
    ProcessGone(Pid),

    #[error("could not send signal: permission denied for process {0}")]
    PermissionDenied(Pid),

    #[error("could not send signal: {0} does not address a single process")]
    InvalidPid(Pid),

    #[error("could not send signal to process {pid}: {source}")]
    Os { pid: Pid, source: io::Error },
}

/// Delivers a signal to one process identifier.
pub trait SignalSender: Send {
    fn deliver(&self, pid: Pid, signal: ReloadSignal) -> Result<(), DeliveryError>;
}

/// Sends signals with `kill(2)`.
#[derive(Debug, Default, Clone, Copy)]
pub struct KillSender;

impl SignalSender for KillSender {
    fn deliver(&self, pid: Pid, signal: ReloadSignal) -> Result<(), DeliveryError> {
        let raw = pid.to_raw().ok_or(DeliveryError::InvalidPid(pid))?;

        // SAFETY: kill has no memory-safety preconditions.
        let result = unsafe { libc::kill(raw, signal.number()) };
        if result == 0 {
            return Ok(());
        }

        let err = io::Error::last_os_error();
        Err(match err.raw_os_error() {
            Some(libc::ESRCH) => DeliveryError::ProcessGone(pid),
            Some(libc::EPERM) => DeliveryError::PermissionDenied(pid),
            _ => DeliveryError::Os { pid, source: err },
        })
    }
}
