//! Process lookup by executable name.
//!
//! # Responsibilities
//! - Snapshot the OS process table (fresh on every call, nothing cached)
//! - Return the first process whose executable name matches exactly
//!
//! # Design Decisions
//! - Table order is ascending pid, so repeated lookups are deterministic
//! - Which of several same-named processes wins is not otherwise defined

use std::fmt;

use sysinfo::{ProcessRefreshKind, System};
use thiserror::Error;

/// Identifier of a live process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pid(u32);

impl Pid {
    pub fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }

    /// Convert to a `pid_t` that addresses exactly one process.
    ///
    /// Zero and values that overflow into negative `pid_t`s address process
    /// groups in `kill(2)`, so they are rejected.
    pub fn to_raw(&self) -> Option<libc::pid_t> {
        libc::pid_t::try_from(self.0).ok().filter(|raw| *raw > 0)
    }
}

impl fmt::Display for Pid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One entry of a process table snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessRecord {
    pub pid: Pid,
    pub name: String,
}

impl ProcessRecord {
    pub fn new(pid: u32, name: impl Into<String>) -> Self {
        Self {
            pid: Pid::new(pid),
            name: name.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum LocateError {
    #[error("no process matching {0} found")]
    NotFound(String),

    #[error("failed to list processes: {0}")]
    Enumeration(String),
}

/// Source of process table snapshots.
pub trait ProcessTable: Send {
    /// Take a fresh snapshot, in table order.
    fn processes(&self) -> Result<Vec<ProcessRecord>, LocateError>;

    /// Identifier of the first process named exactly `name`.
    fn locate(&self, name: &str) -> Result<Pid, LocateError> {
        let processes = self.processes()?;

        match processes.into_iter().find(|p| p.name == name) {
            Some(process) => {
                tracing::debug!(executable = %process.name, pid = %process.pid, "Found executable");
                Ok(process.pid)
            }
            None => Err(LocateError::NotFound(name.to_string())),
        }
    }
}

/// The live OS process table.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemProcessTable;

impl SystemProcessTable {
    pub fn new() -> Self {
        Self
    }
}

impl ProcessTable for SystemProcessTable {
    fn processes(&self) -> Result<Vec<ProcessRecord>, LocateError> {
        if !sysinfo::IS_SUPPORTED_SYSTEM {
            return Err(LocateError::Enumeration(
                "process listing is not supported on this platform".into(),
            ));
        }

        // Pid and name are always refreshed; nothing else is needed.
        let mut system = System::new();
        system.refresh_processes_specifics(ProcessRefreshKind::new());

        // Linux lists every task; thread ids carry thread names and must never match.
        let mut records: Vec<ProcessRecord> = system
            .processes()
            .iter()
            .filter(|(_, process)| process.thread_kind().is_none())
            .map(|(pid, process)| ProcessRecord::new(pid.as_u32(), process.name()))
            .collect();

        // Our own process is always listed, so an empty table means it could not be read.
        if records.is_empty() {
            return Err(LocateError::Enumeration("process table is empty".into()));
        }

        records.sort_by_key(|p| p.pid);
        Ok(records)
    }
}
