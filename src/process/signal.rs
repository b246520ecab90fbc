//! Reload signal resolution.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Signal name could not be resolved to an OS signal number.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("cannot find signal for: {0}")]
pub struct UnknownSignal(pub String);

/// An OS signal delivered to the target process on reload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReloadSignal {
    number: libc::c_int,
    name: &'static str,
}

const SIGNALS: &[(&str, libc::c_int)] = &[
    ("SIGHUP", libc::SIGHUP),
    ("SIGINT", libc::SIGINT),
    ("SIGQUIT", libc::SIGQUIT),
    ("SIGILL", libc::SIGILL),
    ("SIGTRAP", libc::SIGTRAP),
    ("SIGABRT", libc::SIGABRT),
    ("SIGBUS", libc::SIGBUS),
    ("SIGFPE", libc::SIGFPE),
    ("SIGKILL", libc::SIGKILL),
    ("SIGUSR1", libc::SIGUSR1),
    ("SIGSEGV", libc::SIGSEGV),
    ("SIGUSR2", libc::SIGUSR2),
    ("SIGPIPE", libc::SIGPIPE),
    ("SIGALRM", libc::SIGALRM),
    ("SIGTERM", libc::SIGTERM),
    ("SIGCHLD", libc::SIGCHLD),
    ("SIGCONT", libc::SIGCONT),
    ("SIGSTOP", libc::SIGSTOP),
    ("SIGTSTP", libc::SIGTSTP),
    ("SIGTTIN", libc::SIGTTIN),
    ("SIGTTOU", libc::SIGTTOU),
    ("SIGURG", libc::SIGURG),
    ("SIGXCPU", libc::SIGXCPU),
    ("SIGXFSZ", libc::SIGXFSZ),
    ("SIGVTALRM", libc::SIGVTALRM),
    ("SIGPROF", libc::SIGPROF),
    ("SIGWINCH", libc::SIGWINCH),
    ("SIGIO", libc::SIGIO),
    ("SIGSYS", libc::SIGSYS),
];

impl ReloadSignal {
    pub const HANGUP: ReloadSignal = ReloadSignal {
        number: libc::SIGHUP,
        name: "SIGHUP",
    };

    /// Raw signal number as passed to `kill(2)`.
    pub fn number(&self) -> libc::c_int {
        self.number
    }

    /// Canonical upper-case name, e.g. `SIGHUP`.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl Default for ReloadSignal {
    fn default() -> Self {
        Self::HANGUP
    }
}

impl FromStr for ReloadSignal {
    type Err = UnknownSignal;

    /// Accepts `SIGHUP`, `HUP` and `hup` alike.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        let short = upper.strip_prefix("SIG").unwrap_or(&upper);

        SIGNALS
            .iter()
            .find(|(name, _)| &name[3..] == short)
            .map(|&(name, number)| ReloadSignal { number, name })
            .ok_or_else(|| UnknownSignal(s.to_string()))
    }
}

impl fmt::Display for ReloadSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
