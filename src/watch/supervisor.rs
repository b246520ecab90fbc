//! The watch loop: filesystem events in, reload signals out.
//!
//! # Responsibilities
//! - Multiplex change events, watcher errors and the shutdown signal
//! - Drop noise events, reload the target on every other change
//! - Release the watcher exactly once on every exit path
//!
//! # Design Decisions
//! - Strictly sequential: a reload runs to completion before the next event
//!   is read, so a slow reload stalls the loop
//! - Reload failures are logged and absorbed; only watcher errors are fatal
//! - No debouncing: each qualifying event is one reload attempt

use std::fmt;
use std::future::Future;

use notify::Event;
use thiserror::Error;
use tokio::sync::watch;

use crate::config::WatchConfig;
use crate::lifecycle::signals::ShutdownSignal;
use crate::process::{ProcessTable, Reloader, SignalSender};
use crate::watch::event::classify;
use crate::watch::watcher::DirWatcher;

/// Lifecycle of a [`WatchLoop`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Initializing,
    Running,
    Draining,
    Stopped,
}

impl fmt::Display for LoopState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LoopState::Initializing => "initializing",
            LoopState::Running => "running",
            LoopState::Draining => "draining",
            LoopState::Stopped => "stopped",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Error)]
pub enum WatchError {
    #[error("file watch error: {0}")]
    Watch(#[source] notify::Error),

    #[error("file watch error: {0} stream closed")]
    StreamClosed(&'static str),

    #[error("failed to close file watcher: {0}")]
    Release(#[source] notify::Error),
}

enum Next {
    Event(Event),
    Error(notify::Error),
    Closed(&'static str),
    Shutdown(ShutdownSignal),
}

/// Owns the watcher and reloads the configured process on change.
pub struct WatchLoop<T, S> {
    config: WatchConfig,
    reloader: Reloader<T, S>,
    watcher: DirWatcher,
    state: watch::Sender<LoopState>,
}

impl<T: ProcessTable, S: SignalSender> WatchLoop<T, S> {
    pub fn new(config: WatchConfig, reloader: Reloader<T, S>, watcher: DirWatcher) -> Self {
        let (state, _) = watch::channel(LoopState::Initializing);
        Self {
            config,
            reloader,
            watcher,
            state,
        }
    }

    /// Observe state transitions.
    pub fn subscribe_state(&self) -> watch::Receiver<LoopState> {
        self.state.subscribe()
    }

    /// Run until `shutdown` resolves or the watcher fails.
    ///
    /// Shutdown is only observed between events; an in-flight reload always
    /// finishes first.
    pub async fn run<F>(self, shutdown: F) -> Result<(), WatchError>
    where
        F: Future<Output = ShutdownSignal>,
    {
        let WatchLoop {
            config,
            reloader,
            mut watcher,
            state,
        } = self;
        tokio::pin!(shutdown);

        state.send_replace(LoopState::Running);
        tracing::debug!(directory = ?config.directory, "Watch loop running");

        let outcome = loop {
            let next = {
                let (events, errors) = watcher.streams();
                tokio::select! {
                    event = events.recv() => event.map_or(Next::Closed("event"), Next::Event),
                    error = errors.recv() => error.map_or(Next::Closed("error"), Next::Error),
                    signal = &mut shutdown => Next::Shutdown(signal),
                }
            };

            match next {
                Next::Event(event) => handle_event(&config, &reloader, event),
                Next::Error(e) => break Err(WatchError::Watch(e)),
                Next::Closed(stream) => break Err(WatchError::StreamClosed(stream)),
                Next::Shutdown(signal) => {
                    tracing::info!(signal = %signal, "Received signal");
                    break Ok(());
                }
            }
        };

        state.send_replace(LoopState::Draining);
        let released = watcher.close().map_err(WatchError::Release);
        state.send_replace(LoopState::Stopped);

        // The first error wins; a release failure only surfaces on a clean exit.
        outcome.and(released)
    }
}

fn handle_event<T: ProcessTable, S: SignalSender>(config: &WatchConfig, reloader: &Reloader<T, S>, event: Event) {
    if !classify(&event.kind).is_change() {
        tracing::trace!(kind = ?event.kind, paths = ?event.paths, "Ignoring attribute-only event");
        return;
    }

    tracing::debug!(kind = ?event.kind, paths = ?event.paths, "Modified file");
    if let Err(e) = reloader.reload(&config.process_name, config.signal) {
        tracing::error!(
            error = %e,
            process = %config.process_name,
            "Error reloading process"
        );
    }
}
