//! Directory watcher for reload triggers.

use std::path::{Path, PathBuf};

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

/// Owns the resource behind a [`DirWatcher`] and releases it.
pub trait WatchHandle: Send {
    /// Stop watching. Consumes the handle, so it runs at most once.
    fn release(self: Box<Self>) -> Result<(), notify::Error>;
}

struct NotifyHandle {
    watcher: RecommendedWatcher,
    path: PathBuf,
}

impl WatchHandle for NotifyHandle {
    fn release(mut self: Box<Self>) -> Result<(), notify::Error> {
        match self.watcher.unwatch(&self.path) {
            Ok(()) => Ok(()),
            // Directory was removed and the kernel already dropped the watch.
            Err(e) if matches!(e.kind, notify::ErrorKind::WatchNotFound) => Ok(()),
            Err(e) => Err(e),
        }
    }
}

/// Sending half of a [`DirWatcher`]'s event and error streams.
#[derive(Clone)]
pub struct WatchFeed {
    events: mpsc::UnboundedSender<Event>,
    errors: mpsc::UnboundedSender<notify::Error>,
}

impl WatchFeed {
    pub fn send_event(&self, event: Event) {
        let _ = self.events.send(event);
    }

    pub fn send_error(&self, error: notify::Error) {
        let _ = self.errors.send(error);
    }

    fn dispatch(&self, res: notify::Result<Event>) {
        match res {
            Ok(event) => self.send_event(event),
            Err(e) => self.send_error(e),
        }
    }
}

/// A watched directory: two streams (events, errors) plus the handle that
/// keeps the watch alive.
pub struct DirWatcher {
    events: mpsc::UnboundedReceiver<Event>,
    errors: mpsc::UnboundedReceiver<notify::Error>,
    handle: Box<dyn WatchHandle>,
}

impl DirWatcher {
    /// Start watching `path` (non-recursively) with the platform watcher.
    ///
    /// Events are captured on the watcher's own thread and queued for the
    /// consumer; nothing else runs in the background.
    pub fn watch(path: &Path) -> Result<Self, notify::Error> {
        let (feed, events, errors) = channels();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| feed.dispatch(res),
            Config::default(),
        )?;
        watcher.watch(path, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?path, "Directory watcher started");
        Ok(Self {
            events,
            errors,
            handle: Box::new(NotifyHandle {
                watcher,
                path: path.to_path_buf(),
            }),
        })
    }

    /// Build a watcher around an arbitrary handle, fed through the returned [`WatchFeed`].
    pub fn with_handle(handle: Box<dyn WatchHandle>) -> (Self, WatchFeed) {
        let (feed, events, errors) = channels();
        (Self { events, errors, handle }, feed)
    }

    /// Both receiving streams, borrowed together so they can be awaited side by side.
    pub(crate) fn streams(
        &mut self,
    ) -> (&mut mpsc::UnboundedReceiver<Event>, &mut mpsc::UnboundedReceiver<notify::Error>) {
        (&mut self.events, &mut self.errors)
    }

    /// Release the underlying watch.
    pub fn close(self) -> Result<(), notify::Error> {
        self.handle.release()
    }
}

fn channels() -> (
    WatchFeed,
    mpsc::UnboundedReceiver<Event>,
    mpsc::UnboundedReceiver<notify::Error>,
) {
    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let (errors_tx, errors_rx) = mpsc::unbounded_channel();
    (
        WatchFeed {
            events: events_tx,
            errors: errors_tx,
        },
        events_rx,
        errors_rx,
    )
}
