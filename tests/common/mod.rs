//! Shared fakes for watch loop integration tests.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use config_reloader::config::WatchConfig;
use config_reloader::lifecycle::ShutdownSignal;
use config_reloader::process::{
    DeliveryError, LocateError, Pid, ProcessRecord, ProcessTable, ReloadSignal, Reloader, SignalSender,
};
use config_reloader::watch::{DirWatcher, LoopState, WatchError, WatchFeed, WatchHandle, WatchLoop};
use notify::event::{CreateKind, DataChange, EventKind, MetadataKind, ModifyKind};
use notify::Event;
use tokio::sync::{oneshot, watch, Notify};
use tokio::task::JoinHandle;

const WAIT: Duration = Duration::from_secs(5);

/// Counters shared between the fakes and the test body.
#[derive(Default)]
pub struct Recorder {
    lookups: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    sent: Mutex<Vec<(Pid, ReloadSignal)>>,
    changed: Notify,
}

impl Recorder {
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn sent(&self) -> Vec<(Pid, ReloadSignal)> {
        self.sent.lock().unwrap().clone()
    }

    /// Wait until at least `n` lookups have completed.
    pub async fn wait_for_lookups(&self, n: usize) {
        self.wait_until(|recorder| recorder.lookups() >= n)
            .await
            .unwrap_or_else(|_| panic!("expected {n} lookups, saw {}", self.lookups()));
    }

    /// Wait until a lookup has started and not yet returned.
    pub async fn wait_for_in_flight(&self) {
        self.wait_until(|recorder| recorder.in_flight() > 0)
            .await
            .expect("no lookup started");
    }

    async fn wait_until(&self, done: impl Fn(&Recorder) -> bool) -> Result<(), tokio::time::error::Elapsed> {
        tokio::time::timeout(WAIT, async {
            loop {
                let changed = self.changed.notified();
                if done(self) {
                    return;
                }
                changed.await;
            }
        })
        .await
    }

    fn bump(&self) {
        self.changed.notify_waiters();
    }
}

/// Process table with fixed contents and an optional per-lookup delay.
pub struct FakeTable {
    pub processes: Vec<ProcessRecord>,
    pub delay: Duration,
    pub recorder: Arc<Recorder>,
}

impl ProcessTable for FakeTable {
    fn processes(&self) -> Result<Vec<ProcessRecord>, LocateError> {
        let now = self.recorder.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.recorder.max_in_flight.fetch_max(now, Ordering::SeqCst);
        self.recorder.bump();

        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }

        self.recorder.in_flight.fetch_sub(1, Ordering::SeqCst);
        Ok(self.processes.clone())
    }

    fn locate(&self, name: &str) -> Result<Pid, LocateError> {
        let found = self
            .processes()?
            .into_iter()
            .find(|p| p.name == name)
            .map(|p| p.pid)
            .ok_or_else(|| LocateError::NotFound(name.to_string()));

        self.recorder.lookups.fetch_add(1, Ordering::SeqCst);
        self.recorder.bump();
        found
    }
}

/// Records deliveries. Pids in `gone` fail as if the process had just exited.
pub struct FakeSender {
    pub gone: Vec<Pid>,
    pub recorder: Arc<Recorder>,
}

impl SignalSender for FakeSender {
    fn deliver(&self, pid: Pid, signal: ReloadSignal) -> Result<(), DeliveryError> {
        if self.gone.contains(&pid) {
            return Err(DeliveryError::ProcessGone(pid));
        }
        self.recorder.sent.lock().unwrap().push((pid, signal));
        Ok(())
    }
}

/// Watch handle that counts releases and can be told to fail.
pub struct CountingHandle {
    pub releases: Arc<AtomicUsize>,
    pub fail: bool,
}

impl WatchHandle for CountingHandle {
    fn release(self: Box<Self>) -> Result<(), notify::Error> {
        self.releases.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(notify::Error::generic("close failed"));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct Setup {
    pub processes: Vec<ProcessRecord>,
    pub gone: Vec<Pid>,
    pub delay: Duration,
    pub fail_release: bool,
}

/// A watch loop running on a spawned task, driven through fakes.
pub struct Running {
    pub feed: WatchFeed,
    pub recorder: Arc<Recorder>,
    pub releases: Arc<AtomicUsize>,
    pub state: watch::Receiver<LoopState>,
    shutdown: Option<oneshot::Sender<ShutdownSignal>>,
    task: JoinHandle<Result<(), WatchError>>,
}

impl Running {
    pub fn shutdown(&mut self, signal: ShutdownSignal) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(signal);
        }
    }

    pub async fn join(self) -> Result<(), WatchError> {
        tokio::time::timeout(WAIT, self.task)
            .await
            .expect("watch loop did not stop")
            .expect("watch loop panicked")
    }
}

pub fn worker_config() -> WatchConfig {
    WatchConfig::new("/cfg", "worker", ReloadSignal::default())
}

pub fn spawn_loop(setup: Setup) -> Running {
    let recorder = Arc::new(Recorder::default());
    let releases = Arc::new(AtomicUsize::new(0));

    let (watcher, feed) = DirWatcher::with_handle(Box::new(CountingHandle {
        releases: releases.clone(),
        fail: setup.fail_release,
    }));
    let reloader = Reloader::new(
        FakeTable {
            processes: setup.processes,
            delay: setup.delay,
            recorder: recorder.clone(),
        },
        FakeSender {
            gone: setup.gone,
            recorder: recorder.clone(),
        },
    );

    let watch_loop = WatchLoop::new(worker_config(), reloader, watcher);
    let state = watch_loop.subscribe_state();

    let (tx, rx) = oneshot::channel();
    let task = tokio::spawn(watch_loop.run(async move { rx.await.unwrap_or(ShutdownSignal::Terminate) }));

    Running {
        feed,
        recorder,
        releases,
        state,
        shutdown: Some(tx),
        task,
    }
}

pub fn write_event(name: &str) -> Event {
    Event::new(EventKind::Modify(ModifyKind::Data(DataChange::Content))).add_path(PathBuf::from("/cfg").join(name))
}

pub fn create_event(name: &str) -> Event {
    Event::new(EventKind::Create(CreateKind::File)).add_path(PathBuf::from("/cfg").join(name))
}

pub fn chmod_event(name: &str) -> Event {
    Event::new(EventKind::Modify(ModifyKind::Metadata(MetadataKind::Permissions)))
        .add_path(PathBuf::from("/cfg").join(name))
}
