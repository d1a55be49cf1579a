//! Polling folder watcher.
//!
//! Files already present when the watcher starts form a baseline and are not
//! reported. Afterwards, every poll compares a fresh snapshot of matching
//! files against the previous one and sends each file that appeared or whose
//! modification time or length changed.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use async_channel::{Receiver, Sender};
use infra_config::{AppConfig, FileFilter};
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::error::Result;

/// Modification time and length of a watched file
pub type Fingerprint = (Option<SystemTime>, u64);

/// Snapshot of matching files in the watched folder
pub type Snapshot = HashMap<PathBuf, Fingerprint>;

/// Watches one folder for new or rewritten report files.
pub struct FolderWatcher {
    folder: PathBuf,
    filter: FileFilter,
    poll_interval: Duration,
    capacity: usize,
    running: Arc<AtomicBool>,
}

impl FolderWatcher {
    /// Create a watcher with a 500ms poll interval and room for 64 pending events
    pub fn new(folder: impl Into<PathBuf>, filter: FileFilter) -> Self {
        Self {
            folder: folder.into(),
            filter,
            poll_interval: Duration::from_millis(500),
            capacity: 64,
            running: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Create a watcher from configuration
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Ok(Self::new(config.input_folder.clone(), config.file_filter()?)
            .with_poll_interval(config.poll_interval())
            .with_capacity(config.channel_capacity))
    }

    /// Set poll interval
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Set channel capacity
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity.max(1);
        self
    }

    /// Start watching.
    ///
    /// Creates the folder if missing and takes the baseline snapshot before
    /// returning, so files written after this call are always reported. The
    /// channel closes once [`stop`](Self::stop) is called or every receiver
    /// is dropped.
    pub async fn start(&self) -> Result<Receiver<PathBuf>> {
        tokio::fs::create_dir_all(&self.folder).await?;
        let baseline = scan(&self.folder, &self.filter)?;
        let baseline_files = baseline.len();

        let (tx, rx) = async_channel::bounded(self.capacity);
        self.running.store(true, Ordering::SeqCst);

        let folder = self.folder.clone();
        let filter = self.filter.clone();
        let poll_interval = self.poll_interval;
        let running = self.running.clone();

        tokio::spawn(async move {
            Self::run_polling(folder, filter, poll_interval, baseline, tx, running).await;
        });

        info!(
            folder = %self.folder.display(),
            filter = %self.filter,
            baseline_files,
            "Folder watcher started"
        );
        Ok(rx)
    }

    /// Stop watching; the channel closes after the current poll
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
        info!(folder = %self.folder.display(), "Folder watcher stopped");
    }

    async fn run_polling(
        folder: PathBuf,
        filter: FileFilter,
        poll_interval: Duration,
        mut previous: Snapshot,
        tx: Sender<PathBuf>,
        running: Arc<AtomicBool>,
    ) {
        let mut ticker = interval(poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // First tick completes immediately.
        ticker.tick().await;

        while running.load(Ordering::SeqCst) {
            ticker.tick().await;
            if !running.load(Ordering::SeqCst) || tx.is_closed() {
                break;
            }

            let current = match scan(&folder, &filter) {
                Ok(snapshot) => snapshot,
                Err(e) => {
                    warn!(folder = %folder.display(), error = %e, "Folder scan failed");
                    continue;
                }
            };

            for path in changed_files(&previous, &current) {
                debug!(path = %path.display(), "New file detected");
                if tx.send(path).await.is_err() {
                    return; // Channel closed
                }
            }
            previous = current;
        }
    }
}

/// Snapshot matching regular files directly inside `folder`
pub fn scan(folder: &Path, filter: &FileFilter) -> std::io::Result<Snapshot> {
    let mut snapshot = Snapshot::new();
    for entry in std::fs::read_dir(folder)? {
        let entry = entry?;
        let Ok(metadata) = entry.metadata() else {
            continue; // removed between listing and stat
        };
        if !metadata.is_file() {
            continue;
        }
        let name = entry.file_name();
        if !filter.matches(&name.to_string_lossy()) {
            continue;
        }
        snapshot.insert(entry.path(), (metadata.modified().ok(), metadata.len()));
    }
    Ok(snapshot)
}

/// Files in `current` that are absent from or differ in `previous`, sorted by path
pub fn changed_files(previous: &Snapshot, current: &Snapshot) -> Vec<PathBuf> {
    let mut changed: Vec<PathBuf> = current
        .iter()
        .filter(|(path, fingerprint)| previous.get(*path) != Some(*fingerprint))
        .map(|(path, _)| path.clone())
        .collect();
    changed.sort();
    changed
}
