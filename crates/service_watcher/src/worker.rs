//! Channel-fed report workers.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_channel::Receiver;
use tracing::{error, info, warn};

use crate::error::{Result, ServiceError};
use crate::processor::{ProcessOutcome, ReportProcessor};

/// Counts of what the workers did before the channel closed
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WorkerSummary {
    /// Reports that produced an output document
    pub written: usize,
    /// Reports without generators
    pub skipped: usize,
    /// Reports that failed or timed out
    pub failed: usize,
}

impl WorkerSummary {
    fn record(&mut self, result: &Result<ProcessOutcome>) {
        match result {
            Ok(ProcessOutcome::Written { .. }) => self.written += 1,
            Ok(ProcessOutcome::Skipped) => self.skipped += 1,
            Err(_) => self.failed += 1,
        }
    }

    fn merge(&mut self, other: WorkerSummary) {
        self.written += other.written;
        self.skipped += other.skipped;
        self.failed += other.failed;
    }

    /// Total reports handled
    pub fn total(&self) -> usize {
        self.written + self.skipped + self.failed
    }
}

/// Process one report on the blocking pool, bounded by `timeout`.
///
/// On timeout the blocking task is detached and may still finish its write.
pub async fn process_with_timeout(
    processor: Arc<ReportProcessor>,
    path: PathBuf,
    timeout: Option<Duration>,
) -> Result<ProcessOutcome> {
    let task_path = path.clone();
    run_blocking(path, timeout, move || processor.process_file(&task_path)).await
}

async fn run_blocking<T, F>(path: PathBuf, timeout: Option<Duration>, task: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    let handle = tokio::task::spawn_blocking(task);

    let joined = match timeout {
        Some(limit) => tokio::time::timeout(limit, handle)
            .await
            .map_err(|_| ServiceError::Timeout {
                path,
                secs: limit.as_secs(),
            })?,
        None => handle.await,
    };

    joined.map_err(|e| ServiceError::task(e.to_string()))?
}

/// Run `worker_count` workers until `receiver` is closed and drained.
///
/// Failures are logged and counted; they never stop a worker.
pub async fn run_workers(
    receiver: Receiver<PathBuf>,
    processor: Arc<ReportProcessor>,
    worker_count: usize,
    timeout: Option<Duration>,
) -> WorkerSummary {
    let handles: Vec<_> = (0..worker_count.max(1))
        .map(|worker| {
            let receiver = receiver.clone();
            let processor = processor.clone();
            tokio::spawn(async move {
                let mut summary = WorkerSummary::default();
                while let Ok(path) = receiver.recv().await {
                    info!(worker, path = %path.display(), "File event received");
                    let result = process_with_timeout(processor.clone(), path.clone(), timeout).await;
                    match &result {
                        Ok(ProcessOutcome::Written { output_path, .. }) => {
                            info!(worker, output = %output_path.display(), "Output written")
                        }
                        Ok(ProcessOutcome::Skipped) => {
                            warn!(worker, path = %path.display(), "Report skipped")
                        }
                        Err(e) => {
                            error!(worker, path = %path.display(), error = %e, "Error processing file")
                        }
                    }
                    summary.record(&result);
                }
                summary
            })
        })
        .collect();
    drop(receiver);

    let mut total = WorkerSummary::default();
    for handle in handles {
        match handle.await {
            Ok(summary) => total.merge(summary),
            Err(e) => error!(error = %e, "Worker task failed"),
        }
    }

    info!(
        written = total.written,
        skipped = total.skipped,
        failed = total.failed,
        "Workers finished"
    );
    total
}
