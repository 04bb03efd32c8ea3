//! Bounded worker pool with fire-and-forget submission
//!
//! `submit` never waits: every item is spawned immediately and parks on a
//! semaphore until a worker slot frees up. `drain` is the single barrier that
//! waits for everything queued or in flight and collects the failures.

use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info};

use super::error::WorkerError;
use super::fetcher::AudioFetcher;
use super::WorkItem;

/// A work item that did not complete
#[derive(Debug)]
pub struct WorkerFailure {
    /// Destination filename, unknown when the task panicked
    pub filename: Option<String>,
    pub error: WorkerError,
}

/// What a drained pool did
#[derive(Debug, Default)]
pub struct DrainOutcome {
    pub completed: usize,
    pub failures: Vec<WorkerFailure>,
}

pub struct WorkerPool {
    fetcher: Arc<dyn AudioFetcher>,
    permits: Arc<Semaphore>,
    tasks: JoinSet<(String, Result<(), WorkerError>)>,
}

impl WorkerPool {
    /// Create a pool running at most `size` items at once
    pub fn new(fetcher: Arc<dyn AudioFetcher>, size: usize) -> Self {
        let size = size.max(1);
        debug!("Starting worker pool with {} workers", size);
        Self {
            fetcher,
            permits: Arc::new(Semaphore::new(size)),
            tasks: JoinSet::new(),
        }
    }

    /// Queue `item` without waiting for a free worker
    pub fn submit(&mut self, item: WorkItem) {
        let permits = self.permits.clone();
        let fetcher = self.fetcher.clone();

        self.tasks.spawn(async move {
            // The semaphore is never closed, so acquiring only waits
            let _permit = permits.acquire_owned().await;
            let result = run_work_item(fetcher.as_ref(), &item).await;
            (item.destination_filename, result)
        });
    }

    /// Number of items queued or in flight
    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    /// Wait for every submitted item to finish
    pub async fn drain(mut self) -> DrainOutcome {
        let mut outcome = DrainOutcome::default();

        while let Some(joined) = self.tasks.join_next().await {
            match joined {
                Ok((_, Ok(()))) => outcome.completed += 1,
                Ok((filename, Err(error))) => outcome.failures.push(WorkerFailure {
                    filename: Some(filename),
                    error,
                }),
                Err(e) => outcome.failures.push(WorkerFailure {
                    filename: None,
                    error: WorkerError::Panicked(e.to_string()),
                }),
            }
        }

        outcome
    }
}

/// Body of a single worker
pub async fn run_work_item(fetcher: &dyn AudioFetcher, item: &WorkItem) -> Result<(), WorkerError> {
    if !item.execute {
        info!(
            "DRY RUN: Would download: {} to {}",
            item.media_reference, item.destination_filename
        );
        return Ok(());
    }

    info!(
        "Downloading: {} to {}",
        item.media_reference, item.destination_filename
    );
    fetcher.fetch(item).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Tracks peak concurrency and fails items whose name starts with "bad"
    #[derive(Default)]
    struct ProbeFetcher {
        running: AtomicUsize,
        peak: AtomicUsize,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl AudioFetcher for ProbeFetcher {
        async fn fetch(&self, item: &WorkItem) -> Result<(), WorkerError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let now = self.running.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            self.running.fetch_sub(1, Ordering::SeqCst);

            if item.destination_filename.starts_with("bad") {
                return Err(WorkerError::Tool {
                    program: "yt-dlp".to_string(),
                    code: Some(1),
                    stderr: "Video unavailable".to_string(),
                });
            }
            Ok(())
        }
    }

    fn item(name: &str, execute: bool) -> WorkItem {
        WorkItem {
            media_reference: format!("https://music.youtube.com/watch?v={name}"),
            destination_filename: name.to_string(),
            quality: "192".to_string(),
            output_folder: PathBuf::from("out"),
            execute,
        }
    }

    #[tokio::test]
    async fn test_pool_bounds_concurrency() {
        let fetcher = Arc::new(ProbeFetcher::default());
        let mut pool = WorkerPool::new(fetcher.clone(), 2);

        for i in 0..6 {
            pool.submit(item(&format!("t{i}"), true));
        }
        assert_eq!(pool.pending(), 6);

        let outcome = pool.drain().await;
        assert_eq!(outcome.completed, 6);
        assert!(outcome.failures.is_empty());
        assert!(fetcher.peak.load(Ordering::SeqCst) <= 2);
    }

    #[tokio::test]
    async fn test_failure_does_not_stop_siblings() {
        let fetcher = Arc::new(ProbeFetcher::default());
        let mut pool = WorkerPool::new(fetcher.clone(), 1);

        pool.submit(item("bad-one", true));
        pool.submit(item("good-one", true));
        pool.submit(item("good-two", true));

        let outcome = pool.drain().await;
        assert_eq!(outcome.completed, 2);
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].filename.as_deref(), Some("bad-one"));
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_dry_run_skips_fetcher() {
        let fetcher = Arc::new(ProbeFetcher::default());
        let mut pool = WorkerPool::new(fetcher.clone(), 4);

        pool.submit(item("bad-but-dry", false));

        let outcome = pool.drain().await;
        assert_eq!(outcome.completed, 1);
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_zero_size_pool_still_runs() {
        let mut pool = WorkerPool::new(Arc::new(ProbeFetcher::default()), 0);
        pool.submit(item("t", true));
        assert_eq!(pool.drain().await.completed, 1);
    }
}
