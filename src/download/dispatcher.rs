//! Per-channel download dispatch
//!
//! Records are checked against the output folder and resolved one at a time
//! on the calling task; only the fetch/transcode step runs on the pool.

use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;
use tokio::fs;
use tracing::{debug, error, info, warn};

use super::fetcher::AudioFetcher;
use super::pool::WorkerPool;
use super::WorkItem;
use crate::catalog::CatalogResolver;
use crate::playlist::TrackRecord;
use crate::utils::sanitize_filename;

/// File extension produced by the fetcher
pub const OUTPUT_EXTENSION: &str = "mp3";

/// Knobs shared by every channel of a run
#[derive(Debug, Clone)]
pub struct DispatchSettings {
    /// MP3 bitrate in kbps
    pub quality: String,
    /// Actually download; false is a dry run
    pub execute: bool,
    /// Worker pool size
    pub workers: usize,
}

/// Per-channel tally of what happened to each record
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DispatchReport {
    pub total: usize,
    pub skipped: usize,
    pub unresolved: usize,
    pub queued: usize,
    pub completed: usize,
    pub failed: usize,
}

/// Resolves records and feeds the worker pool
pub struct Dispatcher {
    resolver: CatalogResolver,
    fetcher: Arc<dyn AudioFetcher>,
    settings: DispatchSettings,
}

impl Dispatcher {
    pub fn new(
        resolver: CatalogResolver,
        fetcher: Arc<dyn AudioFetcher>,
        settings: DispatchSettings,
    ) -> Self {
        Self {
            resolver,
            fetcher,
            settings,
        }
    }

    /// Download every record of `channel` not already in `output_folder`
    ///
    /// Blocks until the pool has drained. Worker failures are logged and
    /// counted; only a setup failure is returned as an error.
    pub async fn dispatch(
        &self,
        channel: &str,
        records: &[TrackRecord],
        output_folder: &Path,
    ) -> Result<DispatchReport> {
        let mut report = DispatchReport {
            total: records.len(),
            ..Default::default()
        };

        if self.settings.execute {
            fs::create_dir_all(output_folder).await.with_context(|| {
                format!("Failed to create output folder {}", output_folder.display())
            })?;
        }

        let mut pool = WorkerPool::new(self.fetcher.clone(), self.settings.workers);

        for record in records {
            info!("working on track: {}", record);
            let filename = sanitize_filename(&record.to_string());

            if output_exists(output_folder, &filename).await {
                warn!("File already exists: {}.{}", filename, OUTPUT_EXTENSION);
                report.skipped += 1;
                continue;
            }

            let Some(media_reference) = self.resolver.resolve(&record.artist, &record.title).await
            else {
                error!("Song not found: {}", record);
                report.unresolved += 1;
                continue;
            };

            pool.submit(WorkItem {
                media_reference,
                destination_filename: filename,
                quality: self.settings.quality.clone(),
                output_folder: output_folder.to_path_buf(),
                execute: self.settings.execute,
            });
            report.queued += 1;
        }

        debug!("{}: waiting on {} queued downloads", channel, pool.pending());
        let outcome = pool.drain().await;

        for failure in &outcome.failures {
            error!(
                "{}: download failed for {}: {}",
                channel,
                failure.filename.as_deref().unwrap_or("<unknown>"),
                failure.error
            );
        }
        report.completed = outcome.completed;
        report.failed = outcome.failures.len();

        Ok(report)
    }
}

/// Path a record's download ends up at
pub fn output_path(output_folder: &Path, filename: &str) -> std::path::PathBuf {
    output_folder.join(format!("{}.{}", filename, OUTPUT_EXTENSION))
}

async fn output_exists(output_folder: &Path, filename: &str) -> bool {
    fs::try_exists(output_path(output_folder, filename))
        .await
        .unwrap_or(false)
}
