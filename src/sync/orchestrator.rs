//! Channel orchestration
//!
//! Channels run strictly one after another. A failure anywhere in a
//! channel's pipeline is logged with the list of known channel ids and the
//! run moves on to the next channel.

use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

use crate::catalog::{CatalogResolver, YtMusicClient};
use crate::config::RunConfig;
use crate::download::{DispatchReport, Dispatcher, YtDlpFetcher};
use crate::playlist::normalize_file;
use crate::xmplaylist::{JsonCache, PlaylistSource, XmPlaylistClient};

/// Fallback when stdout is not a terminal
const DEFAULT_TERM_WIDTH: usize = 80;

/// Outcome of a whole multi-channel run
#[derive(Debug, Default)]
pub struct RunSummary {
    pub channels_ok: Vec<String>,
    pub channels_failed: Vec<String>,
    pub totals: DispatchReport,
}

impl RunSummary {
    fn add(&mut self, report: &DispatchReport) {
        self.totals.total += report.total;
        self.totals.skipped += report.skipped;
        self.totals.unresolved += report.unresolved;
        self.totals.queued += report.queued;
        self.totals.completed += report.completed;
        self.totals.failed += report.failed;
    }
}

/// Ties cache, normalizer and dispatcher together per channel
pub struct ChannelOrchestrator {
    source: Arc<dyn PlaylistSource>,
    cache: JsonCache,
    dispatcher: Dispatcher,
    destination: PathBuf,
}

impl ChannelOrchestrator {
    pub fn new(
        source: Arc<dyn PlaylistSource>,
        cache: JsonCache,
        dispatcher: Dispatcher,
        destination: PathBuf,
    ) -> Self {
        Self {
            source,
            cache,
            dispatcher,
            destination,
        }
    }

    /// Wire up the production collaborators described by `config`
    pub fn from_config(config: &RunConfig) -> Result<Self> {
        let source = Arc::new(XmPlaylistClient::new(&config.api_url)?);
        let search = Arc::new(YtMusicClient::new(&config.music_url)?);
        let fetcher = Arc::new(YtDlpFetcher::new(config.yt_dlp.clone()));

        let dispatcher = Dispatcher::new(
            CatalogResolver::new(search),
            fetcher,
            config.dispatch.clone(),
        );

        Ok(Self::new(
            source,
            JsonCache::new(config.cache_dir.clone()),
            dispatcher,
            config.destination.clone(),
        ))
    }

    /// Folder a channel's tracks are written to
    pub fn output_folder(&self, channel: &str) -> PathBuf {
        self.destination.join(format!("sirius-{}", channel))
    }

    /// Run the whole pipeline for one channel
    pub async fn run_channel(&self, channel: &str) -> Result<DispatchReport> {
        let json_path = self.cache.channel_json(self.source.as_ref(), channel).await?;
        let records = normalize_file(&json_path);
        let output_folder = self.output_folder(channel);

        info!(
            "Downloading {} tracks to {}",
            records.len(),
            output_folder.display()
        );

        self.dispatcher
            .dispatch(channel, &records, &output_folder)
            .await
    }

    /// Process `channels` in order; a failing channel never stops the run
    pub async fn run(&self, channels: &[String]) -> RunSummary {
        info!("Updating station data");
        self.cache.refresh_stations(self.source.as_ref()).await;

        let mut summary = RunSummary::default();
        for channel in channels {
            match self.run_channel(channel).await {
                Ok(report) => {
                    info!(
                        "{}: {} queued, {} skipped, {} not found, {} failed",
                        channel, report.queued, report.skipped, report.unresolved, report.failed
                    );
                    summary.add(&report);
                    summary.channels_ok.push(channel.clone());
                }
                Err(e) => {
                    error!(
                        "Check your channel name: {} ({:#})\nAvailable channels:\n{}",
                        channel,
                        e,
                        self.channel_listing()
                    );
                    summary.channels_failed.push(channel.clone());
                }
            }
        }
        summary
    }

    /// Freshly read listing of valid channel ids, or why it is unavailable
    fn channel_listing(&self) -> String {
        match self.cache.channel_listing(terminal_width()) {
            Ok(listing) => listing,
            Err(e) => format!("Error: {:#}", e),
        }
    }
}

fn terminal_width() -> usize {
    console::Term::stdout()
        .size_checked()
        .map(|(_, cols)| cols as usize)
        .unwrap_or(DEFAULT_TERM_WIDTH)
}
