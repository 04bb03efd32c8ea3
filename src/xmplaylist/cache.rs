//! On-disk JSON cache for station and channel documents
//!
//! Channel files are write-once: if `{dir}/{channel}.json` exists it is used
//! as-is, otherwise it is fetched and saved before use. The station list is
//! refreshed on every run so the channel listing stays current.

use anyhow::{Context, Result};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, error, info};

use super::client::PlaylistSource;
use super::models::StationList;
use crate::utils::format_columns;

const STATIONS_FILE: &str = "stations.json";

/// JSON cache rooted at a single directory
#[derive(Debug, Clone)]
pub struct JsonCache {
    dir: PathBuf,
}

impl JsonCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn stations_path(&self) -> PathBuf {
        self.dir.join(STATIONS_FILE)
    }

    pub fn channel_path(&self, channel: &str) -> Result<PathBuf> {
        if channel.is_empty() || channel.contains(['/', '\\']) || channel == ".." {
            anyhow::bail!("Invalid channel id: {:?}", channel);
        }
        Ok(self.dir.join(format!("{}.json", channel)))
    }

    /// Fetch the station list and overwrite the cached copy
    ///
    /// Returns whether the cache was updated; failures keep the old file.
    pub async fn refresh_stations(&self, source: &dyn PlaylistSource) -> bool {
        let stations = match source.stations().await {
            Ok(stations) => stations,
            Err(e) => {
                error!("Failed to fetch stations: {:#}", e);
                return false;
            }
        };

        let path = self.stations_path();
        match save_json(&path, &stations).await {
            Ok(()) => {
                info!("Successfully saved station data to {}", path.display());
                true
            }
            Err(e) => {
                error!("Failed to save stations to file: {:#}", e);
                false
            }
        }
    }

    /// Path of the cached most-heard document for `channel`, fetching it first if absent
    pub async fn channel_json(&self, source: &dyn PlaylistSource, channel: &str) -> Result<PathBuf> {
        let path = self.channel_path(channel)?;

        if fs::try_exists(&path).await.unwrap_or(false) {
            debug!("Using cached channel data at {}", path.display());
            return Ok(path);
        }

        let document = match source.most_heard(channel).await {
            Ok(document) => document,
            Err(e) => {
                error!("Failed to fetch JSON for channel {}: {:#}", channel, e);
                return Err(e.context(format!("No playlist data for channel {}", channel)));
            }
        };

        save_json(&path, &document).await?;
        info!("Successfully fetched and saved JSON for channel {}", channel);
        Ok(path)
    }

    /// Known channel ids from the station cache, laid out in columns
    pub fn channel_listing(&self, term_width: usize) -> Result<String> {
        let path = self.stations_path();
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read station cache {}", path.display()))?;
        let stations: StationList = serde_json::from_str(&content)
            .with_context(|| format!("Invalid station cache {}", path.display()))?;

        Ok(format_columns(&stations.sorted_deeplinks(), term_width))
    }
}

async fn save_json(path: &Path, value: &Value) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create cache directory {}", parent.display()))?;
    }

    let content = serde_json::to_string_pretty(value).context("Failed to serialize JSON")?;
    fs::write(path, content)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;

    debug!("Saved {}", path.display());
    Ok(())
}
