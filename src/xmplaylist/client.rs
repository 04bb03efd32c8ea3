//! xmplaylist.com HTTP client

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{header, Client};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;
use url::Url;

pub const DEFAULT_API_URL: &str = "https://xmplaylist.com";

/// Window, in days, of the most-heard ranking
const MOST_HEARD_DAYS: &str = "30";

/// Source of station and playlist documents
#[async_trait]
pub trait PlaylistSource: Send + Sync {
    /// Fetch the list of all stations
    async fn stations(&self) -> Result<Value>;

    /// Fetch the most heard tracks of `channel`
    async fn most_heard(&self, channel: &str) -> Result<Value>;
}

/// HTTP client for the xmplaylist.com API
#[derive(Clone)]
pub struct XmPlaylistClient {
    base_url: Url,
    http_client: Client,
}

impl XmPlaylistClient {
    /// Create a new client against `base_url`
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .with_context(|| format!("Invalid playlist API URL: {}", base_url))?;

        let mut headers = header::HeaderMap::new();
        headers.insert(header::ACCEPT, header::HeaderValue::from_static("application/json"));

        let http_client = Client::builder()
            .user_agent(concat!("sirius2usb/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .connect_timeout(Duration::from_secs(10))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            base_url,
            http_client,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .with_context(|| format!("Failed to build API URL for {}", path))
    }

    async fn get_json(&self, url: Url) -> Result<Value> {
        debug!("Fetching {}", url);

        self.http_client
            .get(url)
            .send()
            .await
            .context("Failed to connect to playlist API")?
            .error_for_status()
            .context("Playlist API returned an error status")?
            .json()
            .await
            .context("Failed to parse playlist API response")
    }
}

#[async_trait]
impl PlaylistSource for XmPlaylistClient {
    async fn stations(&self) -> Result<Value> {
        let url = self.endpoint("api/station")?;
        let data = self.get_json(url).await?;

        if !data.as_object().is_some_and(|o| o.contains_key("results")) {
            anyhow::bail!("Unexpected API response format");
        }
        Ok(data)
    }

    async fn most_heard(&self, channel: &str) -> Result<Value> {
        let path = format!("api/station/{}/most-heard", urlencoding::encode(channel));
        let mut url = self.endpoint(&path)?;
        url.query_pairs_mut().append_pair("days", MOST_HEARD_DAYS);
        self.get_json(url).await
    }
}
