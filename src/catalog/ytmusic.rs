//! YouTube Music search client
//!
//! Talks to the same `youtubei/v1/search` endpoint the web player uses, with
//! the search params that restrict results to the "Songs" shelf.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;
use url::Url;

use super::search::{SearchResult, SongSearch};

pub const DEFAULT_MUSIC_URL: &str = "https://music.youtube.com";

/// Search params selecting the songs filter
const SONGS_FILTER_PARAMS: &str = "EgWKAQIIAWoMEA4QChADEAQQCRAF";

const CLIENT_NAME: &str = "WEB_REMIX";
const CLIENT_VERSION: &str = "1.20240918.01.00";
const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0";

/// HTTP client for YouTube Music search
#[derive(Clone)]
pub struct YtMusicClient {
    base_url: Url,
    http_client: Client,
}

impl YtMusicClient {
    /// Create a new client against `base_url`
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .with_context(|| format!("Invalid music catalog URL: {}", base_url))?;

        let http_client = Client::builder()
            .user_agent(BROWSER_USER_AGENT)
            .connect_timeout(Duration::from_secs(10))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            base_url,
            http_client,
        })
    }

    fn search_url(&self) -> Result<Url> {
        self.base_url
            .join("youtubei/v1/search?alt=json")
            .context("Failed to build search URL")
    }
}

#[async_trait]
impl SongSearch for YtMusicClient {
    async fn search_songs(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>> {
        let url = self.search_url()?;
        debug!("Searching YouTube Music: {}", query);

        let body = json!({
            "context": {
                "client": {
                    "clientName": CLIENT_NAME,
                    "clientVersion": CLIENT_VERSION,
                    "hl": "en"
                }
            },
            "query": query,
            "params": SONGS_FILTER_PARAMS,
        });

        let response: Value = self
            .http_client
            .post(url)
            .header(reqwest::header::ORIGIN, self.base_url.as_str().trim_end_matches('/'))
            .json(&body)
            .send()
            .await
            .context("Failed to reach YouTube Music")?
            .error_for_status()
            .context("YouTube Music search request failed")?
            .json()
            .await
            .context("Failed to parse YouTube Music search response")?;

        let mut results = parse_search_results(&response);
        results.truncate(limit);
        debug!("Found {} results for {}", results.len(), query);
        Ok(results)
    }
}

/// Pull shelf entries out of a search response
///
/// Each result's category is the title of the shelf it was listed under.
pub fn parse_search_results(response: &Value) -> Vec<SearchResult> {
    let Some(tabs) = response
        .pointer("/contents/tabbedSearchResultsRenderer/tabs")
        .and_then(Value::as_array)
    else {
        return Vec::new();
    };

    let tab = tabs
        .iter()
        .find(|tab| tab.pointer("/tabRenderer/selected") == Some(&Value::Bool(true)))
        .or_else(|| tabs.first());

    let sections = tab
        .and_then(|tab| tab.pointer("/tabRenderer/content/sectionListRenderer/contents"))
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    let mut results = Vec::new();
    for shelf in sections.iter().filter_map(|s| s.get("musicShelfRenderer")) {
        let category = shelf
            .pointer("/title/runs/0/text")
            .and_then(Value::as_str)
            .unwrap_or_default();

        let items = shelf
            .get("contents")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();

        for item in items.iter().filter_map(|i| i.get("musicResponsiveListItemRenderer")) {
            results.push(SearchResult {
                category: category.to_string(),
                video_id: item_video_id(item).map(str::to_string),
                title: item
                    .pointer("/flexColumns/0/musicResponsiveListItemFlexColumnRenderer/text/runs/0/text")
                    .and_then(Value::as_str)
                    .map(str::to_string),
            });
        }
    }
    results
}

fn item_video_id(item: &Value) -> Option<&str> {
    item.pointer("/playlistItemData/videoId")
        .or_else(|| {
            item.pointer(
                "/overlay/musicItemThumbnailOverlayRenderer/content/musicPlayButtonRenderer/playNavigationEndpoint/watchEndpoint/videoId",
            )
        })
        .and_then(Value::as_str)
}
