//! Song search seam

use anyhow::Result;
use async_trait::async_trait;

/// One entry from a catalog search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// Result category as reported by the catalog (e.g. "Songs", "Videos")
    pub category: String,
    /// Playable identifier, absent for non-playable entries
    pub video_id: Option<String>,
    pub title: Option<String>,
}

/// Maps a free-text query to catalog results restricted to songs
#[async_trait]
pub trait SongSearch: Send + Sync {
    /// Search the song category, returning at most `limit` results
    async fn search_songs(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>>;
}
