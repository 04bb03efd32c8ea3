//! Track record to media reference resolution

use std::sync::Arc;
use tracing::{debug, error};

use super::search::{SearchResult, SongSearch};
use crate::playlist::RECORD_SEPARATOR;

/// Playable URL template; the video id is appended
pub const WATCH_URL_BASE: &str = "https://music.youtube.com/watch?v=";

/// Category a result must carry to be accepted
const SONGS_CATEGORY: &str = "Songs";

/// Picks exactly one playable reference for an artist/title pair
#[derive(Clone)]
pub struct CatalogResolver {
    search: Arc<dyn SongSearch>,
}

impl CatalogResolver {
    pub fn new(search: Arc<dyn SongSearch>) -> Self {
        Self { search }
    }

    /// Resolve to a watch URL, or `None` when no acceptable match exists
    ///
    /// Only the top result is considered. Search errors count as a miss.
    pub async fn resolve(&self, artist: &str, title: &str) -> Option<String> {
        let query = format!("{artist}{RECORD_SEPARATOR}{title}");
        debug!("Searching catalog for: {}", query);

        let results = match self.search.search_songs(&query, 1).await {
            Ok(results) => results,
            Err(e) => {
                error!("Catalog search failed for {}: {:#}", query, e);
                return None;
            }
        };

        match results.first().and_then(accept) {
            Some(video_id) => Some(format!("{WATCH_URL_BASE}{video_id}")),
            None => {
                error!("Error finding song in catalog: {}", query);
                debug!("Search results: {:?}", results);
                None
            }
        }
    }
}

fn accept(result: &SearchResult) -> Option<&str> {
    if result.category != SONGS_CATEGORY {
        return None;
    }
    result.video_id.as_deref()
}
