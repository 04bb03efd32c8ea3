//! Flatten schema-less playlist JSON into track records
//!
//! Playlist documents nest track data under unpredictable parent keys, and
//! a track container is either a singular `track` object or a plural
//! `tracks` array. The walk below is total: any key that is missing or of
//! the wrong type is treated as "not here" and the traversal carries on.

use serde_json::{Map, Value};
use std::path::Path;
use tracing::{debug, error};

use super::record::TrackRecord;

/// Extract every valid track from a playlist document, in traversal order
pub fn normalize(document: &Value) -> Vec<TrackRecord> {
    let mut records = Vec::new();
    visit(document, &mut records);
    records
}

/// Parse `text` as JSON and normalize it; malformed input yields nothing
pub fn normalize_str(text: &str) -> Vec<TrackRecord> {
    match serde_json::from_str::<Value>(text) {
        Ok(document) => normalize(&document),
        Err(e) => {
            debug!("Playlist document is not valid JSON: {}", e);
            Vec::new()
        }
    }
}

/// Read and normalize a cached playlist file
///
/// Read or parse failures are logged and yield an empty sequence.
pub fn normalize_file(path: &Path) -> Vec<TrackRecord> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            error!("Error processing file {}: {}", path.display(), e);
            return Vec::new();
        }
    };

    match serde_json::from_str::<Value>(&content) {
        Ok(document) => normalize(&document),
        Err(e) => {
            error!("Error processing file {}: {}", path.display(), e);
            Vec::new()
        }
    }
}

fn visit(value: &Value, records: &mut Vec<TrackRecord>) {
    match value {
        Value::Object(map) => {
            for candidate in track_candidates(map) {
                if let Some(record) = extract_track(candidate) {
                    records.push(record);
                }
            }
            for child in map.values() {
                visit(child, records);
            }
        }
        Value::Array(items) => {
            for item in items {
                visit(item, records);
            }
        }
        _ => {}
    }
}

/// `track` wins when it is an object, otherwise `tracks` when it is an array
fn track_candidates(map: &Map<String, Value>) -> &[Value] {
    if let Some(track) = map.get("track").filter(|t| t.is_object()) {
        return std::slice::from_ref(track);
    }
    match map.get("tracks") {
        Some(Value::Array(tracks)) => tracks,
        _ => &[],
    }
}

fn extract_track(candidate: &Value) -> Option<TrackRecord> {
    let track = candidate.as_object()?;
    let artists = track.get("artists")?.as_array()?;
    let title = track.get("title")?.as_str().filter(|t| !t.is_empty())?;

    let names: Vec<&str> = artists.iter().filter_map(artist_name).collect();
    if names.is_empty() {
        return None;
    }

    Some(TrackRecord::new(names.join(", "), title))
}

/// An artist entry is a bare string or an object with a `name`
fn artist_name(entry: &Value) -> Option<&str> {
    let name = match entry {
        Value::String(name) => name.as_str(),
        Value::Object(artist) => artist.get("name")?.as_str()?,
        _ => return None,
    };
    (!name.is_empty()).then_some(name)
}
