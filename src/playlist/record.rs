//! Canonical track record

use std::fmt;

/// Separator between the artist and title parts of a rendered record
pub const RECORD_SEPARATOR: &str = " - ";

/// A normalized artist/title pair taken from playlist JSON
///
/// `artist` holds every credited artist joined with `", "`. Both fields are
/// non-empty for any record produced by the normalizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackRecord {
    pub artist: String,
    pub title: String,
}

impl TrackRecord {
    pub fn new(artist: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            artist: artist.into(),
            title: title.into(),
        }
    }
}

impl fmt::Display for TrackRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.artist, RECORD_SEPARATOR, self.title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_uses_separator() {
        let record = TrackRecord::new("Doja Cat, SZA", "Kiss Me More");
        assert_eq!(record.to_string(), "Doja Cat, SZA - Kiss Me More");
    }
}
