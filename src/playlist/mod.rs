//! Playlist normalization module

pub mod normalize;
mod record;

pub use normalize::normalize_file;
pub use record::{TrackRecord, RECORD_SEPARATOR};
