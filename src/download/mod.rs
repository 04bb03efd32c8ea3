//! Download dispatch module

pub mod dispatcher;
pub mod error;
pub mod fetcher;
pub mod pool;

use std::path::PathBuf;

pub use dispatcher::{DispatchReport, DispatchSettings, Dispatcher};
pub use fetcher::YtDlpFetcher;

/// One unit of download/transcode work
#[derive(Debug, Clone)]
pub struct WorkItem {
    /// Playable URL to fetch
    pub media_reference: String,
    /// Sanitized file stem, without extension
    pub destination_filename: String,
    /// Target MP3 bitrate in kbps
    pub quality: String,
    pub output_folder: PathBuf,
    /// False for a dry run: log only
    pub execute: bool,
}
