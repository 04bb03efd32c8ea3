//! Run configuration
//!
//! Collapses parsed CLI arguments (with their env fallbacks) into one value
//! that is handed to the orchestrator.

use std::num::NonZeroUsize;
use std::path::PathBuf;

use crate::cli::Cli;
use crate::download::DispatchSettings;

pub const DEFAULT_QUALITY: &str = "192";

/// Everything a run needs to know
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Channels to process, in order
    pub channels: Vec<String>,
    /// Parent of the `sirius-{channel}` output folders
    pub destination: PathBuf,
    /// Directory holding `stations.json` and the per-channel caches
    pub cache_dir: PathBuf,
    pub api_url: String,
    pub music_url: String,
    /// Path or name of the yt-dlp executable
    pub yt_dlp: PathBuf,
    pub dispatch: DispatchSettings,
}

impl RunConfig {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            channels: cli.channel.clone(),
            destination: cli.destination.clone(),
            cache_dir: cli.cache_dir.clone(),
            api_url: cli.api_url.clone(),
            music_url: cli.music_url.clone(),
            yt_dlp: cli.yt_dlp.clone(),
            dispatch: DispatchSettings {
                quality: cli.quality.clone(),
                execute: cli.download,
                workers: cli.jobs.map(NonZeroUsize::get).unwrap_or_else(default_workers),
            },
        }
    }
}

/// One worker per available CPU
pub fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_defaults_are_dry_run() {
        let cli = Cli::parse_from(["sirius2usb", "-c", "octane"]);
        let config = RunConfig::from_cli(&cli);

        assert_eq!(config.channels, vec!["octane"]);
        assert!(!config.dispatch.execute);
        assert_eq!(config.dispatch.quality, DEFAULT_QUALITY);
        assert_eq!(config.dispatch.workers, default_workers());
        assert_eq!(config.destination, PathBuf::from("."));
        assert_eq!(config.cache_dir, PathBuf::from("json"));
    }

    #[test]
    fn test_explicit_options() {
        let cli = Cli::parse_from([
            "sirius2usb",
            "-c",
            "octane",
            "--channel",
            "bpm",
            "--download",
            "-j",
            "3",
            "-q",
            "320",
            "-d",
            "/music",
        ]);
        let config = RunConfig::from_cli(&cli);

        assert_eq!(config.channels, vec!["octane", "bpm"]);
        assert!(config.dispatch.execute);
        assert_eq!(config.dispatch.workers, 3);
        assert_eq!(config.dispatch.quality, "320");
        assert_eq!(config.destination, PathBuf::from("/music"));
    }
}
