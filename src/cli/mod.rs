//! CLI module for sirius2usb

use clap::Parser;
use std::num::NonZeroUsize;
use std::path::PathBuf;

pub mod commands;

use crate::catalog::ytmusic::DEFAULT_MUSIC_URL;
use crate::config::DEFAULT_QUALITY;
use crate::download::fetcher::DEFAULT_YT_DLP;
use crate::xmplaylist::client::DEFAULT_API_URL;

#[derive(Parser, Debug)]
#[command(
    name = "sirius2usb",
    about = "SiriusXM to USB - Download your favorite SiriusXM tracks to local storage"
)]
#[command(version)]
pub struct Cli {
    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Destination folder for the sirius-<channel> folders
    #[arg(short, long, default_value = ".")]
    pub destination: PathBuf,

    /// Log file path (default: logs/app_<timestamp>.log)
    #[arg(short, long)]
    pub log_file: Option<PathBuf>,

    /// Channel to download; repeat the flag for several channels
    #[arg(
        short,
        long,
        value_name = "CHANNEL",
        required_unless_present = "completions"
    )]
    pub channel: Vec<String>,

    /// Actually download the files (otherwise a dry run)
    #[arg(long)]
    pub download: bool,

    /// MP3 bitrate in kbps
    #[arg(short, long, default_value = DEFAULT_QUALITY)]
    pub quality: String,

    /// Number of parallel downloads (default: number of CPUs)
    #[arg(short, long)]
    pub jobs: Option<NonZeroUsize>,

    /// Directory for cached station and channel JSON
    #[arg(long, default_value = "json")]
    pub cache_dir: PathBuf,

    /// Playlist metadata API base URL
    #[arg(long, env = "SIRIUS2USB_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Music catalog base URL
    #[arg(long, env = "SIRIUS2USB_MUSIC_URL", default_value = DEFAULT_MUSIC_URL)]
    pub music_url: String,

    /// yt-dlp executable
    #[arg(long, env = "SIRIUS2USB_YT_DLP", default_value = DEFAULT_YT_DLP)]
    pub yt_dlp: PathBuf,

    /// Print shell completions and exit
    #[arg(long, value_name = "SHELL")]
    pub completions: Option<clap_complete::Shell>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_channel_required() {
        assert!(Cli::try_parse_from(["sirius2usb"]).is_err());
        assert!(Cli::try_parse_from(["sirius2usb", "--completions", "bash"]).is_ok());
    }

    #[test]
    fn test_zero_jobs_rejected() {
        assert!(Cli::try_parse_from(["sirius2usb", "-c", "bpm", "-j", "0"]).is_err());
    }
}
