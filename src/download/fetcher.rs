//! External fetch/transcode tool
//!
//! Audio is fetched, transcoded to MP3, tagged and given embedded artwork by
//! `yt-dlp` (which drives `ffmpeg` for the post-processing steps).

use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

use super::error::WorkerError;
use super::WorkItem;

pub const DEFAULT_YT_DLP: &str = "yt-dlp";

/// Performs the actual download for one work item
#[async_trait]
pub trait AudioFetcher: Send + Sync {
    async fn fetch(&self, item: &WorkItem) -> Result<(), WorkerError>;
}

/// Runs `yt-dlp` as a child process per work item
#[derive(Debug, Clone)]
pub struct YtDlpFetcher {
    program: PathBuf,
}

impl YtDlpFetcher {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Command line arguments for `item`
    pub fn args(item: &WorkItem) -> Vec<String> {
        let output_template = item
            .output_folder
            .join(format!("{}.%(ext)s", item.destination_filename));

        vec![
            "--quiet".to_string(),
            "--no-playlist".to_string(),
            "--format".to_string(),
            "bestaudio/best".to_string(),
            "--extract-audio".to_string(),
            "--audio-format".to_string(),
            "mp3".to_string(),
            "--audio-quality".to_string(),
            format!("{}K", item.quality),
            "--embed-thumbnail".to_string(),
            "--embed-metadata".to_string(),
            "--output".to_string(),
            output_template.to_string_lossy().into_owned(),
            item.media_reference.clone(),
        ]
    }
}

impl Default for YtDlpFetcher {
    fn default() -> Self {
        Self::new(DEFAULT_YT_DLP)
    }
}

#[async_trait]
impl AudioFetcher for YtDlpFetcher {
    async fn fetch(&self, item: &WorkItem) -> Result<(), WorkerError> {
        let program = self.program.display().to_string();
        let args = Self::args(item);
        debug!("Running {} {}", program, args.join(" "));

        let output = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|source| WorkerError::Spawn {
                program: program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(WorkerError::Tool {
                program,
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item() -> WorkItem {
        WorkItem {
            media_reference: "https://music.youtube.com/watch?v=abc".to_string(),
            destination_filename: "AC-DC - Thunderstruck".to_string(),
            quality: "192".to_string(),
            output_folder: PathBuf::from("sirius-octane"),
            execute: true,
        }
    }

    #[test]
    fn test_args_request_tagged_mp3() {
        let args = YtDlpFetcher::args(&item());

        let pos = |flag: &str| args.iter().position(|a| a == flag).unwrap();
        assert_eq!(args[pos("--format") + 1], "bestaudio/best");
        assert_eq!(args[pos("--audio-format") + 1], "mp3");
        assert_eq!(args[pos("--audio-quality") + 1], "192K");
        assert!(args.contains(&"--embed-thumbnail".to_string()));
        assert!(args.contains(&"--embed-metadata".to_string()));
        assert_eq!(
            PathBuf::from(&args[pos("--output") + 1]),
            PathBuf::from("sirius-octane").join("AC-DC - Thunderstruck.%(ext)s")
        );
        assert_eq!(args.last().unwrap(), "https://music.youtube.com/watch?v=abc");
    }

    #[tokio::test]
    async fn test_missing_program_is_spawn_error() {
        let fetcher = YtDlpFetcher::new("/nonexistent/yt-dlp-for-tests");
        let err = fetcher.fetch(&item()).await.unwrap_err();
        assert!(matches!(err, WorkerError::Spawn { .. }));
    }
}
