//! Logging setup: colored console output plus a plain-text log file

use anyhow::{Context, Result};
use chrono::Local;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Keeps the file writer alive; drop it last to flush pending lines
pub struct LoggingGuard(#[allow(dead_code)] WorkerGuard);

/// `logs/app_<timestamp>.log` relative to the working directory
pub fn default_log_file() -> PathBuf {
    PathBuf::from("logs").join(format!("app_{}.log", Local::now().format("%Y%m%d_%H%M%S")))
}

/// Install the global subscriber
///
/// `RUST_LOG` takes precedence over the `debug` switch.
pub fn init_logging(debug: bool, log_file: &Path) -> Result<LoggingGuard> {
    let filter = if debug {
        "sirius2usb=debug"
    } else {
        "sirius2usb=info"
    };

    if let Some(parent) = log_file.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .with_context(|| format!("Failed to open log file {}", log_file.display()))?;
    let (file_writer, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(
            fmt::layer()
                .with_writer(file_writer)
                .with_ansi(false)
                .with_target(false),
        )
        .try_init()
        .context("Failed to install log subscriber")?;

    Ok(LoggingGuard(guard))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_log_file_name() {
        let path = default_log_file();
        assert!(path.starts_with("logs"));

        let name = path.file_name().unwrap().to_string_lossy();
        assert!(name.starts_with("app_"));
        assert!(name.ends_with(".log"));
        // app_YYYYmmdd_HHMMSS.log
        assert_eq!(name.len(), "app_20240101_120000.log".len());
    }
}
