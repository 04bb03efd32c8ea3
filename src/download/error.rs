//! Worker failure types

use thiserror::Error;

/// Why a single work item did not produce a file
#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("failed to launch {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with code {code:?}: {stderr}")]
    Tool {
        program: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("worker task panicked: {0}")]
    Panicked(String),
}
