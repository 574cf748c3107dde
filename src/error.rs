use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures that end the run.
#[derive(Debug, Error)]
pub enum Error {
    #[error("URL must start with http:// or https:// (got {0:?})")]
    InvalidUrl(String),

    #[error("timeout must be a positive number of milliseconds")]
    InvalidTimeout,

    #[error("fallback download failed: {0}")]
    Fallback(#[source] FetchError),
}

/// A single download attempt that did not produce the output file.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Download failed: {status} {reason}")]
    Status { status: u16, reason: String },

    #[error("request timed out after {0} ms")]
    Timeout(u64),

    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to launch {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("{program} exited with code {code}")]
    Exit { program: String, code: i32 },

    #[error("{program} was terminated by a signal")]
    Terminated { program: String },
}
