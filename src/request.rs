use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::Error;

/// The resolved input for one invocation. Read-only once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    url: String,
    output_path: PathBuf,
    timeout_ms: u64,
}

impl DownloadRequest {
    pub fn new(
        url: impl Into<String>,
        output_path: PathBuf,
        timeout_ms: u64,
    ) -> Result<Self, Error> {
        let url = url.into();
        if !has_http_scheme(&url) {
            return Err(Error::InvalidUrl(url));
        }
        if timeout_ms == 0 {
            return Err(Error::InvalidTimeout);
        }

        Ok(Self {
            url,
            output_path,
            timeout_ms,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

fn has_http_scheme(url: &str) -> bool {
    ["http://", "https://"].iter().any(|scheme| {
        url.get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    })
}
