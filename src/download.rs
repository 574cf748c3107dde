use std::fs;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::redirect::Policy;

use crate::error::FetchError;
use crate::orchestrator::Fetch;
use crate::request::DownloadRequest;

pub const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120 Safari/537.36";
pub const ACCEPT: &str = "application/pdf,*/*;q=0.9";

const MAX_REDIRECTS: usize = 10;

/// In-process HTTP download.
#[derive(Debug, Default, Clone)]
pub struct HttpFetcher;

impl HttpFetcher {
    pub fn new() -> Self {
        Self
    }

    fn client(&self, timeout: Duration) -> Result<Client, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static(ACCEPT));

        Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .redirect(Policy::limited(MAX_REDIRECTS))
            .timeout(timeout)
            .build()
            .map_err(FetchError::Request)
    }
}

impl Fetch for HttpFetcher {
    fn name(&self) -> &str {
        "fetch"
    }

    fn fetch(&self, request: &DownloadRequest) -> Result<(), FetchError> {
        let url = request.url();
        let output_path = request.output_path();
        log::info!("Downloading from {} to {:?}", url, output_path);

        let timed_out = |e: reqwest::Error| {
            if e.is_timeout() {
                FetchError::Timeout(request.timeout_ms())
            } else {
                FetchError::Request(e)
            }
        };

        let response = self
            .client(request.timeout())?
            .get(url)
            .send()
            .map_err(timed_out)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        if !content_type.is_empty() && !content_type.contains("application/pdf") {
            log::warn!(
                "Content-Type is not application/pdf ({}). Saving anyway.",
                content_type
            );
        }

        let bytes = response.bytes().map_err(timed_out)?;

        fs::write(output_path, &bytes).map_err(|source| FetchError::Write {
            path: output_path.to_path_buf(),
            source,
        })?;

        log::info!("Download completed: {} bytes", bytes.len());
        Ok(())
    }
}
