//! Download a PDF by URL: an in-process HTTP fetch first, `curl` as a fallback.

pub mod cli;
pub mod config;
pub mod download;
pub mod error;
pub mod fallback;
pub mod orchestrator;
pub mod request;

pub use cli::{resolve, Defaults, ExitOutcome, Resolution, USAGE};
pub use config::Config;
pub use download::HttpFetcher;
pub use error::{Error, FetchError};
pub use fallback::{CurlFetcher, CurlTimeouts};
pub use orchestrator::{Fetch, Orchestrator, Outcome};
pub use request::DownloadRequest;
