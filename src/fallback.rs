//! Subprocess download through `curl`, used after the in-process fetch fails.

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use crate::error::FetchError;
use crate::orchestrator::Fetch;
use crate::request::DownloadRequest;

pub const CURL: &str = "curl";

const RETRIES: u32 = 5;
const RETRY_DELAY_SECS: u32 = 1;

/// Subprocess-level timeouts derived from the overall request timeout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurlTimeouts {
    pub connect_secs: u64,
    pub max_time_secs: u64,
}

impl CurlTimeouts {
    /// Connect timeout is clamped to 5..=120 s, total time to at most 600 s
    /// and never less than connect + 5.
    pub fn derive(timeout_ms: u64) -> Self {
        let connect_secs = (timeout_ms.min(120_000) / 1000).max(5);
        let max_time_secs = (timeout_ms.min(600_000) / 1000).max(connect_secs + 5);
        Self {
            connect_secs,
            max_time_secs,
        }
    }
}

pub struct CurlFetcher {
    program: PathBuf,
}

impl CurlFetcher {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Look `curl` up on PATH. When it is missing the bare name is kept and
    /// the launch error surfaces when the fallback actually runs.
    pub fn from_path() -> Self {
        match which::which(CURL) {
            Ok(path) => Self::new(path),
            Err(e) => {
                log::debug!("{} not found on PATH: {}", CURL, e);
                Self::new(CURL)
            }
        }
    }

    pub fn program(&self) -> &std::path::Path {
        &self.program
    }

    pub fn args(request: &DownloadRequest) -> Vec<OsString> {
        let timeouts = CurlTimeouts::derive(request.timeout_ms());
        let mut args: Vec<OsString> = [
            "-L".to_string(),
            "--fail".to_string(),
            "--retry".to_string(),
            RETRIES.to_string(),
            "--retry-delay".to_string(),
            RETRY_DELAY_SECS.to_string(),
            "--connect-timeout".to_string(),
            timeouts.connect_secs.to_string(),
            "--max-time".to_string(),
            timeouts.max_time_secs.to_string(),
            "-o".to_string(),
        ]
        .into_iter()
        .map(OsString::from)
        .collect();
        args.push(request.output_path().as_os_str().to_os_string());
        args.push(OsString::from(request.url()));
        args
    }

    fn program_name(&self) -> String {
        self.program.display().to_string()
    }
}

impl Fetch for CurlFetcher {
    fn name(&self) -> &str {
        CURL
    }

    fn fetch(&self, request: &DownloadRequest) -> Result<(), FetchError> {
        let args = Self::args(request);
        let shown: Vec<_> = args.iter().map(|a| a.to_string_lossy()).collect();
        println!("Running: {} {}", self.program_name(), shown.join(" "));

        let status = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|source| FetchError::Launch {
                program: self.program_name(),
                source,
            })?;

        match status.code() {
            Some(0) => Ok(()),
            Some(code) => Err(FetchError::Exit {
                program: self.program_name(),
                code,
            }),
            None => Err(FetchError::Terminated {
                program: self.program_name(),
            }),
        }
    }
}
