use std::path::{Component, Path, PathBuf};

use crate::error::Error;
use crate::request::DownloadRequest;

/// Shipped default URL. A run that still resolves to it was never pointed at a real file.
pub const PLACEHOLDER_URL: &str = "https://example.com/file.pdf";
pub const DEFAULT_OUTPUT_FILE: &str = "downloaded.pdf";
pub const DEFAULT_TIMEOUT_MS: u64 = 180_000;

pub const USAGE: &str = "\
Usage:
  pdf-fetch <pdf_url> [--out <file>] [--timeout <ms>]

Examples:
  pdf-fetch \"https://example.com/file.pdf\" --out report.pdf
  pdf-fetch \"https://example.com/file.pdf\" --timeout 60000
";

/// Values used when the command line leaves something out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Defaults {
    pub url: String,
    pub output_file: String,
    pub timeout_ms: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            url: PLACEHOLDER_URL.to_string(),
            output_file: DEFAULT_OUTPUT_FILE.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

/// Process exit requested by the resolver. The caller prints `message`
/// (if any) followed by [`USAGE`] to stderr.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExitOutcome {
    pub code: u8,
    pub message: Option<String>,
}

impl ExitOutcome {
    fn help() -> Self {
        Self {
            code: 0,
            message: None,
        }
    }

    fn usage_error(message: impl Into<String>) -> Self {
        Self {
            code: 1,
            message: Some(message.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Proceed(DownloadRequest),
    Exit(ExitOutcome),
}

/// Turn the argument list (without the program name) into a request.
pub fn resolve<I, S>(args: I, cwd: &Path, defaults: &Defaults) -> Result<Resolution, Error>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let args: Vec<String> = args.into_iter().map(|a| a.as_ref().to_string()).collect();

    let mut out = defaults.output_file.clone();
    let mut timeout_ms = defaults.timeout_ms;
    let mut positional: Vec<&str> = Vec::new();
    // Reported only once the whole line has been scanned, so `--help` still wins.
    let mut bad_timeout: Option<&str> = None;

    let mut i = 0;
    while i < args.len() {
        let arg = args[i].as_str();
        let value = args.get(i + 1).filter(|v| !v.is_empty());

        match (arg, value) {
            ("--out", Some(path)) => {
                out = path.clone();
                i += 1;
            }
            ("--timeout", Some(raw)) => {
                match raw.trim().parse::<u64>() {
                    Ok(ms) if ms > 0 => timeout_ms = ms,
                    _ => bad_timeout = Some(raw.as_str()),
                }
                i += 1;
            }
            ("-h" | "--help", _) => return Ok(Resolution::Exit(ExitOutcome::help())),
            (flag, _) if flag.starts_with("--") => {
                log::warn!("Ignoring unknown flag: {}", flag);
            }
            (token, _) => positional.push(token),
        }
        i += 1;
    }

    if let Some(raw) = bad_timeout {
        return Ok(Resolution::Exit(ExitOutcome::usage_error(format!(
            "Invalid --timeout value: {raw}"
        ))));
    }

    let url = positional
        .first()
        .map(|s| s.to_string())
        .unwrap_or_else(|| defaults.url.clone());

    if url.is_empty() || url == PLACEHOLDER_URL {
        return Ok(Resolution::Exit(ExitOutcome::usage_error(
            "Please set a default URL or pass a PDF URL as the first argument.",
        )));
    }

    let output_path = absolutize(cwd, Path::new(&out));
    let request = DownloadRequest::new(url, output_path, timeout_ms)?;
    Ok(Resolution::Proceed(request))
}

/// Join `path` onto `base` and collapse `.`/`..` without touching the filesystem.
fn absolutize(base: &Path, path: &Path) -> PathBuf {
    let mut resolved = PathBuf::new();
    for component in base.join(path).components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                resolved.pop();
            }
            other => resolved.push(other),
        }
    }
    resolved
}
