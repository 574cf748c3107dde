use crate::error::{Error, FetchError};
use crate::request::DownloadRequest;

/// One way of turning a request into the output file.
pub trait Fetch {
    fn name(&self) -> &str;
    fn fetch(&self, request: &DownloadRequest) -> Result<(), FetchError>;
}

/// Which tier produced the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Primary,
    Fallback,
}

/// Runs the primary fetcher and, only if it fails, the fallback once.
pub struct Orchestrator<P, F> {
    primary: P,
    fallback: F,
}

impl<P: Fetch, F: Fetch> Orchestrator<P, F> {
    pub fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }

    pub fn run(&self, request: &DownloadRequest) -> Result<Outcome, Error> {
        println!("PDF URL: {}", request.url());
        println!("Output: {}", request.output_path().display());
        println!("Timeout (ms): {}", request.timeout_ms());

        let outcome = match self.primary.fetch(request) {
            Ok(()) => Outcome::Primary,
            Err(e) => {
                log::warn!("{}", self.fallback_notice());
                log::warn!("{}", e);

                self.fallback.fetch(request).map_err(Error::Fallback)?;
                Outcome::Fallback
            }
        };

        let via = match outcome {
            Outcome::Primary => self.primary.name(),
            Outcome::Fallback => self.fallback.name(),
        };
        log::info!("Download finished via {}", via);
        println!("Saved → {}", request.output_path().display());
        Ok(outcome)
    }

    fn fallback_notice(&self) -> String {
        format!("Fetch download failed; falling back to {}…", self.fallback.name())
    }
}
