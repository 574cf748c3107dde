use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use log::LevelFilter;

use crate::cli::Defaults;

pub const ENV_DEFAULT_URL: &str = "PDF_FETCH_DEFAULT_URL";
pub const ENV_OUTPUT: &str = "PDF_FETCH_OUTPUT";
pub const ENV_TIMEOUT_MS: &str = "PDF_FETCH_TIMEOUT_MS";
pub const ENV_CURL: &str = "PDF_FETCH_CURL";
pub const ENV_LOG: &str = "PDF_FETCH_LOG";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub defaults: Defaults,
    pub curl_program: Option<PathBuf>,
    pub log_level: LevelFilter,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            defaults: Defaults::default(),
            curl_program: None,
            log_level: LevelFilter::Info,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Unset or blank keys keep their default.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Config::default();

        if let Some(url) = get(ENV_DEFAULT_URL) {
            config.defaults.url = url;
        }
        if let Some(out) = get(ENV_OUTPUT) {
            config.defaults.output_file = out;
        }
        if let Some(raw) = get(ENV_TIMEOUT_MS) {
            let ms: u64 = raw.trim().parse().with_context(|| {
                format!(
                    "{} must be a number of milliseconds: {:?}",
                    ENV_TIMEOUT_MS, raw
                )
            })?;
            if ms == 0 {
                anyhow::bail!("{} must be greater than zero", ENV_TIMEOUT_MS);
            }
            config.defaults.timeout_ms = ms;
        }
        if let Some(program) = get(ENV_CURL) {
            config.curl_program = Some(PathBuf::from(program));
        }
        if let Some(level) = get(ENV_LOG) {
            config.log_level = LevelFilter::from_str(level.trim())
                .with_context(|| format!("{} is not a log level: {:?}", ENV_LOG, level))?;
        }

        Ok(config)
    }
}
