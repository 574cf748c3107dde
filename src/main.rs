use std::process::ExitCode;

use anyhow::{Context, Result};
use log::{debug, info, LevelFilter};
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

use pdf_fetch::{
    resolve, Config, CurlFetcher, Defaults, ExitOutcome, HttpFetcher, Orchestrator, Resolution,
    USAGE,
};

fn setup_logging(level: LevelFilter) -> Result<()> {
    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .set_location_level(LevelFilter::Debug)
        .build();

    TermLogger::init(level, config, TerminalMode::Stderr, ColorChoice::Auto)?;

    Ok(())
}

fn exit_with(outcome: ExitOutcome) -> ExitCode {
    if let Some(message) = outcome.message {
        eprintln!("{}", message);
    }
    eprint!("{}", USAGE);
    ExitCode::from(outcome.code)
}

fn run() -> Result<ExitCode> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let cwd = std::env::current_dir().context("Failed to read working directory")?;

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            // Help is still answered when the environment is broken.
            if let Ok(Resolution::Exit(outcome)) = resolve(&args, &cwd, &Defaults::default()) {
                if outcome.code == 0 {
                    return Ok(exit_with(outcome));
                }
            }
            return Err(e.context("Invalid configuration"));
        }
    };
    setup_logging(config.log_level)?;

    let request = match resolve(&args, &cwd, &config.defaults)? {
        Resolution::Proceed(request) => request,
        Resolution::Exit(outcome) => return Ok(exit_with(outcome)),
    };

    let fallback = match config.curl_program {
        Some(program) => CurlFetcher::new(program),
        None => CurlFetcher::from_path(),
    };
    info!("Fallback program: {}", fallback.program().display());

    Orchestrator::new(HttpFetcher::new(), fallback).run(&request)?;
    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            debug!("Download failed: {:?}", e);
            eprintln!("Failed: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
