// src/logging.rs

//! Logging setup for `remind` using `tracing` + `tracing-subscriber`.
//!
//! Priority for determining the log level:
//! 1. `--debug` / `--log-level` CLI flags (if provided)
//! 2. `REMIND_LOG` environment variable (e.g. "info", "debug")
//! 3. default to `info`
//!
//! Logs are sent to STDERR so that stdout carries only the command's own
//! output.

use anyhow::Result;
use tracing::debug;
use tracing_subscriber::fmt;

use crate::cli::LogLevel;

/// Initialise global logging subscriber.
///
/// Safe to call once at startup.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let level = resolve_level(
        cli_level,
        std::env::var("REMIND_LOG").ok().as_deref(),
    );

    fmt()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .init();

    debug!("debug logging enabled");
    Ok(())
}

/// Pick the effective level from the CLI value and the raw env value.
pub fn resolve_level(cli_level: Option<LogLevel>, env_value: Option<&str>) -> tracing::Level {
    match cli_level {
        Some(lvl) => lvl.into(),
        // `Level::from_str` is case-insensitive and also accepts "1".."5".
        None => env_value
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(tracing::Level::INFO),
    }
}
