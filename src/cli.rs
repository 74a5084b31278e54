// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Command-line arguments for `remind`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "remind",
    version,
    about = "Run a shell command and email its outcome when it finishes.",
    long_about = None
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub action: Action,

    /// Enable debug logging (shorthand for `--log-level debug`).
    #[arg(long, global = true)]
    pub debug: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `REMIND_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL", global = true)]
    pub log_level: Option<LogLevel>,

    /// Path to the config file (JSON).
    ///
    /// Default: `process_reminder.json` in the per-user config directory.
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Action {
    /// Create the default configuration file.
    Init,

    /// Execute a shell command and send a reminder email when it ends.
    Run {
        /// The shell command to execute.
        #[arg(short = 'c', long = "command", value_name = "COMMAND")]
        command: String,
    },
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for tracing::Level {
    fn from(lvl: LogLevel) -> Self {
        match lvl {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

impl CliArgs {
    /// Level requested on the command line, `--debug` winning over
    /// `--log-level`.
    pub fn requested_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            Some(LogLevel::Debug)
        } else {
            self.log_level
        }
    }
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
