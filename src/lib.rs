// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod notify;

use std::future::Future;
use std::path::Path;

use tracing::{error, info, warn};

use crate::cli::{Action, CliArgs};
use crate::config::{
    InitOutcome, ReminderConfig, default_config_path, init_config, load_from_path,
    validate_config,
};
use crate::errors::{RemindError, Result};
use crate::exec::{RunReport, Runner, RunnerOptions, interrupt_signal};
use crate::notify::{Notifier, SmtpNotifier};

/// High-level entry point used by `main.rs`.
///
/// Missing or incomplete configuration is reported to the user and ends the
/// invocation normally; only unexpected failures come back as `Err`.
pub async fn run(args: CliArgs) -> Result<()> {
    let config_path = args.config.clone().unwrap_or_else(default_config_path);

    match args.action {
        Action::Init => initialise(&config_path),
        Action::Run { command } => run_configured(&config_path, &command).await,
    }
}

fn initialise(path: &Path) -> Result<()> {
    match init_config(path)? {
        InitOutcome::Created(path) => {
            info!(?path, "initialisation complete; created config file");
            info!("fill in the reminder mail settings before running a command");
        }
        InitOutcome::AlreadyExists(path) => {
            info!(?path, "already initialised; leaving existing config file untouched");
        }
    }
    Ok(())
}

async fn run_configured(path: &Path, command: &str) -> Result<()> {
    let cfg = match load_from_path(path) {
        Ok(cfg) => cfg,
        Err(RemindError::ConfigMissing(path)) => {
            error!(?path, "remind is not initialised; run `remind init` first");
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    let runner = Runner::new(RunnerOptions::default())?;
    let notifier = SmtpNotifier::from_config(&cfg);

    match execute_command(&runner, path, &cfg, command, &notifier, interrupt_signal()).await {
        Ok(_report) => Ok(()),
        Err(RemindError::ConfigIncomplete { path, keys }) => {
            warn!(
                ?path,
                "these config values are empty; complete the config file before running"
            );
            warn!("{}", keys.join(", "));
            Ok(())
        }
        Err(e) => Err(e),
    }
}

/// Validate `cfg`, then run `command` until it exits or `cancel` resolves.
///
/// Returns [`RemindError::ConfigIncomplete`] without spawning anything when
/// a required config value is blank.
pub async fn execute_command<C>(
    runner: &Runner,
    config_path: &Path,
    cfg: &ReminderConfig,
    command: &str,
    notifier: &dyn Notifier,
    cancel: C,
) -> Result<RunReport>
where
    C: Future<Output = ()>,
{
    validate_config(config_path, cfg)?;
    runner.run_until(command, notifier, cancel).await
}
