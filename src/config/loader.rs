// src/config/loader.rs

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::config::model::ReminderConfig;
use crate::errors::{RemindError, Result};

/// File name of the configuration inside the per-user config directory.
pub const CONFIG_FILE_NAME: &str = "process_reminder.json";

/// Result of [`init_config`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitOutcome {
    /// A fresh default file was written.
    Created(PathBuf),
    /// A file was already there and has been left untouched.
    AlreadyExists(PathBuf),
}

/// Load a configuration file from a given path.
///
/// This only performs JSON deserialization; blank values are reported by
/// [`validate_config`](crate::config::validate_config), not here.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<ReminderConfig> {
    let path = path.as_ref();
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(RemindError::ConfigMissing(path.to_path_buf()));
        }
        Err(e) => return Err(e.into()),
    };

    let config: ReminderConfig = serde_json::from_str(&contents)?;

    Ok(config)
}

/// Write the default configuration to `path` unless something is already
/// there.
///
/// Parent directories are created as needed. The file is opened with
/// `create_new`, so an existing configuration is never truncated even if it
/// appears between the check and the write.
pub fn init_config(path: impl AsRef<Path>) -> Result<InitOutcome> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating config dir {:?}", parent))?;
        }
    }

    let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            return Ok(InitOutcome::AlreadyExists(path.to_path_buf()));
        }
        Err(e) => return Err(e.into()),
    };

    let json = serde_json::to_string_pretty(&ReminderConfig::default())?;
    file.write_all(json.as_bytes())
        .with_context(|| format!("writing config file {:?}", path))?;
    file.write_all(b"\n")?;

    Ok(InitOutcome::Created(path.to_path_buf()))
}

/// Resolve the default config path: `<config dir>/process_reminder.json`.
///
/// Falls back to the current directory on platforms where `dirs` cannot
/// determine a per-user config directory.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_FILE_NAME)
}
