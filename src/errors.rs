// src/errors.rs

//! Crate-wide error aliases and helpers.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RemindError {
    #[error("config file not found at {0:?}; run `remind init` first")]
    ConfigMissing(PathBuf),

    #[error("config file {path:?} has empty values for: {}", .keys.join(", "))]
    ConfigIncomplete {
        path: PathBuf,
        keys: Vec<&'static str>,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("failed to spawn command [{command}]: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Mail error: {0}")]
    MailError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, RemindError>;
