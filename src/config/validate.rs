// src/config/validate.rs

use std::path::Path;

use crate::config::model::ReminderConfig;
use crate::errors::{RemindError, Result};

/// Keys whose value is blank, in file order.
///
/// A string is blank when it is empty or whitespace only; the port is blank
/// when it is `0`.
pub fn empty_keys(cfg: &ReminderConfig) -> Vec<&'static str> {
    let fields: [(&'static str, bool); 5] = [
        ("sender_smtp_host", is_blank(&cfg.sender_smtp_host)),
        ("sender_smtp_port", cfg.sender_smtp_port == 0),
        ("sender_user", is_blank(&cfg.sender_user)),
        ("sender_pass", is_blank(&cfg.sender_pass)),
        ("to_address", is_blank(&cfg.to_address)),
    ];

    fields
        .into_iter()
        .filter(|(_, empty)| *empty)
        .map(|(key, _)| key)
        .collect()
}

/// Reject a configuration with any blank required value.
///
/// `path` only feeds the error message so the user knows which file to fix.
pub fn validate_config(path: &Path, cfg: &ReminderConfig) -> Result<()> {
    let keys = empty_keys(cfg);
    if keys.is_empty() {
        return Ok(());
    }

    Err(RemindError::ConfigIncomplete {
        path: path.to_path_buf(),
        keys,
    })
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
