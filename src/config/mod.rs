// src/config/mod.rs

//! Configuration loading and validation for remind.
//!
//! Responsibilities:
//! - Define the JSON-backed data model (`model.rs`).
//! - Load or initialise the config file on disk (`loader.rs`).
//! - Detect blank required values (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{
    CONFIG_FILE_NAME, InitOutcome, default_config_path, init_config, load_from_path,
};
pub use model::{DEFAULT_SMTP_PORT, ReminderConfig};
pub use validate::{empty_keys, validate_config};
