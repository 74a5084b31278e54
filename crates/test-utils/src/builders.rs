#![allow(dead_code)]

use std::io::Write;
use std::path::PathBuf;

use remind::config::ReminderConfig;
use tempfile::TempDir;

/// Builder for `ReminderConfig` to simplify test setup.
///
/// Starts from a complete, valid configuration; use the `with_*` methods to
/// blank out or change individual values.
pub struct ConfigBuilder {
    config: ReminderConfig,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: ReminderConfig {
                sender_smtp_host: "smtp.example.com".to_string(),
                sender_smtp_port: 25,
                sender_user: "bot@example.com".to_string(),
                sender_pass: "hunter2".to_string(),
                to_address: "me@example.com".to_string(),
            },
        }
    }

    pub fn host(mut self, host: &str) -> Self {
        self.config.sender_smtp_host = host.to_string();
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.config.sender_smtp_port = port;
        self
    }

    pub fn user(mut self, user: &str) -> Self {
        self.config.sender_user = user.to_string();
        self
    }

    pub fn pass(mut self, pass: &str) -> Self {
        self.config.sender_pass = pass.to_string();
        self
    }

    pub fn to_address(mut self, to: &str) -> Self {
        self.config.to_address = to.to_string();
        self
    }

    pub fn build(self) -> ReminderConfig {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A temporary directory holding a config file.
pub struct ConfigDir {
    pub dir: TempDir,
    pub path: PathBuf,
}

impl ConfigDir {
    /// An empty directory; `path` does not exist yet.
    pub fn empty() -> Self {
        let dir = tempfile::tempdir().expect("creating temp dir");
        let path = dir.path().join(remind::config::CONFIG_FILE_NAME);
        Self { dir, path }
    }

    /// A directory whose config file holds `contents` verbatim.
    pub fn with_contents(contents: &str) -> Self {
        let cfg = Self::empty();
        let mut file = std::fs::File::create(&cfg.path).expect("creating config file");
        file.write_all(contents.as_bytes())
            .expect("writing config file");
        cfg
    }

    /// A directory whose config file is `config` serialized as JSON.
    pub fn with_config(config: &ReminderConfig) -> Self {
        let json = serde_json::to_string_pretty(config).expect("serializing config");
        Self::with_contents(&json)
    }
}
