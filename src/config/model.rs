// src/config/model.rs

use serde::{Deserialize, Deserializer, Serialize};

/// Mail settings as stored in `process_reminder.json`.
///
/// ```json
/// {
///     "sender_smtp_host": "smtp.example.com",
///     "sender_smtp_port": 25,
///     "sender_user": "bot@example.com",
///     "sender_pass": "secret",
///     "to_address": "me@example.com,team@example.com"
/// }
/// ```
///
/// Keys missing from the file, `null` values and an empty port string all
/// deserialize as blank, so they show up in
/// [`empty_keys`](crate::config::empty_keys) instead of failing the parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReminderConfig {
    #[serde(deserialize_with = "blank_if_null")]
    pub sender_smtp_host: String,

    /// `0` when blank. A numeric string such as `"587"` is accepted.
    #[serde(deserialize_with = "lenient_port")]
    pub sender_smtp_port: u16,

    /// Login name, also sent as the `From` address. It must therefore be a
    /// full mail address (`bot@example.com`); a bare login name makes every
    /// reminder fail with an "invalid sender address" error.
    #[serde(deserialize_with = "blank_if_null")]
    pub sender_user: String,

    #[serde(deserialize_with = "blank_if_null")]
    pub sender_pass: String,

    /// Comma-separated recipient list.
    #[serde(deserialize_with = "blank_if_null")]
    pub to_address: String,
}

/// Port written by `remind init`.
pub const DEFAULT_SMTP_PORT: u16 = 25;

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            sender_smtp_host: String::new(),
            sender_smtp_port: DEFAULT_SMTP_PORT,
            sender_user: String::new(),
            sender_pass: String::new(),
            to_address: String::new(),
        }
    }
}

fn blank_if_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PortValue {
    Number(u16),
    Text(String),
}

fn lenient_port<'de, D>(deserializer: D) -> Result<u16, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<PortValue>::deserialize(deserializer)? {
        None => Ok(0),
        Some(PortValue::Number(port)) => Ok(port),
        Some(PortValue::Text(text)) if text.trim().is_empty() => Ok(0),
        Some(PortValue::Text(text)) => text.trim().parse().map_err(|_| {
            serde::de::Error::custom(format!("sender_smtp_port {text:?} is not a port number"))
        }),
    }
}
