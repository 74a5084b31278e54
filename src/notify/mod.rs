// src/notify/mod.rs

//! Reminder delivery.
//!
//! The runner talks to a [`Notifier`] instead of an SMTP client directly.
//! Production code uses [`SmtpNotifier`]; tests can provide their own
//! implementation that records what would have been sent.

use std::future::Future;
use std::pin::Pin;

use crate::errors::Result;

pub mod smtp;

pub use smtp::{SmtpNotifier, SmtpSecurity, build_message, parse_recipients};

/// A reminder ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub subject: String,
    pub body: String,
}

/// Trait abstracting how a reminder leaves the machine.
///
/// Errors are returned to the caller, which logs and drops them; a failed
/// delivery never changes the outcome of a run that has already finished.
pub trait Notifier: Send + Sync {
    fn send<'a>(
        &'a self,
        notification: &'a Notification,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>>;
}
