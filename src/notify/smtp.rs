// src/notify/smtp.rs

use std::future::Future;
use std::pin::Pin;

use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{debug, info};

use crate::config::ReminderConfig;
use crate::errors::{RemindError, Result};
use crate::notify::{Notification, Notifier};

/// How the SMTP connection is secured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmtpSecurity {
    /// No TLS, like a bare `SMTP` + `AUTH` session on port 25.
    Plain,
    /// Upgrade with `STARTTLS` after connecting (submission port 587).
    StartTls,
    /// TLS from the first byte (port 465).
    Tls,
}

impl SmtpSecurity {
    pub fn for_port(port: u16) -> Self {
        match port {
            465 => SmtpSecurity::Tls,
            587 => SmtpSecurity::StartTls,
            _ => SmtpSecurity::Plain,
        }
    }
}

/// Sends reminders through an SMTP server, one session per reminder.
#[derive(Debug, Clone)]
pub struct SmtpNotifier {
    host: String,
    port: u16,
    security: SmtpSecurity,
    user: String,
    pass: String,
    to_address: String,
}

impl SmtpNotifier {
    pub fn from_config(cfg: &ReminderConfig) -> Self {
        Self {
            host: cfg.sender_smtp_host.trim().to_string(),
            port: cfg.sender_smtp_port,
            security: SmtpSecurity::for_port(cfg.sender_smtp_port),
            user: cfg.sender_user.trim().to_string(),
            pass: cfg.sender_pass.clone(),
            to_address: cfg.to_address.clone(),
        }
    }

    pub fn security(&self) -> SmtpSecurity {
        self.security
    }

    fn transport(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>> {
        let builder = match self.security {
            SmtpSecurity::Plain => {
                AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&self.host)
            }
            SmtpSecurity::StartTls => {
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.host)
                    .map_err(|e| mail_error("configuring STARTTLS", e))?
            }
            SmtpSecurity::Tls => AsyncSmtpTransport::<Tokio1Executor>::relay(&self.host)
                .map_err(|e| mail_error("configuring TLS", e))?,
        };

        Ok(builder
            .port(self.port)
            .credentials(Credentials::new(self.user.clone(), self.pass.clone()))
            .build())
    }

    async fn deliver(&self, notification: &Notification) -> Result<()> {
        let message = build_message(
            &self.user,
            &self.to_address,
            &notification.subject,
            &notification.body,
        )?;

        debug!(
            host = %self.host,
            port = self.port,
            security = ?self.security,
            "opening SMTP session"
        );

        // Without the `pool` feature every `send` opens its own connection
        // and closes it with QUIT afterwards.
        let response = self
            .transport()?
            .send(message)
            .await
            .map_err(|e| mail_error("sending reminder", e))?;

        debug!(code = %response.code(), "SMTP server accepted message");
        info!(to = %self.to_address, "reminder email sent");
        Ok(())
    }
}

impl Notifier for SmtpNotifier {
    fn send<'a>(
        &'a self,
        notification: &'a Notification,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
        Box::pin(self.deliver(notification))
    }
}

/// Split a comma-separated recipient list, dropping blank entries.
pub fn parse_recipients(to_address: &str) -> Vec<&str> {
    to_address
        .split(',')
        .map(str::trim)
        .filter(|addr| !addr.is_empty())
        .collect()
}

/// Build the plain-text UTF-8 reminder message.
pub fn build_message(from: &str, to_address: &str, subject: &str, body: &str) -> Result<Message> {
    let from: Mailbox = from.parse().map_err(|e| {
        mail_error(
            &format!("invalid sender address {from:?} (sender_user must be a full mail address)"),
            e,
        )
    })?;

    let recipients = parse_recipients(to_address);
    if recipients.is_empty() {
        return Err(RemindError::MailError(format!(
            "no recipients in {to_address:?}"
        )));
    }

    let mut builder = Message::builder()
        .from(from)
        .subject(subject)
        .header(ContentType::TEXT_PLAIN);

    for addr in recipients {
        let to: Mailbox = addr
            .parse()
            .map_err(|e| mail_error(&format!("invalid recipient address {addr:?}"), e))?;
        builder = builder.to(to);
    }

    builder
        .body(body.to_string())
        .map_err(|e| mail_error("building message", e))
}

fn mail_error(what: &str, err: impl std::fmt::Display) -> RemindError {
    RemindError::MailError(format!("{what}: {err}"))
}
