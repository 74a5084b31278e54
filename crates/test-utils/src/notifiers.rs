use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use remind::errors::{RemindError, Result};
use remind::notify::{Notification, Notifier};

/// A notifier that records every reminder instead of sending it.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    sent: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<Notification> {
        self.sent.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

impl Notifier for RecordingNotifier {
    fn send<'a>(
        &'a self,
        notification: &'a Notification,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
        let sent = Arc::clone(&self.sent);
        Box::pin(async move {
            sent.lock().unwrap().push(notification.clone());
            Ok(())
        })
    }
}

/// A notifier whose every delivery fails, counting the attempts.
#[derive(Debug, Clone, Default)]
pub struct FailingNotifier {
    attempts: Arc<Mutex<usize>>,
}

impl FailingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attempts(&self) -> usize {
        *self.attempts.lock().unwrap()
    }
}

impl Notifier for FailingNotifier {
    fn send<'a>(
        &'a self,
        _notification: &'a Notification,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
        let attempts = Arc::clone(&self.attempts);
        Box::pin(async move {
            *attempts.lock().unwrap() += 1;
            Err(RemindError::MailError(
                "connection refused (simulated)".to_string(),
            ))
        })
    }
}
