// src/exec/outcome.rs

//! Classification of a finished run and the report assembled from it.

use std::process::ExitStatus;

use crate::notify::Notification;

pub const STDOUT_SEPARATOR: &str = "==========stdout==========\n";
pub const STDERR_SEPARATOR: &str = "==========stderr==========\n";

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Exited with status 0.
    Succeeded,
    /// Exited on its own with a non-zero status.
    Failed { code: i32 },
    /// Terminated by a signal it did not raise itself (e.g. `kill -9`).
    ///
    /// `signal` is `None` on platforms that cannot report it.
    Terminated { signal: Option<i32> },
    /// Stopped by the user via the interrupt path.
    Interrupted,
}

impl RunOutcome {
    /// Classify an exit status.
    ///
    /// On Unix a process that died from a signal has no exit code; that is
    /// reported as [`RunOutcome::Terminated`] rather than as a failure.
    pub fn from_status(status: ExitStatus) -> Self {
        if status.success() {
            return RunOutcome::Succeeded;
        }

        if let Some(code) = status.code() {
            return RunOutcome::Failed { code };
        }

        RunOutcome::Terminated {
            signal: terminating_signal(status),
        }
    }

    /// Only runs that ended on their own are worth a reminder.
    pub fn should_notify(&self) -> bool {
        matches!(self, RunOutcome::Succeeded | RunOutcome::Failed { .. })
    }
}

#[cfg(unix)]
fn terminating_signal(status: ExitStatus) -> Option<i32> {
    use std::os::unix::process::ExitStatusExt;
    status.signal()
}

#[cfg(not(unix))]
fn terminating_signal(_status: ExitStatus) -> Option<i32> {
    None
}

/// Everything captured from one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub command: String,
    pub outcome: RunOutcome,
    /// Captured stdout, each line kept with its trailing newline.
    pub stdout: String,
    /// Captured stderr. Only populated for failed runs.
    pub stderr: String,
}

impl RunReport {
    /// One-line summary used as log message and mail subject.
    pub fn status_line(&self) -> String {
        match self.outcome {
            RunOutcome::Succeeded => format!("command [{}] finished normally", self.command),
            RunOutcome::Failed { code } => format!(
                "command [{}] terminated abnormally, return code: {}",
                self.command, code
            ),
            RunOutcome::Terminated { .. } | RunOutcome::Interrupted => {
                format!("command [{}] stopped", self.command)
            }
        }
    }

    /// Mail body: the stdout section, plus the stderr section on failure.
    pub fn body(&self) -> String {
        let mut body = String::with_capacity(
            STDOUT_SEPARATOR.len() + self.stdout.len() + STDERR_SEPARATOR.len() + self.stderr.len(),
        );
        body.push_str(STDOUT_SEPARATOR);
        body.push_str(&self.stdout);

        if let RunOutcome::Failed { .. } = self.outcome {
            body.push_str(&self.stderr_section());
        }

        body
    }

    pub fn stderr_section(&self) -> String {
        format!("{STDERR_SEPARATOR}{}", self.stderr)
    }

    /// The reminder to send for this run, if any.
    pub fn notification(&self) -> Option<Notification> {
        if !self.outcome.should_notify() {
            return None;
        }

        Some(Notification {
            subject: self.status_line(),
            body: self.body(),
        })
    }
}
