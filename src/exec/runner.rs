// src/exec/runner.rs

//! Single-command runner.

use std::future::Future;
use std::io::Write;
use std::pin::{Pin, pin};
use std::sync::{Arc, Mutex, PoisonError};

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Child;
use tracing::{Instrument, debug, error, info, info_span, warn};

use crate::errors::{RemindError, Result};
use crate::exec::outcome::{RunOutcome, RunReport};
use crate::exec::shell::{InterpreterHints, shell_command};
use crate::notify::Notifier;

/// Runner knobs.
#[derive(Debug, Clone)]
pub struct RunnerOptions {
    /// Echo each stdout line to the console while it is captured.
    pub echo: bool,
}

impl Default for RunnerOptions {
    fn default() -> Self {
        Self { echo: true }
    }
}

/// Runs one shell command, streams its stdout and reports the outcome.
#[derive(Debug, Clone)]
pub struct Runner {
    options: RunnerOptions,
    hints: InterpreterHints,
}

impl Runner {
    pub fn new(options: RunnerOptions) -> Result<Self> {
        let hints = InterpreterHints::new().context("compiling interpreter pattern")?;
        Ok(Self { options, hints })
    }

    /// Run `command` until it exits or `cancel` resolves.
    ///
    /// When `cancel` wins, the child is killed, reading stops and no
    /// reminder is sent. If it resolves after a failed command has exited but
    /// while its stderr is still open, the failure is reported with the
    /// stderr read so far. The reminder (if any) is dispatched before this
    /// returns; delivery errors are logged, never returned.
    pub async fn run_until<C>(
        &self,
        command: &str,
        notifier: &dyn Notifier,
        cancel: C,
    ) -> Result<RunReport>
    where
        C: Future<Output = ()>,
    {
        let span = info_span!("run", command = %command);

        async {
            let report = self.execute(command, cancel).await?;
            log_outcome(&report);

            if let Some(notification) = report.notification() {
                match notifier.send(&notification).await {
                    Ok(()) => debug!("reminder dispatched"),
                    Err(e) => error!(error = %e, "failed to send reminder email"),
                }
            }

            Ok::<_, RemindError>(report)
        }
        .instrument(span)
        .await
    }

    async fn execute<C>(&self, command: &str, cancel: C) -> Result<RunReport>
    where
        C: Future<Output = ()>,
    {
        let mut child = shell_command(command, &self.hints)
            .spawn()
            .map_err(|source| RemindError::Spawn {
                command: command.to_string(),
                source,
            })?;

        info!("command started; press CTRL+C to stop it. Output follows");

        let stdout = child
            .stdout
            .take()
            .context("child stdout was not piped")?;

        // Drain stderr concurrently so the child never blocks on a full pipe.
        let stderr_sink = Arc::new(Mutex::new(Vec::new()));
        let stderr_task = child
            .stderr
            .take()
            .map(|stderr| tokio::spawn(drain_into(stderr, Arc::clone(&stderr_sink))));

        let mut cancel = pin!(cancel);
        let mut captured = String::new();

        // Cancellation is polled first: a Ctrl-C also reaches the child, and
        // the resulting exit must still count as an interrupt.
        let streamed = tokio::select! {
            biased;
            _ = &mut cancel => None,
            res = self.stream_stdout(stdout, &mut captured) => Some(res),
        };

        // stdout may close before the process exits, so the wait stays
        // interruptible too.
        let status = match streamed {
            Some(res) => {
                res.context("reading command stdout")?;
                tokio::select! {
                    biased;
                    _ = &mut cancel => None,
                    status = child.wait() => Some(status.context("waiting for command to exit")?),
                }
            }
            None => None,
        };

        let outcome = match status {
            Some(status) => {
                let outcome = RunOutcome::from_status(status);
                debug!(?status, ?outcome, "command exited");
                if outcome.should_notify() && interrupt_pending(cancel.as_mut()).await {
                    info!("interrupt arrived as the command exited; treating the run as stopped");
                    RunOutcome::Interrupted
                } else {
                    outcome
                }
            }
            None => {
                info!("interrupt received; killing command");
                kill(&mut child).await;
                RunOutcome::Interrupted
            }
        };

        // A background grandchild can hold stderr open after the command
        // exits, so collecting it stays interruptible as well.
        let stderr = match (outcome, stderr_task) {
            (RunOutcome::Failed { .. }, Some(mut task)) => {
                let drained = tokio::select! {
                    biased;
                    _ = &mut cancel => None,
                    res = &mut task => Some(res),
                };
                match drained {
                    Some(Ok(Ok(()))) => {}
                    Some(Ok(Err(e))) => warn!(error = %e, "failed to read command stderr"),
                    Some(Err(e)) => warn!(error = %e, "stderr reader task failed"),
                    None => {
                        info!("interrupt received while collecting stderr; reporting what was read");
                        task.abort();
                    }
                }
                sink_text(&stderr_sink)
            }
            (_, Some(task)) => {
                task.abort();
                String::new()
            }
            (_, None) => String::new(),
        };

        Ok(RunReport {
            command: command.to_string(),
            outcome,
            stdout: captured,
            stderr,
        })
    }

    /// Copy stdout line by line into `captured`, echoing as it goes.
    ///
    /// Lines keep their newline; invalid UTF-8 is replaced rather than
    /// ending the stream.
    async fn stream_stdout<R>(&self, stdout: R, captured: &mut String) -> std::io::Result<()>
    where
        R: AsyncRead + Unpin,
    {
        let mut reader = BufReader::new(stdout);
        let mut buf = Vec::new();

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf).await? == 0 {
                return Ok(());
            }

            let line = String::from_utf8_lossy(&buf);
            if self.options.echo {
                if let Err(e) = echo(&line) {
                    debug!(error = %e, "console echo failed");
                }
            }
            captured.push_str(&line);
        }
    }
}

/// Resolves on Ctrl-C. Never resolves if the handler cannot be installed.
pub async fn interrupt_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for Ctrl+C; interrupt disabled");
        std::future::pending::<()>().await;
    }
}

fn echo(line: &str) -> std::io::Result<()> {
    let mut out = std::io::stdout().lock();
    out.write_all(line.as_bytes())?;
    out.flush()
}

/// Append everything read from `stream` to `sink`, chunk by chunk, so a
/// reader aborted halfway still leaves what it got.
async fn drain_into<R>(stream: R, sink: Arc<Mutex<Vec<u8>>>) -> std::io::Result<()>
where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(stream);
    loop {
        let chunk = reader.fill_buf().await?;
        if chunk.is_empty() {
            return Ok(());
        }
        let n = chunk.len();
        sink.lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(chunk);
        reader.consume(n);
    }
}

fn sink_text(sink: &Mutex<Vec<u8>>) -> String {
    let bytes = sink.lock().unwrap_or_else(PoisonError::into_inner);
    String::from_utf8_lossy(&bytes).into_owned()
}

/// Look at `cancel` once more after the child exited. A Ctrl-C reaches the
/// child and this process together, and the exit can be observed before the
/// signal listener is woken.
async fn interrupt_pending<C>(cancel: Pin<&mut C>) -> bool
where
    C: Future<Output = ()>,
{
    tokio::task::yield_now().await;
    tokio::select! {
        biased;
        _ = cancel => true,
        _ = std::future::ready(()) => false,
    }
}

async fn kill(child: &mut Child) {
    if let Err(e) = child.kill().await {
        warn!(error = %e, "failed to kill command on interrupt");
    }
}

fn log_outcome(report: &RunReport) {
    match report.outcome {
        RunOutcome::Succeeded => info!("{}", report.status_line()),
        RunOutcome::Failed { code } => {
            error!(exit_code = code, "{}", report.status_line());
            error!("\n{}", report.stderr_section());
        }
        RunOutcome::Terminated { signal } => {
            info!(?signal, "{}", report.status_line());
        }
        RunOutcome::Interrupted => info!("{}", report.status_line()),
    }
}
