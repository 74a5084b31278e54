// src/exec/mod.rs

//! Process execution layer.
//!
//! This module runs the user's command through the platform shell with
//! `tokio::process::Command`, echoes its stdout live and hands the finished
//! [`RunReport`] to a [`Notifier`](crate::notify::Notifier).
//!
//! - [`shell`] builds the child process and the unbuffered-output hints.
//! - [`runner`] owns the stream / wait / interrupt flow.
//! - [`outcome`] classifies the exit and renders status line and mail body.

pub mod outcome;
pub mod runner;
pub mod shell;

pub use outcome::{RunOutcome, RunReport, STDERR_SEPARATOR, STDOUT_SEPARATOR};
pub use runner::{Runner, RunnerOptions, interrupt_signal};
pub use shell::{InterpreterHints, shell_command};
