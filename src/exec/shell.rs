// src/exec/shell.rs

//! Building the child process: platform shell plus unbuffered-output hints.

use std::process::Stdio;

use regex::Regex;
use tokio::process::Command;
use tracing::debug;

/// Recognises commands that start a known block-buffering interpreter.
///
/// Interpreters such as CPython switch stdout to block buffering when it is
/// a pipe, which would hold back the live echo until the buffer fills. For
/// those we turn on unbuffered mode through the child environment instead of
/// touching the command string.
#[derive(Debug, Clone)]
pub struct InterpreterHints {
    python: Regex,
}

impl InterpreterHints {
    pub fn new() -> Result<Self, regex::Error> {
        // Leading program, optionally behind a path and/or `env`:
        //   python x.py | python3.11 -m mod | /usr/bin/env python3 x.py
        let python = Regex::new(
            r"^\s*(?:\S*/)?(?:env\s+)?(?:\S*[/\\])?python[0-9.]*(?:\.exe)?(?:\s|$)",
        )?;

        Ok(Self { python })
    }

    /// Environment variables that force unbuffered output for `command`.
    pub fn unbuffered_env(&self, command: &str) -> &'static [(&'static str, &'static str)] {
        if self.python.is_match(command) {
            &[("PYTHONUNBUFFERED", "1")]
        } else {
            &[]
        }
    }
}

/// Build a shell command appropriate for the platform with stdout and
/// stderr piped.
pub fn shell_command(command: &str, hints: &InterpreterHints) -> Command {
    let mut cmd = if cfg!(windows) {
        let mut c = Command::new("cmd");
        c.arg("/C").arg(command);
        c
    } else {
        let mut c = Command::new("sh");
        c.arg("-c").arg(command);
        c
    };

    for (key, value) in hints.unbuffered_env(command) {
        debug!(%key, %value, "forcing unbuffered interpreter output");
        cmd.env(key, value);
    }

    cmd.stdin(Stdio::inherit())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    cmd
}
