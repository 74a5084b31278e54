use remind::exec::{
    InterpreterHints, RunOutcome, RunReport, STDERR_SEPARATOR, STDOUT_SEPARATOR, shell_command,
};

fn report(outcome: RunOutcome) -> RunReport {
    RunReport {
        command: "make all".to_string(),
        outcome,
        stdout: "built\n".to_string(),
        stderr: "warning\n".to_string(),
    }
}

#[test]
fn only_self_terminated_runs_notify() {
    assert!(RunOutcome::Succeeded.should_notify());
    assert!(RunOutcome::Failed { code: 1 }.should_notify());
    assert!(!RunOutcome::Terminated { signal: Some(9) }.should_notify());
    assert!(!RunOutcome::Terminated { signal: None }.should_notify());
    assert!(!RunOutcome::Interrupted.should_notify());
}

#[test]
fn status_lines_name_the_command() {
    assert_eq!(
        report(RunOutcome::Succeeded).status_line(),
        "command [make all] finished normally"
    );
    assert_eq!(
        report(RunOutcome::Failed { code: 7 }).status_line(),
        "command [make all] terminated abnormally, return code: 7"
    );
    assert_eq!(
        report(RunOutcome::Interrupted).status_line(),
        "command [make all] stopped"
    );
}

#[test]
fn body_includes_stderr_only_on_failure() {
    assert_eq!(
        report(RunOutcome::Succeeded).body(),
        format!("{STDOUT_SEPARATOR}built\n")
    );
    assert_eq!(
        report(RunOutcome::Failed { code: 1 }).body(),
        format!("{STDOUT_SEPARATOR}built\n{STDERR_SEPARATOR}warning\n")
    );
}

#[test]
fn stopped_runs_have_no_notification() {
    assert!(report(RunOutcome::Interrupted).notification().is_none());
    assert!(
        report(RunOutcome::Terminated { signal: Some(15) })
            .notification()
            .is_none()
    );

    let n = report(RunOutcome::Succeeded).notification().unwrap();
    assert_eq!(n.subject, "command [make all] finished normally");
}

#[cfg(unix)]
#[test]
fn exit_status_classification() {
    use std::os::unix::process::ExitStatusExt;
    use std::process::ExitStatus;

    // Raw wait statuses: exit code in the high byte, signal in the low bits.
    assert_eq!(RunOutcome::from_status(ExitStatus::from_raw(0)), RunOutcome::Succeeded);
    assert_eq!(
        RunOutcome::from_status(ExitStatus::from_raw(2 << 8)),
        RunOutcome::Failed { code: 2 }
    );
    assert_eq!(
        RunOutcome::from_status(ExitStatus::from_raw(9)),
        RunOutcome::Terminated { signal: Some(9) }
    );
    assert_eq!(
        RunOutcome::from_status(ExitStatus::from_raw(2)),
        RunOutcome::Terminated { signal: Some(2) }
    );
}

#[test]
fn python_commands_are_recognised() {
    let hints = InterpreterHints::new().unwrap();

    for cmd in [
        "python train.py",
        "python3 -m http.server",
        "  python3.11 script.py --epochs 3",
        "/usr/bin/python3 x.py",
        "/usr/bin/env python3 x.py",
        "env python x.py",
        "python",
    ] {
        assert_eq!(
            hints.unbuffered_env(cmd),
            &[("PYTHONUNBUFFERED", "1")],
            "expected a hint for {cmd:?}"
        );
    }
}

#[test]
fn other_commands_get_no_hints() {
    let hints = InterpreterHints::new().unwrap();

    for cmd in ["echo python", "ls", "pythonic run", "make python", "cargo test"] {
        assert!(hints.unbuffered_env(cmd).is_empty(), "unexpected hint for {cmd:?}");
    }
}

#[test]
fn hints_are_applied_to_the_environment_not_the_command() {
    let hints = InterpreterHints::new().unwrap();
    let cmd = shell_command("python train.py", &hints);
    let std_cmd = cmd.as_std();

    let env: Vec<_> = std_cmd
        .get_envs()
        .map(|(k, v)| (k.to_owned(), v.map(|v| v.to_owned())))
        .collect();
    assert!(env.contains(&(
        "PYTHONUNBUFFERED".into(),
        Some("1".into())
    )));

    let args: Vec<_> = std_cmd.get_args().collect();
    assert_eq!(args.last().copied(), Some(std::ffi::OsStr::new("python train.py")));
}
