mod common;
use crate::common::builders::{ConfigBuilder, ConfigDir};

use std::path::Path;

use remind::config::{
    DEFAULT_SMTP_PORT, InitOutcome, ReminderConfig, empty_keys, init_config, load_from_path,
    validate_config,
};
use remind::errors::RemindError;

#[test]
fn init_writes_default_config() {
    let cfg_dir = ConfigDir::empty();

    let outcome = init_config(&cfg_dir.path).unwrap();
    assert_eq!(outcome, InitOutcome::Created(cfg_dir.path.clone()));

    let loaded = load_from_path(&cfg_dir.path).unwrap();
    assert_eq!(loaded, ReminderConfig::default());
    assert_eq!(loaded.sender_smtp_port, DEFAULT_SMTP_PORT);

    let raw = std::fs::read_to_string(&cfg_dir.path).unwrap();
    for key in [
        "sender_smtp_host",
        "sender_smtp_port",
        "sender_user",
        "sender_pass",
        "to_address",
    ] {
        assert!(raw.contains(key), "default file should contain {key}: {raw}");
    }
}

#[test]
fn init_creates_missing_parent_dirs() {
    let cfg_dir = ConfigDir::empty();
    let nested = cfg_dir.dir.path().join("a/b/process_reminder.json");

    let outcome = init_config(&nested).unwrap();

    assert_eq!(outcome, InitOutcome::Created(nested.clone()));
    assert!(nested.is_file());
}

#[test]
fn init_never_overwrites_existing_config() {
    let existing = ConfigBuilder::new().host("mail.internal").build();
    let cfg_dir = ConfigDir::with_config(&existing);
    let before = std::fs::read_to_string(&cfg_dir.path).unwrap();

    let outcome = init_config(&cfg_dir.path).unwrap();
    assert_eq!(outcome, InitOutcome::AlreadyExists(cfg_dir.path.clone()));

    init_config(&cfg_dir.path).unwrap();

    let after = std::fs::read_to_string(&cfg_dir.path).unwrap();
    assert_eq!(before, after);
    assert_eq!(load_from_path(&cfg_dir.path).unwrap(), existing);
}

#[test]
fn missing_config_is_reported_as_not_initialised() {
    let cfg_dir = ConfigDir::empty();

    match load_from_path(&cfg_dir.path) {
        Err(RemindError::ConfigMissing(path)) => assert_eq!(path, cfg_dir.path),
        other => panic!("Expected ConfigMissing, got: {:?}", other),
    }
}

#[test]
fn malformed_json_is_a_parse_error() {
    let cfg_dir = ConfigDir::with_contents("{ \"sender_smtp_host\": ");

    match load_from_path(&cfg_dir.path) {
        Err(RemindError::JsonError(_)) => {}
        other => panic!("Expected JsonError, got: {:?}", other),
    }
}

#[test]
fn absent_keys_load_as_blank_values() {
    let cfg_dir = ConfigDir::with_contents(r#"{ "sender_smtp_host": "smtp.example.com" }"#);

    let cfg = load_from_path(&cfg_dir.path).unwrap();

    assert_eq!(cfg.sender_smtp_host, "smtp.example.com");
    assert_eq!(cfg.sender_smtp_port, DEFAULT_SMTP_PORT);
    assert_eq!(
        empty_keys(&cfg),
        vec!["sender_user", "sender_pass", "to_address"]
    );
}

#[test]
fn null_values_load_as_blank_values() {
    let cfg_dir = ConfigDir::with_contents(
        r#"{
            "sender_smtp_host": null,
            "sender_smtp_port": null,
            "sender_user": "bot@example.com",
            "sender_pass": null,
            "to_address": "me@example.com"
        }"#,
    );

    let cfg = load_from_path(&cfg_dir.path).unwrap();

    assert_eq!(
        empty_keys(&cfg),
        vec!["sender_smtp_host", "sender_smtp_port", "sender_pass"]
    );
    match validate_config(&cfg_dir.path, &cfg) {
        Err(RemindError::ConfigIncomplete { keys, .. }) => {
            assert_eq!(keys, vec!["sender_smtp_host", "sender_smtp_port", "sender_pass"]);
        }
        other => panic!("Expected ConfigIncomplete, got: {:?}", other),
    }
}

#[test]
fn empty_port_string_is_blank_and_numeric_string_is_a_port() {
    let blank = ConfigDir::with_contents(r#"{ "sender_smtp_port": "" }"#);
    let cfg = load_from_path(&blank.path).unwrap();
    assert_eq!(cfg.sender_smtp_port, 0);
    assert!(empty_keys(&cfg).contains(&"sender_smtp_port"));

    let numeric = ConfigDir::with_contents(r#"{ "sender_smtp_port": " 587 " }"#);
    assert_eq!(load_from_path(&numeric.path).unwrap().sender_smtp_port, 587);
}

#[test]
fn non_numeric_port_string_is_a_parse_error() {
    let cfg_dir = ConfigDir::with_contents(r#"{ "sender_smtp_port": "smtp" }"#);

    match load_from_path(&cfg_dir.path) {
        Err(RemindError::JsonError(e)) => {
            assert!(e.to_string().contains("not a port number"), "{e}");
        }
        other => panic!("Expected JsonError, got: {:?}", other),
    }
}

#[test]
fn complete_config_has_no_empty_keys() {
    let cfg = ConfigBuilder::new().build();

    assert!(empty_keys(&cfg).is_empty());
    assert!(validate_config(Path::new("x.json"), &cfg).is_ok());
}

#[test]
fn blank_values_are_listed_in_file_order() {
    let cfg = ConfigBuilder::new()
        .port(0)
        .pass("   ")
        .to_address("")
        .build();

    assert_eq!(
        empty_keys(&cfg),
        vec!["sender_smtp_port", "sender_pass", "to_address"]
    );
}

#[test]
fn default_config_lists_every_string_key() {
    assert_eq!(
        empty_keys(&ReminderConfig::default()),
        vec!["sender_smtp_host", "sender_user", "sender_pass", "to_address"]
    );
}

#[test]
fn incomplete_config_error_names_file_and_keys() {
    let path = Path::new("/tmp/process_reminder.json");
    let cfg = ConfigBuilder::new().host("").user("").build();

    let err = validate_config(path, &cfg).unwrap_err();

    match &err {
        RemindError::ConfigIncomplete { path: p, keys } => {
            assert_eq!(p, path);
            assert_eq!(keys, &vec!["sender_smtp_host", "sender_user"]);
        }
        other => panic!("Expected ConfigIncomplete, got: {:?}", other),
    }

    let msg = err.to_string();
    assert!(msg.contains("sender_smtp_host, sender_user"), "{msg}");
}
