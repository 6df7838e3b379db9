//! Command line parsing.

use crate::{parse_args, Options};

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|arg| arg.to_string()).collect()
}

#[test]
fn no_arguments_use_defaults() {
    let options = parse_args(args(&[])).unwrap();
    assert_eq!(options, Options::default());
    assert!(!options.stdout);
    assert_eq!(options.battery, 100);
}

#[test]
fn every_flag_is_parsed() {
    let options = parse_args(args(&[
        "--stdout",
        "--minutes",
        "90",
        "--battery",
        "42",
        "--config",
        "/etc/compact.toml",
    ]))
    .unwrap();

    assert!(options.stdout);
    assert_eq!(options.minutes, 90);
    assert_eq!(options.battery, 42);
    assert_eq!(options.config.as_deref(), Some("/etc/compact.toml"));
}

#[test]
fn battery_is_clamped_to_full() {
    let options = parse_args(args(&["--battery", "250"])).unwrap();
    assert_eq!(options.battery, 100);
}

#[test]
fn bad_arguments_are_rejected() {
    assert!(parse_args(args(&["--minutes"])).is_err());
    assert!(parse_args(args(&["--minutes", "soon"])).is_err());
    assert!(parse_args(args(&["--battery", "-5"])).is_err());
    assert!(parse_args(args(&["--verbose"])).is_err());
}
