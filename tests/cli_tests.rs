//! CLI integration tests

use std::process::Command;

fn pyforge_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_pyforge"))
}

#[test]
fn help_output() {
    let output = pyforge_bin()
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("native extension"));
    assert!(stdout.contains("--python"));
    assert!(stdout.contains("--profile"));
    assert!(stdout.contains("--jobs"));
    assert!(stdout.contains("--source-dir"));
    assert!(stdout.contains("locate"));
    assert!(stdout.contains("inspect"));
    assert!(stdout.contains("config"));
}

#[test]
fn version_output() {
    let output = pyforge_bin()
        .arg("--version")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("pyforge"));
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn config_path_command() {
    let output = pyforge_bin()
        .args(["config", "path"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("pyforge"));
    assert!(stdout.contains("config.toml"));
}

#[test]
fn config_help() {
    let output = pyforge_bin()
        .args(["config", "--help"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("init"));
    assert!(stdout.contains("set"));
    assert!(stdout.contains("get"));
    assert!(stdout.contains("list"));
    assert!(stdout.contains("path"));
}

#[test]
fn invalid_profile_error() {
    let output = pyforge_bin()
        .args(["--profile", "fast"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("invalid value") || stderr.contains("possible values"),
        "Expected error about invalid profile, got: {}",
        stderr
    );
}

#[test]
fn invalid_jobs_error() {
    let output = pyforge_bin()
        .args(["--jobs", "lots"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("invalid value") || stderr.contains("invalid digit"),
        "Expected error about invalid job count, got: {}",
        stderr
    );
}

#[test]
fn config_get_unknown_key() {
    let output = pyforge_bin()
        .args(["config", "get", "unknown_key"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Unknown") || stderr.contains("Valid"),
        "Expected error about unknown key, got: {}",
        stderr
    );
}

#[test]
fn config_set_unknown_key() {
    let output = pyforge_bin()
        .args(["config", "set", "unknown_key", "value"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Unknown") || stderr.contains("Valid"),
        "Expected error about unknown key, got: {}",
        stderr
    );
}

#[test]
fn config_set_invalid_profile() {
    let output = pyforge_bin()
        .args(["config", "set", "profile", "fast"])
        .env("XDG_CONFIG_HOME", "/nonexistent")
        .env("HOME", "/nonexistent")
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Invalid profile") || stderr.contains("profile"),
        "Expected error about invalid profile value, got: {}",
        stderr
    );
}

// Note: a bare `pyforge` invocation starts probing the configured
// interpreter; end-to-end pipeline behavior is covered by the fake
// interpreter tests in locate_cli_tests.rs
