//! Integration tests for logging destinations and environment overrides.
//!
//! Every run points at a closed port so the pipeline stops after the model
//! call; the assertions only look at where diagnostics went.

use super::test_utils::closed_port_url;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

/// Matches resolve_log_file_path in src/logging.rs: state_dir is
/// $XDG_STATE_HOME/nlsh (ProjectDirs app path).
fn expected_log_path(state_home: &Path) -> PathBuf {
    state_home.join("nlsh").join("nlsh.log")
}

fn run_nlsh(temp: &TempDir, args: &[&str], env: &[(&str, &str)]) -> Output {
    let endpoint = closed_port_url();
    let bin = env!("CARGO_BIN_EXE_nlsh");
    let mut command = Command::new(bin);
    command
        .env("XDG_STATE_HOME", temp.path().join("state"))
        .env("XDG_DATA_HOME", temp.path().join("data"))
        .env("XDG_CONFIG_HOME", temp.path().join("config"))
        .env("HOME", temp.path())
        .env_remove("NLSH_LOG")
        .env_remove("NLSH_LOG_FORMAT")
        .env_remove("NLSH_LOG_OUTPUT")
        .args(args)
        .args(["--endpoint", &endpoint, "list", "files"])
        .stdin(Stdio::null());
    for (key, value) in env {
        command.env(key, value);
    }
    command.output().unwrap()
}

#[test]
fn test_file_output_writes_default_state_path() {
    let temp = TempDir::new().unwrap();
    let output = run_nlsh(&temp, &["--log-output", "file"], &[]);
    assert_eq!(output.status.code(), Some(2));

    let log_path = expected_log_path(&temp.path().join("state"));
    assert!(
        log_path.exists(),
        "log file should exist at {}",
        log_path.display()
    );
    let content = fs::read_to_string(&log_path).unwrap();
    assert!(content.contains("nlsh starting"), "{}", content);
    assert!(content.contains("Run failed"), "{}", content);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!stderr.contains("nlsh starting"), "{}", stderr);
    assert!(stderr.contains("Provider request failed"), "{}", stderr);
}

#[test]
fn test_verbose_logs_debug_records_to_stderr() {
    let temp = TempDir::new().unwrap();
    let output = run_nlsh(&temp, &["--verbose"], &[]);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("nlsh starting"), "{}", stderr);
    assert!(stderr.contains("DEBUG"), "{}", stderr);
    assert!(stderr.contains("Sending prompt to model"), "{}", stderr);
    assert!(String::from_utf8_lossy(&output.stdout).is_empty());
    assert!(!expected_log_path(&temp.path().join("state")).exists());
}

#[test]
fn test_logging_is_silent_by_default() {
    let temp = TempDir::new().unwrap();
    let output = run_nlsh(&temp, &[], &[]);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!stderr.contains("nlsh starting"), "{}", stderr);
    assert!(stderr.contains("Provider request failed"), "{}", stderr);
}

#[test]
fn test_nlsh_log_alone_enables_logging() {
    let temp = TempDir::new().unwrap();
    let output = run_nlsh(&temp, &[], &[("NLSH_LOG", "debug")]);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("nlsh starting"), "{}", stderr);
    assert!(stderr.contains("DEBUG"), "{}", stderr);
}

#[test]
fn test_nlsh_log_filter_overrides_verbose_level() {
    let temp = TempDir::new().unwrap();
    let output = run_nlsh(&temp, &["--verbose"], &[("NLSH_LOG", "error")]);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!stderr.contains("nlsh starting"), "{}", stderr);
    assert!(!stderr.contains("DEBUG"), "{}", stderr);
    assert!(stderr.contains("Run failed"), "{}", stderr);
}

#[test]
fn test_nlsh_log_format_overrides_configured_format() {
    let temp = TempDir::new().unwrap();
    let output = run_nlsh(
        &temp,
        &["--verbose", "--log-format", "text"],
        &[("NLSH_LOG_FORMAT", "json")],
    );

    let stderr = String::from_utf8_lossy(&output.stderr);
    let startup = stderr
        .lines()
        .find(|line| line.contains("nlsh starting"))
        .unwrap_or_else(|| panic!("no startup record in {}", stderr));
    assert!(startup.starts_with('{'), "{}", startup);
    assert!(startup.contains("\"level\":\"INFO\""), "{}", startup);
}

#[test]
fn test_nlsh_log_output_overrides_config_file() {
    let temp = TempDir::new().unwrap();
    let config_dir = temp.path().join("config").join("nlsh");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(
        config_dir.join("config.toml"),
        "[logging]\nenabled = true\noutput = \"stderr\"\n",
    )
    .unwrap();

    let output = run_nlsh(&temp, &[], &[("NLSH_LOG_OUTPUT", "file")]);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!stderr.contains("nlsh starting"), "{}", stderr);
    let content = fs::read_to_string(expected_log_path(&temp.path().join("state"))).unwrap();
    assert!(content.contains("nlsh starting"), "{}", content);
}
