//! Integration tests driving the compiled binary.
//!
//! Each test points XDG_CONFIG_HOME and HOME at a temp dir so no user config
//! leaks in, and pipes stdin so the line-based selector is used.

use super::test_utils::{chat_completion_body, closed_port_url, serve_once};
use nlsh::select::SELECTION_PROMPT;
use std::io::Write;
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

fn nlsh(temp: &TempDir, args: &[&str], stdin: &str) -> Output {
    let bin = env!("CARGO_BIN_EXE_nlsh");
    let mut child = Command::new(bin)
        .env("XDG_CONFIG_HOME", temp.path().join("config"))
        .env("HOME", temp.path())
        .env_remove("NLSH_LOG")
        .env_remove("NLSH_LOG_FORMAT")
        .env_remove("NLSH_LOG_OUTPUT")
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(stdin.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

#[test]
fn test_missing_query_exits_with_usage_error() {
    let temp = TempDir::new().unwrap();
    let output = nlsh(&temp, &[], "");
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("QUERY"));
}

#[test]
fn test_print_config_uses_config_file() {
    let temp = TempDir::new().unwrap();
    let config_dir = temp.path().join("config").join("nlsh");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(
        config_dir.join("config.toml"),
        "[provider]\nmodel = \"codellama:7b\"\n",
    )
    .unwrap();

    let output = nlsh(&temp, &["--print-config"], "");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("model = \"codellama:7b\""), "{}", stdout);
    assert!(stdout.contains("base_url = \"http://localhost:11434\""));
}

#[test]
fn test_flags_override_config_in_print_config() {
    let temp = TempDir::new().unwrap();
    let output = nlsh(
        &temp,
        &["--model", "phi3", "--endpoint", "http://10.1.1.1:11434", "--print-config"],
        "",
    );
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("model = \"phi3\""));
    assert!(stdout.contains("base_url = \"http://10.1.1.1:11434\""));
}

#[test]
fn test_unreachable_endpoint_is_tool_error() {
    let temp = TempDir::new().unwrap();
    let endpoint = closed_port_url();
    let output = nlsh(&temp, &["--endpoint", &endpoint, "list", "files"], "1\n");
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Provider request failed"), "{}", stderr);
    assert!(String::from_utf8_lossy(&output.stdout).is_empty());
}

#[test]
fn test_quit_exits_cleanly() {
    let temp = TempDir::new().unwrap();
    let server = serve_once(200, &chat_completion_body(r#"["ls -la", "ls -lah"]"#));
    let output = nlsh(
        &temp,
        &["--endpoint", &server.base_url, "list", "files"],
        "q\n",
    );
    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("1) ls -la\n2) ls -lah\n"), "{}", stdout);
    assert!(!stdout.contains("Executing"));
}

#[test]
fn test_failed_command_exit_code() {
    let temp = TempDir::new().unwrap();
    let server = serve_once(200, &chat_completion_body(r#"[{"command": "exit 5"}]"#));
    let output = nlsh(&temp, &["--endpoint", &server.base_url, "fail"], "x\n1\n");
    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Executing: exit 5"));
    assert!(stdout.contains("Command failed with exit code 5."));
    assert!(stdout.contains(SELECTION_PROMPT), "{}", stdout);
    assert!(stdout.contains("Invalid input 'x'"), "{}", stdout);
    assert!(!String::from_utf8_lossy(&output.stderr).contains("Invalid input"));
}

#[test]
fn test_empty_model_output_is_tool_error() {
    let temp = TempDir::new().unwrap();
    let server = serve_once(200, &chat_completion_body("  "));
    let output = nlsh(&temp, &["--endpoint", &server.base_url, "nothing"], "1\n");
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("No commands generated"));
}

#[test]
fn test_show_raw_echoes_model_output() {
    let temp = TempDir::new().unwrap();
    let server = serve_once(200, &chat_completion_body("Try this:\n[\"true\"]"));
    let output = nlsh(
        &temp,
        &["--endpoint", &server.base_url, "--show-raw", "noop"],
        "1\n",
    );
    assert_eq!(output.status.code(), Some(0));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Raw output:\nTry this:"), "{}", stderr);
    assert!(String::from_utf8_lossy(&output.stdout).contains("Command executed successfully."));
}
