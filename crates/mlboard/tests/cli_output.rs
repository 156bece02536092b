//! Integration tests for CLI output behavior
//!
//! The default behavior is quiet (no logs). Use -v/--verbose to enable logs.

use std::io::Write;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

/// Run mlboard with `args`, assert success and return the output
fn run_mlboard(args: &[&str]) -> std::process::Output {
    let output = Command::new(env!("CARGO_BIN_EXE_mlboard"))
        .args(args)
        .output()
        .expect("Failed to execute mlboard");

    assert!(
        output.status.success(),
        "mlboard {:?} failed with exit code {:?}. stderr: {}",
        args,
        output.status.code(),
        String::from_utf8_lossy(&output.stderr)
    );

    output
}

fn stdout_of(args: &[&str]) -> String {
    String::from_utf8_lossy(&run_mlboard(args).stdout).to_string()
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock before epoch")
        .as_secs()
}

fn json_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_duration_output() {
    assert_eq!(stdout_of(&["duration", "65"]), "1:05\n");
    assert_eq!(stdout_of(&["duration", "3665"]), "1:01:05\n");
    assert_eq!(stdout_of(&["duration", "-5"]), "5s ago\n");
    assert_eq!(stdout_of(&["duration", "5.25", "--precision", "2"]), "5.25s\n");
}

#[test]
fn test_status_plain_output() {
    let stdout = stdout_of(&["status", "RUNNING", "--age", "4000"]);
    assert!(stdout.starts_with("LOST\tdanger\t"), "got: {}", stdout);
    assert!(stdout.trim_end().ends_with("1:06:40 ago"), "got: {}", stdout);

    let stdout = stdout_of(&["status", "RUNNING", "--age", "400"]);
    assert!(stdout.starts_with("Maybe LOST\twarning\t"), "got: {}", stdout);
}

#[test]
fn test_status_json_output() {
    let stdout = stdout_of(&["status", "COMPLETED", "--exit-code", "1", "--json"]);
    let value: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    assert_eq!(value["status"], "COMPLETED");
    assert_eq!(value["extended_status"], "FAILED");
    assert_eq!(value["badge_class"], "danger");
    assert_eq!(value["exit_code"], 1);
}

#[test]
fn test_status_from_recent_heartbeat() {
    let heartbeat = (now_secs() - 10).to_string();
    let stdout = stdout_of(&[
        "status",
        "RUNNING",
        "--heartbeat",
        &heartbeat,
        "--complete-class",
        "secondary",
    ]);
    assert!(stdout.starts_with("RUNNING\tprimary\t"), "got: {}", stdout);
}

#[test]
fn test_ago_relative_text() {
    let timestamp = (now_secs() - 125).to_string();
    let stdout = stdout_of(&["ago", &timestamp]);
    assert_eq!(stdout, "2 minutes ago\n");
}

#[test]
fn test_ago_old_timestamp_prints_date() {
    let stdout = stdout_of(&["ago", "1592222400"]);
    assert!(stdout.contains("2020"), "got: {}", stdout);
    assert!(!stdout.trim_end().ends_with("ago"), "got: {}", stdout);
}

#[test]
fn test_ago_watch_stops_after_count() {
    let timestamp = (now_secs() - 5).to_string();
    let stdout = stdout_of(&["ago", &timestamp, "--watch", "--count", "2"]);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2, "got: {}", stdout);
    for line in lines {
        assert!(line.ends_with("seconds ago"), "got: {}", line);
    }
}

#[test]
fn test_ago_watch_returns_when_label_is_static() {
    let stdout = stdout_of(&["ago", "1592222400", "--watch"]);
    assert_eq!(stdout.lines().count(), 1);
}

#[test]
fn test_diff_output() {
    let left = json_file(r#"{"a": 1, "b": [1, 2]}"#);
    let same = json_file(r#"{"b": [1, 2], "a": 1.0}"#);
    let other = json_file(r#"{"a": 1, "b": [1, 2, 3]}"#);

    let left_path = left.path().to_str().unwrap();
    assert_eq!(
        stdout_of(&["diff", left_path, same.path().to_str().unwrap()]),
        "equal\n"
    );
    assert_eq!(
        stdout_of(&["diff", left_path, other.path().to_str().unwrap()]),
        "different\n"
    );
}

#[test]
fn test_diff_missing_file_fails() {
    let output = Command::new(env!("CARGO_BIN_EXE_mlboard"))
        .args(["diff", "/nonexistent/left.json", "/nonexistent/right.json"])
        .output()
        .expect("Failed to execute mlboard");
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn test_filter_output() {
    let stdout = stdout_of(&["filter", "step", "train_loss", "__acc", "lr"]);
    assert_eq!(stdout, "train_loss\nlr\n");

    let stdout = stdout_of(&["filter", "valid_loss", "train_loss", "--pattern", "^valid_"]);
    assert_eq!(stdout, "valid_loss\n");
}

/// Verify that stdout contains only user-facing output (no JSON logs)
/// and that stderr has no INFO logs by default (quiet mode)
#[test]
fn test_default_mode_is_quiet() {
    let output = run_mlboard(&["duration", "65"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(
        !stdout.contains(r#""event":"#),
        "stdout should not contain JSON logs, got: {}",
        stdout
    );
    assert!(
        !stderr.contains(r#""level":"INFO""#),
        "Default mode should not emit INFO logs, got: {}",
        stderr
    );
}

#[test]
fn test_verbose_mode_emits_json_logs_on_stderr() {
    let output = run_mlboard(&["-v", "duration", "65"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(stdout, "1:05\n");
    assert!(
        stderr.contains("cli.duration_completed"),
        "verbose mode should log command completion, got: {}",
        stderr
    );
    for line in stderr.lines().filter(|l| !l.trim().is_empty()) {
        if line.starts_with("Warning:") || line.starts_with("Tip:") {
            continue;
        }
        assert!(line.trim_start().starts_with('{'), "non-JSON log line: {}", line);
    }
}
