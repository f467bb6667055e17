//! Integration tests for top-level CLI behavior.

use std::path::Path;
use std::process::{Command, Output};

fn fixver(cwd: &Path, args: &[&str]) -> Output {
    let bin = env!("CARGO_BIN_EXE_fixver");
    Command::new(bin)
        .args(args)
        .current_dir(cwd)
        .env_remove("JIRA_USER")
        .env_remove("JIRA_PASSWORD")
        .env_remove("FIXVER_CONFIG")
        .env_remove("RUST_LOG")
        // Unroutable, so a stray request fails fast instead of reaching a real tracker.
        .env("FIXVER_JIRA_URL", "http://127.0.0.1:9")
        .output()
        .expect("failed to run fixver binary")
}

#[test]
fn help_lists_subcommands() {
    let dir = tempfile::tempdir().unwrap();
    let output = fixver(dir.path(), &["--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("update"));
    assert!(stdout.contains("validate"));
}

#[test]
fn validate_help_shows_range_flags() {
    let dir = tempfile::tempdir().unwrap();
    let output = fixver(dir.path(), &["validate", "--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("--start-ref"));
    assert!(stdout.contains("--fix-version"));
    assert!(stdout.contains("--load-cache"));
}

#[test]
fn validate_without_args_shows_error() {
    let dir = tempfile::tempdir().unwrap();
    let output = fixver(dir.path(), &["validate"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr.contains("--start-ref"));
}

#[test]
fn unknown_subcommand_is_a_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    let output = fixver(dir.path(), &["release"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn update_without_credentials_fails_before_contacting_jira() {
    let dir = tempfile::tempdir().unwrap();
    let output = fixver(dir.path(), &["update"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr.contains("JIRA_USER"));
    assert!(!stderr.contains("Fetching batch"));
}

#[test]
fn update_with_unreadable_excludes_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = fixver(dir.path(), &["update", "--excludes", "missing.txt"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr.contains("missing.txt"));
}

#[test]
fn invalid_config_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("fixver.yaml");
    std::fs::write(&config, "projects: [unterminated").unwrap();
    let output = fixver(dir.path(), &["--config", "fixver.yaml", "update"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr.contains("Invalid config"));
}

#[test]
fn validate_from_empty_cache_reports_missing_cache() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("cache")).unwrap();
    let output = fixver(
        dir.path(),
        &["validate", "--start-ref", "v1", "--fix-version", "3.0.0", "--load-cache", "cache"],
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr.contains("no git cache"));
}
