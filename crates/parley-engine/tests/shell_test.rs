#![cfg(unix)]

use parley_engine::shell::{HostShell, ShellError, ShellRunner};
use std::time::{Duration, Instant};

#[tokio::test]
async fn test_captures_stdout_and_stderr() {
    let dir = tempfile::tempdir().unwrap();
    let out = HostShell::new()
        .run("echo out; echo err 1>&2", dir.path(), Duration::from_secs(10))
        .await
        .unwrap();
    assert_eq!(out.stdout, "out\n");
    assert_eq!(out.stderr, "err\n");
    assert_eq!(out.status, Some(0));
}

#[tokio::test]
async fn test_runs_in_given_directory() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("marker.txt"), "").unwrap();
    let out = HostShell::new()
        .run("ls", dir.path(), Duration::from_secs(10))
        .await
        .unwrap();
    assert_eq!(out.stdout.trim(), "marker.txt");
}

#[tokio::test]
async fn test_nonzero_exit_is_not_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let out = HostShell::new()
        .run("exit 3", dir.path(), Duration::from_secs(10))
        .await
        .unwrap();
    assert_eq!(out.status, Some(3));
}

#[tokio::test]
async fn test_timeout_kills_child() {
    let dir = tempfile::tempdir().unwrap();
    let started = Instant::now();
    let err = HostShell::new()
        .run("sleep 30", dir.path(), Duration::from_secs(1))
        .await
        .unwrap_err();
    assert!(matches!(err, ShellError::Timeout(1)));
    assert!(started.elapsed() < Duration::from_secs(10));
}

#[tokio::test]
async fn test_missing_interpreter_is_launch_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = HostShell::with_program("/nonexistent/shell")
        .run("true", dir.path(), Duration::from_secs(1))
        .await
        .unwrap_err();
    assert!(matches!(err, ShellError::Launch(_)));
}
