use std::time::Instant;

use tempfile::tempdir;
use tokio::time::Duration;

use super::{
    fixtures::go_samples::*,
    utils::{default_timeout, entries, go_runner, skip_if_not_available},
};

// `go run` compiles before running; leave room for a cold build cache.
fn build_timeout() -> Duration {
    Duration::from_secs(60)
}

#[tokio::test]
async fn test_go_hello_world() {
    if skip_if_not_available(&["go"]) {
        return;
    }
    let dir = tempdir().unwrap();
    let runner = go_runner(dir.path(), build_timeout());

    let result = runner.execute_source(GO_HELLO).await;
    assert!(result.success, "unexpected failure: {}", result.error);
    assert!(result.output.contains("Hello, World!"));
    assert!(result.error.is_empty());
    assert_eq!(entries(dir.path()), 0);
}

#[tokio::test]
async fn test_go_fmt_output_is_trimmed() {
    if skip_if_not_available(&["go"]) {
        return;
    }
    let dir = tempdir().unwrap();
    let runner = go_runner(dir.path(), build_timeout());

    let result = runner.execute_source(GO_FMT_HELLO).await;
    assert!(result.success, "unexpected failure: {}", result.error);
    assert_eq!(result.output, "Hello from Go!");
}

#[tokio::test]
async fn test_go_invalid_code() {
    if skip_if_not_available(&["go"]) {
        return;
    }
    let dir = tempdir().unwrap();
    let runner = go_runner(dir.path(), build_timeout());

    let result = runner.execute_source(GO_INVALID).await;
    assert!(!result.success);
    assert!(!result.error.is_empty());
    assert_eq!(result.output, result.error.trim());
    assert_eq!(entries(dir.path()), 0);
}

#[tokio::test]
async fn test_go_compile_error_is_diagnostic() {
    if skip_if_not_available(&["go"]) {
        return;
    }
    let dir = tempdir().unwrap();
    let runner = go_runner(dir.path(), build_timeout());

    let result = runner.execute_source(GO_TYPE_ERROR).await;
    assert!(!result.success);
    assert!(result.error.contains("cannot use"));
}

#[tokio::test]
async fn test_go_panic_keeps_earlier_output() {
    if skip_if_not_available(&["go"]) {
        return;
    }
    let dir = tempdir().unwrap();
    let runner = go_runner(dir.path(), build_timeout());

    let result = runner.execute_source(GO_PANIC).await;
    assert!(!result.success);
    assert!(result.output.starts_with("before"));
    assert!(result.error.contains("panic: boom"));
}

#[tokio::test]
async fn test_go_sleep_times_out() {
    if skip_if_not_available(&["go"]) {
        return;
    }
    let dir = tempdir().unwrap();
    let runner = go_runner(dir.path(), default_timeout());

    let started = Instant::now();
    let result = runner.execute_source(GO_SLEEP).await;

    assert!(started.elapsed() < Duration::from_secs(10));
    assert!(!result.success);
    assert_eq!(result.error, "Execution timed out");
    assert_eq!(entries(dir.path()), 0);
}
