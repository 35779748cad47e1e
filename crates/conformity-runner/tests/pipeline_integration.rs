//! Integration tests for the compliance pipeline against real processes.

use conformity_core::{DescriptorTable, ReleaseTable};
use conformity_runner::{CompliancePipeline, RunnerError, TestExecutor};

fn tests(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

/// All tests pass when the runner exits zero for every invocation.
#[tokio::test]
async fn test_successful_run() {
    let dir = tempfile::tempdir().expect("tempdir");
    let log_path = dir.path().join("run.log");
    let executor = TestExecutor::new("echo");

    let run = CompliancePipeline::execute(&executor, &tests(&["test.a", "test.b"]), &log_path)
        .await
        .expect("pipeline failed");

    assert!(run.success(), "run should succeed");
    assert_eq!(run.passed_count(), 2, "both tests should pass");
    assert_eq!(run.failed_count(), 0, "no test should fail");
    assert_eq!(run.passed, vec!["test.a".to_string(), "test.b".to_string()]);
}

/// A failing test is recorded and the run continues to the next test.
#[tokio::test]
async fn test_failures_recorded_and_run_continues() {
    let dir = tempfile::tempdir().expect("tempdir");
    let log_path = dir.path().join("run.log");
    let executor = TestExecutor::new("false");

    let run = CompliancePipeline::execute(&executor, &tests(&["test.a", "test.b"]), &log_path)
        .await
        .expect("pipeline failed");

    assert!(!run.success(), "run should report failure");
    assert_eq!(run.failed_count(), 2, "both tests should fail");
    assert!(run.passed.is_empty());
}

/// The execution log accumulates output from every invocation.
#[tokio::test]
async fn test_log_accumulates_all_tests() {
    let dir = tempfile::tempdir().expect("tempdir");
    let log_path = dir.path().join("run.log");
    let executor = TestExecutor::new("echo");

    CompliancePipeline::execute(&executor, &tests(&["test.a", "test.b"]), &log_path)
        .await
        .expect("pipeline failed");

    let log = std::fs::read_to_string(&log_path).expect("read log");
    assert!(log.contains("test.a"));
    assert!(log.contains("test.b"));
}

/// A spawn failure aborts the run instead of being folded into results.
#[tokio::test]
async fn test_spawn_failure_aborts_run() {
    let dir = tempfile::tempdir().expect("tempdir");
    let log_path = dir.path().join("run.log");
    let executor = TestExecutor::new("/nonexistent-binary-that-does-not-exist");

    let result = CompliancePipeline::execute(&executor, &tests(&["test.a"]), &log_path).await;

    assert!(matches!(result, Err(RunnerError::Spawn { .. })));
}

/// End to end: execute, then fold passing tests into service summaries.
#[tokio::test]
async fn test_execute_then_summarize() {
    let dir = tempfile::tempdir().expect("tempdir");
    let log_path = dir.path().join("run.log");
    let executor = TestExecutor::new("echo");

    let descriptors = DescriptorTable::from_json_str(
        r#"{
            "test.a": {"service": "A", "feature": "1", "release": 0},
            "test.b": {"service": "B", "feature": "2", "release": 5}
        }"#,
    )
    .expect("valid descriptor JSON");
    let releases = ReleaseTable::openstack();

    let run = CompliancePipeline::execute(&executor, &tests(&["test.a", "test.b"]), &log_path)
        .await
        .expect("pipeline failed");
    let summaries = run.summarize(&descriptors, &releases);

    assert!(summaries["A"].features.contains(&"1".to_string()));
    assert!(summaries["B"].features.contains(&"2".to_string()));
    assert_eq!(summaries["B"].release_name, "Essex");
}
