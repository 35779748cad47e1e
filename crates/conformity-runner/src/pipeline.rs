//! Sequential compliance pipeline.

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use conformity_core::{service_summary, DescriptorTable, ReleaseTable, ServiceSummary};

use crate::error::Result;
use crate::executor::TestExecutor;

/// Result of one complete compliance run.
#[derive(Debug, Clone, Serialize)]
pub struct ComplianceRun {
    /// Run id.
    pub run_id: Uuid,

    /// When execution started.
    pub started_at: DateTime<Utc>,

    /// Identifiers of tests that passed, in execution order.
    pub passed: Vec<String>,

    /// Identifiers of tests that failed, in execution order.
    pub failed: Vec<String>,

    /// Total wall-clock duration in milliseconds.
    pub duration_ms: u64,
}

impl ComplianceRun {
    /// Number of tests that passed.
    pub fn passed_count(&self) -> usize {
        self.passed.len()
    }

    /// Number of tests that failed.
    pub fn failed_count(&self) -> usize {
        self.failed.len()
    }

    /// Whether every executed test passed.
    pub fn success(&self) -> bool {
        self.failed.is_empty()
    }

    /// Fold the passing tests into per-service compliance summaries.
    pub fn summarize(
        &self,
        descriptors: &DescriptorTable,
        releases: &ReleaseTable,
    ) -> BTreeMap<String, ServiceSummary> {
        service_summary(&self.passed, descriptors, releases)
    }
}

/// Sequential test orchestration.
///
/// One blocking invocation per test, awaited one at a time; input order is
/// preserved into the aggregation's last-write-wins release semantics.
pub struct CompliancePipeline;

impl CompliancePipeline {
    /// Execute every named test and collect the outcome.
    ///
    /// A test that exits non-zero is recorded in `failed` and the run
    /// continues; only spawn and log-write failures abort the run.
    pub async fn execute(
        executor: &TestExecutor,
        tests: &[String],
        log_path: &Path,
    ) -> Result<ComplianceRun> {
        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        let start = Instant::now();

        info!(run_id = %run_id, tests = tests.len(), "starting compliance run");

        let mut passed = Vec::new();
        let mut failed = Vec::new();

        for test_name in tests {
            info!(test = %test_name, "executing test");
            let outcome = executor.run(test_name, log_path).await?;
            if outcome.success {
                passed.push(test_name.clone());
            } else {
                failed.push(test_name.clone());
            }
        }

        let duration_ms = start.elapsed().as_millis() as u64;
        info!(
            run_id = %run_id,
            passed = passed.len(),
            failed = failed.len(),
            duration_ms,
            "compliance run finished"
        );

        Ok(ComplianceRun {
            run_id,
            started_at,
            passed,
            failed,
            duration_ms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_fixture(passed: &[&str], failed: &[&str]) -> ComplianceRun {
        ComplianceRun {
            run_id: Uuid::nil(),
            started_at: DateTime::parse_from_rfc3339("2026-08-06T00:00:00Z")
                .expect("parse RFC3339")
                .with_timezone(&Utc),
            passed: passed.iter().map(|t| t.to_string()).collect(),
            failed: failed.iter().map(|t| t.to_string()).collect(),
            duration_ms: 100,
        }
    }

    #[test]
    fn test_run_counts() {
        let run = run_fixture(&["test.a", "test.b"], &["test.c"]);

        assert_eq!(run.passed_count(), 2);
        assert_eq!(run.failed_count(), 1);
        assert!(!run.success());
    }

    #[test]
    fn test_run_success_with_no_failures() {
        let run = run_fixture(&["test.a"], &[]);
        assert!(run.success());
    }

    #[test]
    fn test_summarize_uses_only_passing_tests() {
        let descriptors = DescriptorTable::from_json_str(
            r#"{
                "test.a": {"service": "A", "feature": "1", "release": 0},
                "test.b": {"service": "B", "feature": "2", "release": 5}
            }"#,
        )
        .expect("valid descriptor JSON");
        let releases = ReleaseTable::openstack();

        let run = run_fixture(&["test.a"], &["test.b"]);
        let summaries = run.summarize(&descriptors, &releases);

        assert!(summaries.contains_key("A"));
        assert!(!summaries.contains_key("B"));
    }
}
