//! External test execution.

use std::path::Path;
use std::process::Stdio;

use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, info};

use crate::error::{Result, RunnerError};

/// Default external runner binary.
pub const DEFAULT_RUNNER_BINARY: &str = "nosetests";

/// Outcome of one test invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionOutcome {
    /// Whether the process exited zero.
    pub success: bool,

    /// Combined stdout and stderr text.
    pub output: String,
}

/// Invokes named tests as external processes.
///
/// One blocking invocation per test name, no retries, no timeout: a single
/// invocation is authoritative, and a hanging runner blocks the whole
/// orchestration run. Callers needing bounded latency impose their own
/// timeout around [`TestExecutor::run`].
#[derive(Debug, Clone)]
pub struct TestExecutor {
    runner_binary: String,
}

impl Default for TestExecutor {
    fn default() -> Self {
        Self::new(DEFAULT_RUNNER_BINARY)
    }
}

impl TestExecutor {
    /// Create an executor using a specific runner binary.
    pub fn new(runner_binary: &str) -> Self {
        Self {
            runner_binary: runner_binary.to_string(),
        }
    }

    /// The runner binary this executor invokes.
    pub fn runner_binary(&self) -> &str {
        &self.runner_binary
    }

    /// Run a single named test, appending its combined output to `log_path`.
    ///
    /// Invokes `<runner> -v <test_name>` and waits for it to finish. A
    /// non-zero exit is converted to `ExecutionOutcome { success: false }`
    /// with the captured output; only spawn and log-write failures error.
    pub async fn run(&self, test_name: &str, log_path: &Path) -> Result<ExecutionOutcome> {
        debug!(test = %test_name, runner = %self.runner_binary, "invoking test runner");

        let output = Command::new(&self.runner_binary)
            .arg("-v")
            .arg(test_name)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|source| RunnerError::Spawn {
                test: test_name.to_string(),
                source,
            })?;

        let mut combined = String::from_utf8_lossy(&output.stdout).to_string();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        append_log(log_path, test_name, &combined).await?;

        let success = output.status.success();
        if success {
            debug!(test = %test_name, "test passed");
        } else {
            info!(test = %test_name, code = output.status.code().unwrap_or(-1), "test failed");
        }

        Ok(ExecutionOutcome {
            success,
            output: combined,
        })
    }
}

/// Append one test's output to the execution log.
async fn append_log(path: &Path, test_name: &str, output: &str) -> Result<()> {
    let log_err = |source| RunnerError::Log {
        path: path.to_path_buf(),
        source,
    };

    let mut file = tokio::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await
        .map_err(log_err)?;

    let entry = format!("===== {} =====\n{}\n", test_name, output);
    file.write_all(entry.as_bytes()).await.map_err(log_err)?;
    Ok(())
}
