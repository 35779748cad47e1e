//! Error types for test execution and orchestration.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by the runner crate.
///
/// A test that runs and exits non-zero is not an error — that outcome is
/// a value. Only failures to start the process or to write artifacts
/// surface here.
#[derive(Debug, Error)]
pub enum RunnerError {
    /// The runner process could not be started.
    #[error("failed to spawn test runner for '{test}': {source}")]
    Spawn {
        test: String,
        #[source]
        source: std::io::Error,
    },

    /// The execution log could not be written.
    #[error("failed to write log {path:?}: {source}")]
    Log {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The runner configuration artifact could not be written.
    #[error("failed to write runner configuration {path:?}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for runner operations.
pub type Result<T> = std::result::Result<T, RunnerError>;
