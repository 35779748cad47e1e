//! Conformity runner — external test execution and orchestration.
//!
//! Drives the external conformance test runner one test at a time,
//! captures pass/fail plus output, and folds passing tests into the
//! per-service summaries from `conformity-core`. Also generates the
//! configuration file the external runner reads.

pub mod conf;
pub mod error;
pub mod executor;
pub mod pipeline;
pub mod spec;

pub use conf::RunnerConfig;
pub use error::{Result, RunnerError};
pub use executor::{ExecutionOutcome, TestExecutor, DEFAULT_RUNNER_BINARY};
pub use pipeline::{CompliancePipeline, ComplianceRun};
pub use spec::ComplianceSpec;
