//! Conformity core — decision logic for cloud compliance reporting.
//!
//! Pure building blocks shared by the discovery, runner, and CLI crates:
//! release codename resolution, minimal resource selection, endpoint
//! version resolution, per-service result aggregation, and report
//! rendering. Network and process concerns live in the sibling crates.

pub mod endpoint;
pub mod error;
pub mod release;
pub mod report;
pub mod resources;
pub mod summary;
pub mod telemetry;

pub use endpoint::{resolve_endpoint, ResolvedEndpoint, DEFAULT_API_VERSION};
pub use error::{CoreError, Result};
pub use release::ReleaseTable;
pub use report::{render_report_md, write_report_md};
pub use resources::{smallest_flavor, smallest_image, Flavor, Image};
pub use summary::{service_summary, DescriptorTable, ServiceSummary, TestDescriptor};
pub use telemetry::init_tracing;
