//! Conformity discovery — identity, compute, and image service clients.
//!
//! Everything here is a boundary call against the deployment under test:
//! version probing, token exchange, catalog flattening, tenant listing,
//! and the flavor/image listings the resource selectors consume. The
//! decision logic itself lives in `conformity-core`.

pub mod compute;
pub mod error;
pub mod identity;
pub mod image;
pub mod wire;

pub use compute::ComputeClient;
pub use error::{DiscoveryError, Result};
pub use identity::{catalog_to_services, select_api_version, ApiVersion, IdentityClient};
pub use image::ImageClient;
pub use wire::{CatalogEntry, Endpoint, Tenant, Token};

/// Shared HTTP client construction for the service clients.
pub(crate) fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent(concat!("conformity/", env!("CARGO_PKG_VERSION")))
        .build()
        .expect("Failed to create HTTP client")
}
