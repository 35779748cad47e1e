//! Thin compute service client.
//!
//! Pass-through boundary call: list flavors so the selection logic in
//! `conformity-core` can pick the smallest one.

use tracing::debug;

use conformity_core::{resolve_endpoint, Flavor};

use crate::error::Result;
use crate::wire::{FlavorsResponse, AUTH_TOKEN_HEADER};

/// Client for the compute service's flavor listing.
pub struct ComputeClient {
    http: reqwest::Client,
    base_url: String,
    version: u32,
    token: String,
}

impl ComputeClient {
    /// Build a client from a catalog URL, deriving the API version and the
    /// version-stripped base from the URL itself.
    pub fn from_catalog_url(url: &str, token: &str) -> Self {
        let resolved = resolve_endpoint(url);
        Self {
            http: crate::http_client(),
            base_url: resolved.base_url,
            version: resolved.version,
            token: token.to_string(),
        }
    }

    /// API major version derived from the catalog URL.
    pub fn version(&self) -> u32 {
        self.version
    }

    /// Version-stripped base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// List all flavors visible to the token.
    pub async fn list_flavors(&self) -> Result<Vec<Flavor>> {
        let url = format!("{}/v{}/flavors/detail", self.base_url, self.version);
        let response = self
            .http
            .get(&url)
            .header(AUTH_TOKEN_HEADER, &self.token)
            .send()
            .await?
            .error_for_status()?;
        let listing: FlavorsResponse = response.json().await?;

        debug!(count = listing.flavors.len(), "flavors listed");
        Ok(listing.flavors)
    }
}
