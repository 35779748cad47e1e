//! Identity service discovery and authentication.
//!
//! One client per identity endpoint. Tokens are returned to the caller and
//! threaded through subsequent calls; nothing here holds session state
//! beyond the lifetime of a single call.

use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::error::{DiscoveryError, Result};
use crate::wire::{
    AuthResponse, CatalogEntry, DiscoveryDocument, Tenant, TenantsResponse, Token,
    AUTH_TOKEN_HEADER,
};

/// Identity API versions this tool can drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiVersion {
    V2,
    V3,
}

impl ApiVersion {
    /// The major version number.
    pub fn major(&self) -> u32 {
        match self {
            ApiVersion::V2 => 2,
            ApiVersion::V3 => 3,
        }
    }
}

/// Client for one identity service endpoint.
pub struct IdentityClient {
    http: reqwest::Client,
    endpoint: String,
}

impl IdentityClient {
    /// Create a client for the given identity endpoint URL.
    pub fn new(endpoint: &str) -> Self {
        Self {
            http: crate::http_client(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
        }
    }

    /// The endpoint this client talks to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Probe the endpoint's discovery document and select an API version.
    ///
    /// A "v3.0" entry is preferred when offered, otherwise "v2.0". An
    /// endpoint offering neither is unusable.
    pub async fn discover(&self) -> Result<ApiVersion> {
        let raw = self.http.get(&self.endpoint).send().await?.text().await?;
        let document: DiscoveryDocument = serde_json::from_str(&raw)
            .map_err(|err| DiscoveryError::Malformed(err.to_string()))?;

        let version = select_api_version(&document).ok_or(DiscoveryError::UnsupportedVersion)?;
        info!(endpoint = %self.endpoint, version = version.major(), "identity API version selected");
        Ok(version)
    }

    /// Authenticate with username and password and list visible tenants.
    ///
    /// Returns the tenants alongside the unscoped token.
    pub async fn get_tenants(&self, username: &str, password: &str) -> Result<(Vec<Tenant>, Token)> {
        let body = serde_json::json!({
            "auth": {
                "passwordCredentials": {
                    "username": username,
                    "password": password,
                }
            }
        });
        let auth = self.authenticate(&body).await?;
        let token = auth.access.token;

        let url = format!("{}/tenants", self.endpoint);
        let response = self
            .http
            .get(&url)
            .header(AUTH_TOKEN_HEADER, &token.id)
            .send()
            .await?;
        let response = check_auth_status(response).await?;
        let listing: TenantsResponse = response.json().await?;

        debug!(count = listing.tenants.len(), "tenants listed");
        Ok((listing.tenants, token))
    }

    /// Exchange an unscoped token and tenant name for a scoped token and
    /// the flattened service catalog.
    pub async fn get_services(
        &self,
        tenant_name: &str,
        token_id: &str,
    ) -> Result<(BTreeMap<String, String>, Token)> {
        let body = serde_json::json!({
            "auth": {
                "tenantName": tenant_name,
                "token": { "id": token_id },
            }
        });
        let auth = self.authenticate(&body).await?;
        let services = catalog_to_services(&auth.access.service_catalog);

        info!(tenant = %tenant_name, services = services.len(), "service catalog retrieved");
        Ok((services, auth.access.token))
    }

    async fn authenticate(&self, body: &serde_json::Value) -> Result<AuthResponse> {
        let url = format!("{}/tokens", self.endpoint);
        let response = self.http.post(&url).json(body).send().await?;
        let response = check_auth_status(response).await?;
        Ok(response.json().await?)
    }
}

/// Map authentication-relevant status codes before reading a body.
async fn check_auth_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        let detail = response.text().await.unwrap_or_default();
        return Err(DiscoveryError::Authentication(detail));
    }
    if !status.is_success() {
        return Err(DiscoveryError::UnexpectedStatus(status.as_u16()));
    }
    Ok(response)
}

/// Select the API version from a discovery document, preferring v3.
pub fn select_api_version(document: &DiscoveryDocument) -> Option<ApiVersion> {
    if document.contains_key("v3.0") {
        Some(ApiVersion::V3)
    } else if document.contains_key("v2.0") {
        Some(ApiVersion::V2)
    } else {
        None
    }
}

/// Flatten a service catalog into a service-type to public-URL map.
///
/// Only the first endpoint of each entry is used. Entries without
/// endpoints are skipped; duplicate service types resolve last-entry-wins.
pub fn catalog_to_services(entries: &[CatalogEntry]) -> BTreeMap<String, String> {
    let mut services = BTreeMap::new();
    for entry in entries {
        let Some(endpoint) = entry.endpoints.first() else {
            debug!(service = %entry.service_type, "catalog entry has no endpoints, skipping");
            continue;
        };
        services.insert(entry.service_type.clone(), endpoint.public_url.clone());
    }
    services
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::Endpoint;

    fn entry(service_type: &str, urls: &[&str]) -> CatalogEntry {
        CatalogEntry {
            service_type: service_type.to_string(),
            endpoints: urls
                .iter()
                .map(|url| Endpoint {
                    public_url: url.to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_select_prefers_v3() {
        let document: DiscoveryDocument = serde_json::from_str(
            r#"{
                "v3.0": {"url": "http://127.0.0.1:5000/v3"},
                "v2.0": {"url": "http://127.0.0.1:5000/v2"}
            }"#,
        )
        .expect("deserialize");

        assert_eq!(select_api_version(&document), Some(ApiVersion::V3));
    }

    #[test]
    fn test_select_falls_back_to_v2() {
        let document: DiscoveryDocument =
            serde_json::from_str(r#"{"v2.0": {"url": "http://127.0.0.1:5000/v2"}}"#)
                .expect("deserialize");

        assert_eq!(select_api_version(&document), Some(ApiVersion::V2));
    }

    #[test]
    fn test_select_rejects_unknown_versions() {
        let document: DiscoveryDocument =
            serde_json::from_str(r#"{"v1.0": {"url": "http://127.0.0.1:5000/v1"}}"#)
                .expect("deserialize");

        assert_eq!(select_api_version(&document), None);
    }

    #[test]
    fn test_catalog_takes_first_endpoint() {
        let services = catalog_to_services(&[entry("compute", &["first", "second"])]);
        assert_eq!(services["compute"], "first");
    }

    #[test]
    fn test_catalog_skips_entries_without_endpoints() {
        let services = catalog_to_services(&[entry("compute", &[]), entry("image", &["url"])]);
        assert_eq!(services.len(), 1);
        assert_eq!(services["image"], "url");
    }

    #[test]
    fn test_catalog_duplicate_type_last_wins() {
        let services =
            catalog_to_services(&[entry("compute", &["old"]), entry("compute", &["new"])]);
        assert_eq!(services["compute"], "new");
    }

    #[test]
    fn test_api_version_major() {
        assert_eq!(ApiVersion::V2.major(), 2);
        assert_eq!(ApiVersion::V3.major(), 3);
    }
}
