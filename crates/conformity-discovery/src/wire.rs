//! Wire documents exchanged with the identity, compute, and image services.
//!
//! Typed views of the provider JSON. Fields this tool never reads are not
//! modeled; `#[serde(default)]` covers the ones providers omit.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use conformity_core::{Flavor, Image};

/// Header carrying the authentication token on provider requests.
pub const AUTH_TOKEN_HEADER: &str = "X-Auth-Token";

/// One version entry in the identity discovery document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VersionEntry {
    /// Endpoint URL serving this API version.
    pub url: String,
}

/// Identity discovery document: version key (e.g. "v2.0", "v3.0") to entry.
pub type DiscoveryDocument = BTreeMap<String, VersionEntry>;

/// Token returned by the identity service, scoped or unscoped.
///
/// This is the caller-owned session value: it is returned to the caller
/// and threaded through subsequent calls, never cached by the clients.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Token {
    /// Opaque token id.
    pub id: String,

    /// Expiry, when the service reports one.
    #[serde(default)]
    pub expires: Option<DateTime<Utc>>,
}

/// A single endpoint of a catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Endpoint {
    #[serde(rename = "publicURL")]
    pub public_url: String,
}

/// One service catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Service type key, e.g. "compute".
    #[serde(rename = "type")]
    pub service_type: String,

    /// Endpoints serving this entry; only the first is used.
    #[serde(default)]
    pub endpoints: Vec<Endpoint>,
}

/// Body of a successful authentication response.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct AuthResponse {
    pub access: Access,
}

/// The `access` object of an authentication response.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Access {
    pub token: Token,

    #[serde(rename = "serviceCatalog", default)]
    pub service_catalog: Vec<CatalogEntry>,
}

/// A tenant visible to an authenticated identity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tenant {
    #[serde(default)]
    pub id: String,

    pub name: String,

    #[serde(default = "enabled_default")]
    pub enabled: bool,
}

fn enabled_default() -> bool {
    true
}

/// Tenant listing payload.
#[derive(Debug, Clone, Deserialize)]
pub struct TenantsResponse {
    pub tenants: Vec<Tenant>,
}

/// Flavor listing payload from the compute service.
#[derive(Debug, Clone, Deserialize)]
pub struct FlavorsResponse {
    pub flavors: Vec<Flavor>,
}

/// Image listing payload from the image service.
#[derive(Debug, Clone, Deserialize)]
pub struct ImagesResponse {
    pub images: Vec<Image>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_without_expiry() {
        let token: Token = serde_json::from_str(r#"{"id": "token"}"#).expect("deserialize");
        assert_eq!(token.id, "token");
        assert!(token.expires.is_none());
    }

    #[test]
    fn test_catalog_entry_without_endpoints() {
        let entry: CatalogEntry =
            serde_json::from_str(r#"{"type": "compute"}"#).expect("deserialize");
        assert_eq!(entry.service_type, "compute");
        assert!(entry.endpoints.is_empty());
    }

    #[test]
    fn test_tenant_enabled_defaults_to_true() {
        let tenant: Tenant = serde_json::from_str(r#"{"name": "demo"}"#).expect("deserialize");
        assert!(tenant.enabled);
        assert_eq!(tenant.id, "");
    }
}
