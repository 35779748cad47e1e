//! Thin image service client.

use tracing::debug;

use conformity_core::{resolve_endpoint, Image};

use crate::error::Result;
use crate::wire::{ImagesResponse, AUTH_TOKEN_HEADER};

/// Client for the image service's image listing.
pub struct ImageClient {
    http: reqwest::Client,
    base_url: String,
    version: u32,
    token: String,
}

impl ImageClient {
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

    /// List all images visible to the token.
    pub async fn list_images(&self) -> Result<Vec<Image>> {
        // v1 needs the /detail form to include size and status.
        let url = if self.version >= 2 {
            format!("{}/v{}/images", self.base_url, self.version)
        } else {
            format!("{}/v{}/images/detail", self.base_url, self.version)
        };
        let response = self
            .http
            .get(&url)
            .header(AUTH_TOKEN_HEADER, &self.token)
            .send()
            .await?
            .error_for_status()?;
        let listing: ImagesResponse = response.json().await?;

        debug!(count = listing.images.len(), "images listed");
        Ok(listing.images)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_versioned_catalog_url() {
        let client = ImageClient::from_catalog_url("http://image.example:5000/v2", "token");
        assert_eq!(client.version(), 2);
        assert_eq!(client.base_url(), "http://image.example:5000");
    }

    #[test]
    fn test_v1_catalog_url() {
        let client = ImageClient::from_catalog_url("http://image.example:35357/v1", "token");
        assert_eq!(client.version(), 1);
        assert_eq!(client.base_url(), "http://image.example:35357");
    }

    #[test]
    fn test_unrecognized_segment_stripped() {
        let client = ImageClient::from_catalog_url("http://image.example/wrong", "token");
        assert_eq!(client.version(), 1);
        assert_eq!(client.base_url(), "http://image.example");
    }
}
