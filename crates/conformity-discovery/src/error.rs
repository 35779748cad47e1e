//! Error types for service discovery.

use thiserror::Error;

/// Errors produced by the discovery layer.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// Credentials were rejected by the identity service.
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// The identity endpoint offers no usable API version.
    #[error("identity endpoint offers neither v2.0 nor v3.0")]
    UnsupportedVersion,

    /// HTTP transport or decoding failure.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// A response did not match the expected document shape.
    #[error("malformed response: {0}")]
    Malformed(String),

    /// The service answered with an unexpected status code.
    #[error("unexpected response status: {0}")]
    UnexpectedStatus(u16),
}

/// Result type for discovery operations.
pub type Result<T> = std::result::Result<T, DiscoveryError>;
