//! Error types for the conformity core.

use thiserror::Error;

/// Errors produced by the core decision logic.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Flavor selection was called with an empty candidate list.
    #[error("no flavors available for selection")]
    EmptyFlavorList,

    /// No image satisfied the bootable-image filters.
    #[error("no active qcow2 image available for selection")]
    NoBootableImage,

    /// A data table could not be parsed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
