//! Minimal compute resource selection.
//!
//! Picks the smallest usable flavor and bootable image from candidate
//! lists supplied by the provider. Candidates are read-only inputs; the
//! selectors never mutate or rank beyond the documented keys.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Disk format required of a bootable candidate image.
pub const BOOTABLE_DISK_FORMAT: &str = "qcow2";

/// Status required of a candidate image.
pub const ACTIVE_STATUS: &str = "active";

/// A compute flavor as listed by the provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Flavor {
    /// Virtual CPU count. Listed but never compared during selection.
    pub vcpus: u64,

    /// Root disk size in gigabytes.
    pub disk: u64,

    /// Memory in megabytes.
    pub ram: u64,
}

/// An image as listed by the provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Image {
    /// Image size in bytes.
    pub size: u64,

    /// Disk format tag, e.g. "qcow2".
    pub disk_format: String,

    /// Lifecycle status, e.g. "active".
    pub status: String,
}

/// Select the smallest flavor by `(disk, ram)` lexicographic order.
///
/// Disk is the primary key and ram the tie-break; vcpus is not compared.
/// The first minimal element wins remaining ties.
pub fn smallest_flavor(flavors: &[Flavor]) -> Result<Flavor> {
    flavors
        .iter()
        .min_by_key(|flavor| (flavor.disk, flavor.ram))
        .cloned()
        .ok_or(CoreError::EmptyFlavorList)
}

/// Select the smallest active qcow2 image by size.
///
/// Images with the wrong disk format or a non-active status are ignored
/// entirely; if nothing survives the filter the selection fails.
pub fn smallest_image(images: &[Image]) -> Result<Image> {
    images
        .iter()
        .filter(|image| image.disk_format == BOOTABLE_DISK_FORMAT && image.status == ACTIVE_STATUS)
        .min_by_key(|image| image.size)
        .cloned()
        .ok_or(CoreError::NoBootableImage)
}
