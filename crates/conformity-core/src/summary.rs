//! Per-service compliance summaries and result aggregation.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::release::ReleaseTable;

/// Descriptor of a single conformance test: the service and feature it
/// exercises and the release marker at which the feature appeared.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TestDescriptor {
    /// Service the test exercises, e.g. "nova".
    pub service: String,

    /// Human-readable feature tag.
    pub feature: String,

    /// Release marker at which a passing test implies support.
    pub release: u32,
}

/// Lookup table mapping test identifiers to descriptors.
///
/// Supplied by the surrounding system and treated as immutable; the
/// `builtin()` table covers the known conformance suite.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DescriptorTable {
    tests: BTreeMap<String, TestDescriptor>,
}

impl DescriptorTable {
    /// Create a table from an existing map.
    pub fn new(tests: BTreeMap<String, TestDescriptor>) -> Self {
        Self { tests }
    }

    /// Descriptors for the known conformance suite.
    pub fn builtin() -> Self {
        let entries = [
            ("tempest.api.identity.test_tenants", "keystone", "tenant management", 4),
            ("tempest.api.identity.test_tokens", "keystone", "token authentication", 4),
            ("tempest.api.compute.flavors.test_flavors", "nova", "flavor listing", 4),
            ("tempest.api.compute.servers.test_create_server", "nova", "server creation", 4),
            ("tempest.api.compute.servers.test_server_actions", "nova", "server actions", 5),
            ("tempest.api.compute.keypairs.test_keypairs", "nova", "keypair management", 5),
            ("tempest.api.compute.test_quotas", "nova", "quota reporting", 6),
            ("tempest.api.image.test_images", "glance", "image registry", 4),
            ("tempest.api.image.test_image_members", "glance", "image sharing", 6),
            ("tempest.api.volume.test_volumes_list", "cinder", "volume listing", 6),
            ("tempest.api.volume.test_volumes_actions", "cinder", "volume actions", 7),
            ("tempest.api.object_storage.test_container_services", "swift", "container storage", 4),
            ("tempest.api.object_storage.test_object_expiry", "swift", "object expiry", 6),
            ("tempest.api.network.test_networks", "quantum", "network management", 7),
        ];

        let tests = entries
            .into_iter()
            .map(|(id, service, feature, release)| {
                (
                    id.to_string(),
                    TestDescriptor {
                        service: service.to_string(),
                        feature: feature.to_string(),
                        release,
                    },
                )
            })
            .collect();

        Self { tests }
    }

    /// Parse a table from a JSON object of test-id keys.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let tests: BTreeMap<String, TestDescriptor> = serde_json::from_str(raw)?;
        Ok(Self { tests })
    }

    /// Look up the descriptor for a test identifier.
    pub fn get(&self, test_id: &str) -> Option<&TestDescriptor> {
        self.tests.get(test_id)
    }

    /// All known test identifiers, in table order.
    pub fn test_ids(&self) -> impl Iterator<Item = &str> {
        self.tests.keys().map(String::as_str)
    }

    /// Number of known tests.
    pub fn len(&self) -> usize {
        self.tests.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }
}

/// Accumulated compliance summary for one service.
///
/// Created on the first passing test attributed to the service and folded
/// incrementally as further results arrive. Lives only for the duration of
/// an aggregation run.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ServiceSummary {
    /// Service name; the canonical display identity.
    pub name: String,

    /// Unique feature tags in insertion order.
    pub features: Vec<String>,

    /// Most recently observed release marker.
    pub release: u32,

    /// Codename for `release`, recomputed on every update.
    pub release_name: String,
}

impl ServiceSummary {
    /// Create an empty summary for a service.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            features: Vec::new(),
            release: 0,
            release_name: String::new(),
        }
    }

    /// Record a supported feature. Duplicates are silently ignored;
    /// insertion order of first occurrences is preserved.
    pub fn add_feature(&mut self, feature: &str) {
        if !self.features.iter().any(|known| known == feature) {
            self.features.push(feature.to_string());
        }
    }

    /// Record a release marker and recompute the codename.
    ///
    /// Overwrites unconditionally: across an aggregation run the last test
    /// folded in for a service determines the reported release. A
    /// minimum-across-features policy would change only this method.
    pub fn set_release(&mut self, marker: u32, releases: &ReleaseTable) {
        self.release = marker;
        self.release_name = releases.resolve(marker);
    }
}

impl fmt::Display for ServiceSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Aggregate passing test identifiers into per-service summaries.
///
/// Identifiers absent from the descriptor table contribute nothing — a
/// passing test may belong to a suite this tool does not track. For each
/// matched descriptor the service summary is created on demand, the
/// feature recorded, and the release marker folded in last-write-wins in
/// input order.
pub fn service_summary(
    passing: &[String],
    descriptors: &DescriptorTable,
    releases: &ReleaseTable,
) -> BTreeMap<String, ServiceSummary> {
    let mut summaries: BTreeMap<String, ServiceSummary> = BTreeMap::new();

    for test_id in passing {
        let Some(descriptor) = descriptors.get(test_id) else {
            debug!(test = %test_id, "passing test has no descriptor, skipping");
            continue;
        };

        let summary = summaries
            .entry(descriptor.service.clone())
            .or_insert_with(|| ServiceSummary::new(&descriptor.service));
        summary.add_feature(&descriptor.feature);
        summary.set_release(descriptor.release, releases);
    }

    summaries
}
