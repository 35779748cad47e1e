//! Compliance run identity.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Identity of one compliance run: where it pointed and what it ran.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ComplianceSpec {
    /// Identity endpoint the run authenticated against.
    pub identity_endpoint: String,

    /// Tenant the run was scoped to.
    pub tenant_name: String,

    /// SHA-256 digest of the ordered test list (deterministic).
    pub tests_digest: String,
}

impl ComplianceSpec {
    /// Create a run specification from the target and its test list.
    pub fn new(identity_endpoint: &str, tenant_name: &str, tests: &[String]) -> Self {
        Self {
            identity_endpoint: identity_endpoint.to_string(),
            tenant_name: tenant_name.to_string(),
            tests_digest: compute_tests_digest(tests),
        }
    }
}

/// Compute a deterministic, order-sensitive digest of the test list.
fn compute_tests_digest(tests: &[String]) -> String {
    let mut hasher = Sha256::new();
    for test in tests {
        hasher.update(test.as_bytes());
        hasher.update(b"\0");
    }
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_new() {
        let tests = vec!["test.a".to_string(), "test.b".to_string()];
        let spec = ComplianceSpec::new("http://127.0.0.1:5000", "demo", &tests);

        assert_eq!(spec.identity_endpoint, "http://127.0.0.1:5000");
        assert_eq!(spec.tenant_name, "demo");
        assert!(!spec.tests_digest.is_empty());
    }

    #[test]
    fn test_tests_digest_deterministic() {
        let tests = vec!["test.a".to_string(), "test.b".to_string()];

        let first = compute_tests_digest(&tests);
        let second = compute_tests_digest(&tests);

        assert_eq!(first, second);
    }

    #[test]
    fn test_tests_digest_order_sensitive() {
        let forward = vec!["test.a".to_string(), "test.b".to_string()];
        let backward = vec!["test.b".to_string(), "test.a".to_string()];

        assert_ne!(
            compute_tests_digest(&forward),
            compute_tests_digest(&backward)
        );
    }

    #[test]
    fn test_spec_serde_roundtrip() {
        let spec = ComplianceSpec::new("http://127.0.0.1:5000", "demo", &["t".to_string()]);
        let json = serde_json::to_string(&spec).expect("serialize");
        let back: ComplianceSpec = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(spec, back);
    }
}
