//! Platform release resolution.
//!
//! Maps integer release markers to human-readable codenames. The table is
//! an injected value rather than a hard-coded constant so the aggregation
//! logic stays testable against arbitrary tables; `openstack()` provides
//! the known platform series as a convenient default.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Lookup table mapping integer release markers to codenames.
///
/// Absence of a marker is not an error: a table that lags behind the
/// deployed platform resolves to an empty codename instead of aborting
/// the report.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct ReleaseTable {
    names: BTreeMap<u32, String>,
}

impl ReleaseTable {
    /// Create a table from an existing marker-to-codename map.
    pub fn new(names: BTreeMap<u32, String>) -> Self {
        Self { names }
    }

    /// The known platform release series.
    pub fn openstack() -> Self {
        let names = [
            (1, "Austin"),
            (2, "Bexar"),
            (3, "Cactus"),
            (4, "Diablo"),
            (5, "Essex"),
            (6, "Folsom"),
            (7, "Grizzly"),
            (8, "Havana"),
        ]
        .into_iter()
        .map(|(marker, name)| (marker, name.to_string()))
        .collect();

        Self { names }
    }

    /// Parse a table from a JSON object of marker keys to codename values.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let names: BTreeMap<u32, String> = serde_json::from_str(raw)?;
        Ok(Self { names })
    }

    /// Resolve a release marker to its codename.
    ///
    /// Exact key lookup only; a marker absent from the table yields the
    /// empty string.
    pub fn resolve(&self, marker: u32) -> String {
        self.names.get(&marker).cloned().unwrap_or_default()
    }
}

impl FromIterator<(u32, String)> for ReleaseTable {
    fn from_iter<I: IntoIterator<Item = (u32, String)>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_marker() {
        let table = ReleaseTable::openstack();
        assert_eq!(table.resolve(5), "Essex");
        assert_eq!(table.resolve(8), "Havana");
    }

    #[test]
    fn test_resolve_unknown_marker_is_empty() {
        let table = ReleaseTable::openstack();
        assert_eq!(table.resolve(999), "");
        assert_eq!(table.resolve(0), "");
    }

    #[test]
    fn test_resolve_against_injected_table() {
        let table: ReleaseTable = [(5u32, "Essex".to_string())].into_iter().collect();
        assert_eq!(table.resolve(5), "Essex");
        assert_eq!(table.resolve(4), "");
    }

    #[test]
    fn test_from_json_str() {
        let table = ReleaseTable::from_json_str(r#"{"5": "Essex", "6": "Folsom"}"#)
            .expect("valid table JSON");
        assert_eq!(table.resolve(6), "Folsom");
    }

    #[test]
    fn test_from_json_str_rejects_non_numeric_keys() {
        assert!(ReleaseTable::from_json_str(r#"{"essex": "5"}"#).is_err());
    }
}
