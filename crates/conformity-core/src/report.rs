//! Rendering of the compliance summary artifact.
//!
//! The `service-name -> ServiceSummary` map is the canonical report; this
//! module renders it to markdown for humans and CI comments.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};

use crate::summary::ServiceSummary;

/// Render the per-service compliance summary as markdown.
pub fn render_report_md(summaries: &BTreeMap<String, ServiceSummary>) -> String {
    let mut out = String::new();
    out.push_str("# Compliance Summary\n\n");

    if summaries.is_empty() {
        out.push_str("No supported services detected.\n");
        return out;
    }

    for summary in summaries.values() {
        out.push_str(&format!("## {}\n", summary));
        if summary.release_name.is_empty() {
            out.push_str(&format!("- release marker: {} (unknown codename)\n", summary.release));
        } else {
            out.push_str(&format!("- release: {} ({})\n", summary.release_name, summary.release));
        }
        out.push_str("- features:\n");
        for feature in &summary.features {
            out.push_str(&format!("  - {}\n", feature));
        }
        out.push('\n');
    }

    out
}

/// Write the rendered report to `path`.
pub fn write_report_md(path: &Path, summaries: &BTreeMap<String, ServiceSummary>) -> Result<()> {
    let md = render_report_md(summaries);
    std::fs::write(path, md).with_context(|| format!("write {:?}", path))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::release::ReleaseTable;

    fn summaries_fixture() -> BTreeMap<String, ServiceSummary> {
        let releases = ReleaseTable::openstack();
        let mut nova = ServiceSummary::new("nova");
        nova.add_feature("server creation");
        nova.add_feature("keypair management");
        nova.set_release(5, &releases);

        let mut unknown = ServiceSummary::new("heat");
        unknown.add_feature("orchestration");
        unknown.set_release(42, &releases);

        let mut map = BTreeMap::new();
        map.insert("nova".to_string(), nova);
        map.insert("heat".to_string(), unknown);
        map
    }

    #[test]
    fn test_render_lists_services_and_features() {
        let md = render_report_md(&summaries_fixture());

        assert!(md.contains("## nova"));
        assert!(md.contains("- release: Essex (5)"));
        assert!(md.contains("  - server creation"));
        assert!(md.contains("  - keypair management"));
    }

    #[test]
    fn test_render_unknown_release_shows_marker() {
        let md = render_report_md(&summaries_fixture());
        assert!(md.contains("- release marker: 42 (unknown codename)"));
    }

    #[test]
    fn test_render_empty_summary() {
        let md = render_report_md(&BTreeMap::new());
        assert!(md.contains("No supported services detected."));
    }

    #[test]
    fn test_write_report_md() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("report.md");

        write_report_md(&path, &summaries_fixture()).expect("write report");

        let written = std::fs::read_to_string(&path).expect("read report");
        assert!(written.starts_with("# Compliance Summary"));
    }
}
