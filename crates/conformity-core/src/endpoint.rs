//! Endpoint version resolution for catalog URLs.
//!
//! Typed service clients need an API major version and a version-stripped
//! base URL, but catalog entries are free-form: some carry a `/v2`-style
//! suffix, some carry an unrelated trailing segment, some carry nothing.
//! Resolution therefore has exactly two branches — a recognized version
//! suffix, or the version-1 default — and never fails.

/// API major version assumed when the URL carries no recognizable suffix.
pub const DEFAULT_API_VERSION: u32 = 1;

/// A catalog URL resolved into an API major version and base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEndpoint {
    /// API major version derived from the URL, or the default.
    pub version: u32,

    /// The URL with its trailing path segment removed.
    pub base_url: String,
}

/// Resolve a service endpoint URL into `(version, base_url)`.
///
/// The final path segment is inspected: `v` followed by a leading digit
/// (e.g. "v2", "v2.0", "v3") yields that digit as the version. Any other
/// segment — malformed or missing a version marker — falls back to
/// [`DEFAULT_API_VERSION`], with the segment stripped either way. A URL
/// with no path segments is returned unchanged at the default version.
pub fn resolve_endpoint(url: &str) -> ResolvedEndpoint {
    let trimmed = url.trim_end_matches('/');

    // Path segments begin after the scheme/authority part, if present.
    let authority_end = trimmed.find("://").map(|idx| idx + 3).unwrap_or(0);
    let Some(last_slash) = trimmed[authority_end..].rfind('/') else {
        return ResolvedEndpoint {
            version: DEFAULT_API_VERSION,
            base_url: trimmed.to_string(),
        };
    };

    let split_at = authority_end + last_slash;
    let segment = &trimmed[split_at + 1..];
    let base_url = trimmed[..split_at].to_string();

    match version_suffix(segment) {
        Some(version) => ResolvedEndpoint { version, base_url },
        None => ResolvedEndpoint {
            version: DEFAULT_API_VERSION,
            base_url,
        },
    }
}

/// The leading digit of a `v<digit>...` segment, if the segment has one.
fn version_suffix(segment: &str) -> Option<u32> {
    segment.strip_prefix('v')?.chars().next()?.to_digit(10)
}
