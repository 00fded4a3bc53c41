//! Shared User-Agent string for outbound metadata requests.

/// Project URL for User-Agent identification (good citizenship; RFC 9308).
const PROJECT_UA_URL: &str = "https://github.com/fierce/addproject";

/// Default User-Agent for GitHub API and page scrape requests.
///
/// GitHub rejects API calls without a User-Agent, so every request carries this.
#[must_use]
pub(crate) fn default_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("addproject/{version} (catalog-tool; +{PROJECT_UA_URL})")
}
