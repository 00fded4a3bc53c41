//! Medium post author resolution and profile scraping.
//!
//! The author segment of a Medium URL is not the writer for publication
//! URLs (`medium.com/<publication>/<slug>`), so the writer is read from the
//! post page's `rel="author"` link instead.
//!
//! Known limitation: posts on custom domains or aggregator publications
//! (e.g. `proandroiddev.com`) link the author somewhere other than a Medium
//! profile, and resolution returns nothing for them.

use reqwest::Client;
use tracing::debug;
use url::Url;

use super::MetadataError;
use super::html::{fetch_html, link_href, meta_content};

/// Default Medium site URL used to build profile links.
pub const DEFAULT_MEDIUM_URL: &str = "https://medium.com";

/// Subdomains of medium.com that never name a writer.
const NON_AUTHOR_SUBDOMAINS: [&str; 4] = ["www", "cdn", "miro", "help"];

/// Public Medium profile fields scraped from `https://medium.com/@<handle>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediumProfile {
    /// Handle without the leading `@`.
    pub handle: String,
    /// Display name.
    pub name: Option<String>,
    /// Short bio.
    pub bio: Option<String>,
    /// Avatar image URL.
    pub image: Option<String>,
    /// Profile page URL.
    pub url: String,
}

/// Extracts the writer's handle from a Medium profile URL.
///
/// Accepts `https://medium.com/@handle[/...]` and `https://handle.medium.com`.
#[must_use]
pub fn handle_from_profile_url(profile_url: &str) -> Option<String> {
    let parsed = Url::parse(profile_url).ok()?;
    let host = parsed.host_str()?.to_ascii_lowercase();

    if host == "medium.com" || host == "www.medium.com" {
        return parsed
            .path_segments()?
            .next()
            .and_then(|segment| segment.strip_prefix('@'))
            .filter(|handle| !handle.is_empty())
            .map(str::to_string);
    }

    let subdomain = host.strip_suffix(".medium.com")?;
    if subdomain.is_empty() || subdomain.contains('.') || NON_AUTHOR_SUBDOMAINS.contains(&subdomain)
    {
        return None;
    }
    Some(subdomain.to_string())
}

/// Reads the writer's handle from a post page: `<link rel="author">` first,
/// then `<meta property="article:author">`.
#[must_use]
pub fn extract_post_author(html: &str) -> Option<String> {
    link_href(html, "author")
        .and_then(|href| handle_from_profile_url(&href))
        .or_else(|| {
            meta_content(html, "article:author").and_then(|href| handle_from_profile_url(&href))
        })
}

/// Builds a profile from a Medium profile page.
#[must_use]
pub fn parse_medium_profile(handle: &str, profile_url: &str, html: &str) -> MediumProfile {
    MediumProfile {
        handle: handle.to_string(),
        name: meta_content(html, "og:title").map(|title| strip_site_suffix(&title)),
        bio: meta_content(html, "og:description").or_else(|| meta_content(html, "description")),
        image: meta_content(html, "og:image"),
        url: profile_url.to_string(),
    }
}

/// Profile titles look like `Jane Doe – Medium`.
fn strip_site_suffix(title: &str) -> String {
    for suffix in [" – Medium", " - Medium", " — Medium"] {
        if let Some(stripped) = title.strip_suffix(suffix) {
            return stripped.trim().to_string();
        }
    }
    title.to_string()
}

/// Fetches a post page and resolves its writer's handle.
///
/// # Errors
///
/// Returns [`MetadataError`] when the page cannot be fetched.
#[tracing::instrument(skip(client), fields(url = %post_url))]
pub async fn fetch_post_author(
    client: &Client,
    post_url: &str,
) -> Result<Option<String>, MetadataError> {
    let html = fetch_html(client, post_url).await?;
    let author = extract_post_author(&html);
    debug!(author = ?author, "Resolved Medium post author");
    Ok(author)
}

/// Fetches `<medium_url>/@<handle>`. `Ok(None)` when the profile does not exist.
///
/// # Errors
///
/// Returns [`MetadataError`] on network failure or non-404 error status.
#[tracing::instrument(skip(client, medium_url))]
pub async fn fetch_profile(
    client: &Client,
    medium_url: &str,
    handle: &str,
) -> Result<Option<MediumProfile>, MetadataError> {
    let handle = handle.trim_start_matches('@');
    let profile_url = format!(
        "{}/@{}",
        medium_url.trim_end_matches('/'),
        urlencoding::encode(handle)
    );
    match fetch_html(client, &profile_url).await {
        Ok(html) => Ok(Some(parse_medium_profile(handle, &profile_url, &html))),
        Err(error) if error.status() == Some(404) => Ok(None),
        Err(error) => Err(error),
    }
}
