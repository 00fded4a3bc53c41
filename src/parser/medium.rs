//! Medium post URL parsing.

use std::sync::LazyLock;

use regex::Regex;

use super::compile_static_regex;

// https://medium.com/<author>/<slug>
static MEDIUM_PATH_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_static_regex(r"medium\.com/([\w\-@.]+)/([\w\-]+)"));

// https://<author>.medium.com/<slug>
static MEDIUM_SUBDOMAIN_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_static_regex(r"([\w\-@.]+)\.medium\.com/([\w\-]+)"));

/// Author and slug segments of a Medium post URL. Both are absent when the
/// URL matches no known shape.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediumUrlParts {
    /// Author handle or publication name as it appears in the URL.
    pub author: Option<String>,
    /// Post slug, usually ending in a hex post id.
    pub slug: Option<String>,
}

/// Splits a Medium URL into author and slug.
///
/// Path-style URLs are tried before subdomain-style ones. The author segment
/// is only a hint: publications put their own name there, so the real writer
/// is resolved separately from the post page.
#[must_use]
pub fn parse_medium_url(url: &str) -> MediumUrlParts {
    MEDIUM_PATH_RE
        .captures(url)
        .or_else(|| MEDIUM_SUBDOMAIN_RE.captures(url))
        .map(|caps| MediumUrlParts {
            author: Some(caps[1].to_string()),
            slug: Some(caps[2].to_string()),
        })
        .unwrap_or_default()
}
