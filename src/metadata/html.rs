//! Minimal HTML head inspection: `<meta>`, `<link>` and `<title>` tags.
//!
//! Pages are matched with regexes rather than parsed; attribute order and
//! quote style vary between sites, so attributes are collected per tag and
//! looked up by name.

use std::sync::LazyLock;

use regex::Regex;
use reqwest::Client;
use tracing::debug;

use crate::parser::compile_static_regex;

use super::MetadataError;

// Tag bodies skip over quoted values so a `>` inside an attribute does not end the tag.
static META_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile_static_regex(r#"(?is)<meta\b((?:[^>"']|"[^"]*"|'[^']*')*)>"#)
});
static LINK_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile_static_regex(r#"(?is)<link\b((?:[^>"']|"[^"]*"|'[^']*')*)>"#)
});
// Double-quoted, single-quoted or unquoted values.
static ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile_static_regex(r#"(?s)([\w:\-]+)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+))"#)
});
static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_static_regex(r"(?is)<title[^>]*>(.*?)</title>"));

/// Fetches a page body as text.
///
/// # Errors
///
/// Returns [`MetadataError`] on network failure or non-success status.
pub(crate) async fn fetch_html(client: &Client, url: &str) -> Result<String, MetadataError> {
    debug!(url, "Fetching page");
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| MetadataError::network(url, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(MetadataError::http_status(url, status.as_u16()));
    }

    response
        .text()
        .await
        .map_err(|e| MetadataError::network(url, e))
}

/// Returns the `content` of the first `<meta>` whose `property` or `name`
/// equals `key` (ASCII case-insensitive). Entities are decoded and blank
/// values are treated as missing.
#[must_use]
pub fn meta_content(html: &str, key: &str) -> Option<String> {
    META_TAG_RE.captures_iter(html).find_map(|caps| {
        let attrs = parse_attributes(&caps[1]);
        let matches_key = attrs.iter().any(|(name, value)| {
            (name == "property" || name == "name") && value.eq_ignore_ascii_case(key)
        });
        if !matches_key {
            return None;
        }
        attribute(&attrs, "content").and_then(clean_value)
    })
}

/// Returns the `href` of the first `<link>` whose `rel` list contains `rel`.
#[must_use]
pub fn link_href(html: &str, rel: &str) -> Option<String> {
    LINK_TAG_RE.captures_iter(html).find_map(|caps| {
        let attrs = parse_attributes(&caps[1]);
        let has_rel = attribute(&attrs, "rel")
            .is_some_and(|value| value.split_whitespace().any(|t| t.eq_ignore_ascii_case(rel)));
        if !has_rel {
            return None;
        }
        attribute(&attrs, "href").and_then(clean_value)
    })
}

/// Returns the text of the document `<title>`.
#[must_use]
pub fn document_title(html: &str) -> Option<String> {
    TITLE_RE
        .captures(html)
        .and_then(|caps| caps.get(1))
        .and_then(|m| clean_value(m.as_str()))
}

fn parse_attributes(tag_body: &str) -> Vec<(String, String)> {
    ATTR_RE
        .captures_iter(tag_body)
        .map(|caps| {
            let name = caps[1].to_ascii_lowercase();
            let value = caps
                .get(2)
                .or_else(|| caps.get(3))
                .or_else(|| caps.get(4))
                .map(|m| m.as_str().to_string())
                .unwrap_or_default();
            (name, value)
        })
        .collect()
}

fn attribute<'a>(attrs: &'a [(String, String)], name: &str) -> Option<&'a str> {
    attrs
        .iter()
        .find(|(attr_name, _)| attr_name == name)
        .map(|(_, value)| value.as_str())
}

fn clean_value(raw: &str) -> Option<String> {
    let decoded = html_escape::decode_html_entities(raw);
    let collapsed = decoded.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        None
    } else {
        Some(collapsed)
    }
}
