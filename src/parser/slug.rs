//! Project id derivation for generic blog URLs.

use url::Url;

use super::error::ParseError;

/// Derives a slug from the URL path.
///
/// Each `/`-delimited segment is cut at its first `.` (dropping extensions
/// such as `.html`), empty segments are skipped, and the rest are joined
/// with `-`. The result may be empty for root URLs.
///
/// # Errors
///
/// Returns [`ParseError::InvalidUrl`] when the URL cannot be parsed.
///
/// # Examples
///
/// ```
/// use addproject_core::parser::derive_slug;
///
/// let slug = derive_slug("https://example.com/2021/my-post.html").unwrap();
/// assert_eq!(slug, "2021-my-post");
/// ```
pub fn derive_slug(url: &str) -> Result<String, ParseError> {
    let parsed = Url::parse(url).map_err(|e| ParseError::malformed(url, &e.to_string()))?;
    Ok(slug_from_path(parsed.path()))
}

fn slug_from_path(path: &str) -> String {
    path.split('/')
        .map(|segment| segment.split('.').next().unwrap_or_default())
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_slug_strips_extension() {
        assert_eq!(
            derive_slug("https://example.com/2021/my-post.html").unwrap(),
            "2021-my-post"
        );
    }

    #[test]
    fn test_derive_slug_ignores_trailing_slash_and_query() {
        assert_eq!(
            derive_slug("https://blog.example.com/posts/intro/?utm=x#top").unwrap(),
            "posts-intro"
        );
    }

    #[test]
    fn test_derive_slug_segment_with_multiple_dots_keeps_first_part() {
        assert_eq!(slug_from_path("/notes/v1.2.3/readme.md"), "notes-v1-readme");
    }

    #[test]
    fn test_derive_slug_dot_leading_segment_dropped() {
        assert_eq!(slug_from_path("/.well-known/post"), "post");
    }

    #[test]
    fn test_derive_slug_root_url_is_empty() {
        assert_eq!(derive_slug("https://example.com/").unwrap(), "");
        assert_eq!(derive_slug("https://example.com").unwrap(), "");
    }

    #[test]
    fn test_derive_slug_malformed_url_fails() {
        let err = derive_slug("not a url").unwrap_err();
        assert!(matches!(err, ParseError::InvalidUrl { .. }));
    }
}
