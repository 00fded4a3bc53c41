//! Error types for project URL parsing.

use thiserror::Error;

/// Errors that can occur while extracting identifiers from a project URL.
#[derive(Debug, Clone, Error)]
pub enum ParseError {
    /// URL does not match the shape its classified source requires
    #[error("invalid {kind} URL '{url}': {reason}\n  Suggestion: {suggestion}")]
    InvalidUrl {
        /// Source kind the URL was classified as
        kind: &'static str,
        /// The URL that failed to parse
        url: String,
        /// Why the URL is invalid
        reason: String,
        /// How to fix the issue
        suggestion: String,
    },

    /// URL parsed but yielded no usable identifier
    #[error("could not derive a project id from '{url}': {reason}\n  Suggestion: {suggestion}")]
    NoIdentifier {
        /// The URL that produced no identifier
        url: String,
        /// Why no identifier could be derived
        reason: String,
        /// How to fix the issue
        suggestion: String,
    },
}

impl ParseError {
    /// Creates an `InvalidUrl` error for a GitHub URL lacking `owner/repo`.
    #[must_use]
    pub fn invalid_github(url: &str) -> Self {
        Self::InvalidUrl {
            kind: "GitHub",
            url: url.to_string(),
            reason: "expected github.com/<owner>/<repo>".to_string(),
            suggestion: "Use the repository's main page URL, e.g. https://github.com/owner/repo"
                .to_string(),
        }
    }

    /// Creates an `InvalidUrl` error for a URL the `url` crate rejects.
    #[must_use]
    pub fn malformed(url: &str, parse_error: &str) -> Self {
        Self::InvalidUrl {
            kind: "blog",
            url: url.to_string(),
            reason: parse_error.to_string(),
            suggestion: "Check the URL format and try again".to_string(),
        }
    }

    /// Creates a `NoIdentifier` error for a Medium URL matching no known shape.
    #[must_use]
    pub fn unparseable_medium(url: &str) -> Self {
        Self::NoIdentifier {
            url: url.to_string(),
            reason: "URL matches neither medium.com/<author>/<slug> nor <author>.medium.com/<slug>"
                .to_string(),
            suggestion: "Pass an explicit id as the third argument".to_string(),
        }
    }

    /// Creates a `NoIdentifier` error for a URL whose path yields an empty slug.
    #[must_use]
    pub fn empty_slug(url: &str) -> Self {
        Self::NoIdentifier {
            url: url.to_string(),
            reason: "URL path has no usable segments".to_string(),
            suggestion: "Pass an explicit id as the third argument".to_string(),
        }
    }
}
