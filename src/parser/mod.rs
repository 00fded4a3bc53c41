//! Project URL classification and identifier extraction.
//!
//! A project URL is routed to one of three ingestion paths by plain
//! substring checks, then each path pulls its identifiers out of the URL:
//!
//! - GitHub repositories: `owner` and `repo` ([`parse_github_url`])
//! - Medium posts: author hint and slug ([`parse_medium_url`])
//! - Anything else: a slug built from the URL path ([`derive_slug`])
//!
//! # Example
//!
//! ```
//! use addproject_core::parser::{classify_url, SourceKind};
//!
//! assert_eq!(classify_url("https://github.com/acme/widgets"), SourceKind::Github);
//! assert_eq!(classify_url("https://jdoe.medium.com/post-1"), SourceKind::Medium);
//! assert_eq!(classify_url("https://example.com/post"), SourceKind::Other);
//! ```

mod error;
mod github;
mod medium;
mod slug;

pub use error::ParseError;
pub use github::{GithubRepo, parse_github_url};
pub use medium::{MediumUrlParts, parse_medium_url};
pub use slug::derive_slug;

use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Compiles a regex at static init; panics on invalid pattern.
pub(crate) fn compile_static_regex(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid static regex '{pattern}': {e}"))
}

/// Source kind of a project, as written to the record's `source` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Code repository on github.com
    Github,
    /// Post on medium.com or a Medium subdomain
    Medium,
    /// Any other web page
    Other,
}

impl SourceKind {
    /// Returns the stable string label used in records.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Github => "github",
            Self::Medium => "medium",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Picks the ingestion path for a URL.
///
/// `github.com` wins over `medium.com` when both appear. The URL is not
/// validated here; malformed input fails later in the selected path.
#[must_use]
pub fn classify_url(url: &str) -> SourceKind {
    if url.contains("github.com") {
        SourceKind::Github
    } else if url.contains("medium.com") {
        SourceKind::Medium
    } else {
        SourceKind::Other
    }
}
