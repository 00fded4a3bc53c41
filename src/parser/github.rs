//! GitHub repository URL parsing.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::compile_static_regex;
use super::error::ParseError;

static GITHUB_REPO_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_static_regex(r"github\.com/([\w\-]+)/([\w\-]+)"));

/// Owner and repository name extracted from a GitHub URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GithubRepo {
    /// Account or organization login.
    pub owner: String,
    /// Repository name.
    pub repo: String,
}

impl GithubRepo {
    /// Default project id for the repository: `<owner>-<repo>`.
    #[must_use]
    pub fn default_id(&self) -> String {
        format!("{}-{}", self.owner, self.repo)
    }
}

/// Extracts `owner` and `repo` from `github.com/<owner>/<repo>`.
///
/// Only word characters and hyphens are captured, so a `.git` suffix or a
/// trailing path (`/tree/main`) is ignored.
///
/// # Errors
///
/// Returns [`ParseError::InvalidUrl`] when the pattern does not match.
pub fn parse_github_url(url: &str) -> Result<GithubRepo, ParseError> {
    let caps = GITHUB_REPO_RE
        .captures(url)
        .ok_or_else(|| ParseError::invalid_github(url))?;
    let repo = GithubRepo {
        owner: caps[1].to_string(),
        repo: caps[2].to_string(),
    };
    debug!(owner = %repo.owner, repo = %repo.repo, "Parsed GitHub URL");
    Ok(repo)
}
