//! GitHub REST API lookups: repository readme and user profile.

use reqwest::Client;
use reqwest::RequestBuilder;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde::Deserialize;
use tracing::debug;

use super::MetadataError;

/// Default GitHub REST API base URL.
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";

const GITHUB_ACCEPT: &str = "application/vnd.github+json";

/// Public profile of a GitHub account, as returned by `GET /users/{login}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GithubUser {
    /// Account login (handle).
    pub login: String,
    /// Display name, if set.
    pub name: Option<String>,
    /// Profile bio, if set.
    pub bio: Option<String>,
    /// Avatar image URL.
    pub avatar_url: Option<String>,
    /// Profile page URL.
    pub html_url: Option<String>,
    /// `User` or `Organization`.
    #[serde(rename = "type")]
    pub account_type: Option<String>,
}

impl GithubUser {
    /// Returns true for organization accounts.
    #[must_use]
    pub fn is_organization(&self) -> bool {
        self.account_type
            .as_deref()
            .is_some_and(|t| t.eq_ignore_ascii_case("organization"))
    }
}

#[derive(Debug, Deserialize)]
struct ReadmeResponse {
    path: Option<String>,
}

/// GitHub API endpoint plus optional credential.
#[derive(Clone)]
pub struct GithubApi {
    base_url: String,
    token: Option<String>,
}

impl GithubApi {
    /// Creates an API handle. Blank tokens are ignored.
    #[must_use]
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.trim().is_empty()),
        }
    }

    /// Returns true when requests carry an `Authorization` header.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    fn request(&self, client: &Client, url: &str) -> RequestBuilder {
        let builder = client.get(url).header(ACCEPT, GITHUB_ACCEPT);
        match &self.token {
            Some(token) => builder.header(AUTHORIZATION, format!("token {token}")),
            None => builder,
        }
    }

    /// Looks up the path of the repository's readme file (e.g. `README.md`).
    ///
    /// # Errors
    ///
    /// Returns [`MetadataError`] on network failure, non-success status, or a
    /// response without a `path`.
    #[tracing::instrument(skip(self, client), fields(authenticated = self.is_authenticated()))]
    pub async fn readme_path(
        &self,
        client: &Client,
        owner: &str,
        repo: &str,
    ) -> Result<String, MetadataError> {
        let url = format!(
            "{}/repos/{}/{}/readme",
            self.base_url,
            urlencoding::encode(owner),
            urlencoding::encode(repo)
        );
        debug!(api_url = %url, "Calling GitHub readme API");

        let response = self
            .request(client, &url)
            .send()
            .await
            .map_err(|e| MetadataError::network(&url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(MetadataError::http_status(&url, status.as_u16()));
        }

        let body = response
            .json::<ReadmeResponse>()
            .await
            .map_err(|_| MetadataError::unexpected(&url, "unexpected readme response format"))?;

        body.path
            .filter(|p| !p.is_empty())
            .ok_or_else(|| MetadataError::unexpected(&url, "readme response has no path"))
    }

    /// Fetches a user or organization profile. `Ok(None)` when the login does
    /// not exist.
    ///
    /// # Errors
    ///
    /// Returns [`MetadataError`] on network failure, non-success status other
    /// than 404, or malformed JSON.
    #[tracing::instrument(skip(self, client), fields(authenticated = self.is_authenticated()))]
    pub async fn user(
        &self,
        client: &Client,
        login: &str,
    ) -> Result<Option<GithubUser>, MetadataError> {
        let url = format!("{}/users/{}", self.base_url, urlencoding::encode(login));
        debug!(api_url = %url, "Calling GitHub users API");

        let response = self
            .request(client, &url)
            .send()
            .await
            .map_err(|e| MetadataError::network(&url, e))?;

        let status = response.status();
        if status.as_u16() == 404 {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(MetadataError::http_status(&url, status.as_u16()));
        }

        response
            .json::<GithubUser>()
            .await
            .map(Some)
            .map_err(|_| MetadataError::unexpected(&url, "unexpected user response format"))
    }
}

impl std::fmt::Debug for GithubApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GithubApi")
            .field("base_url", &self.base_url)
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}
