//! Remote metadata lookups used during ingestion.
//!
//! All network access goes through the [`MetadataSource`] trait so the
//! ingestion routines can run against the live services, a mock server, or
//! an in-memory fake.
//!
//! # Architecture
//!
//! - [`MetadataSource`] - Async trait the ingestion routines call
//! - [`HttpMetadataSource`] - `reqwest` implementation over GitHub, Medium and arbitrary pages
//! - [`MetadataEndpoints`] - Base URLs, credential and timeouts for the HTTP implementation

mod error;
mod github;
mod html;
mod http_client;
mod medium;
mod opengraph;

pub use error::MetadataError;
pub use github::{DEFAULT_GITHUB_API_URL, GithubApi, GithubUser};
pub use html::{document_title, link_href, meta_content};
pub use http_client::{
    DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_READ_TIMEOUT_SECS, HttpTimeouts, build_http_client,
};
pub use medium::{
    DEFAULT_MEDIUM_URL, MediumProfile, extract_post_author, handle_from_profile_url,
    parse_medium_profile,
};
pub use opengraph::{OpenGraph, parse_open_graph};

use async_trait::async_trait;
use reqwest::Client;

/// Source of remote metadata for projects and authors.
#[async_trait]
pub trait MetadataSource: Send + Sync {
    /// Path of the repository's readme file.
    async fn repo_readme(&self, owner: &str, repo: &str) -> Result<String, MetadataError>;

    /// GitHub account profile; `None` when the login does not exist.
    async fn github_user(&self, login: &str) -> Result<Option<GithubUser>, MetadataError>;

    /// Open Graph fields of an arbitrary page.
    async fn open_graph(&self, url: &str) -> Result<OpenGraph, MetadataError>;

    /// Writer handle of a Medium post; `None` when the page does not name one.
    async fn medium_post_author(&self, post_url: &str) -> Result<Option<String>, MetadataError>;

    /// Medium profile for a handle; `None` when the profile does not exist.
    async fn medium_profile(&self, handle: &str) -> Result<Option<MediumProfile>, MetadataError>;
}

/// Endpoints, credential and timeouts for [`HttpMetadataSource`].
#[derive(Clone)]
pub struct MetadataEndpoints {
    /// GitHub REST API base URL.
    pub github_api_url: String,
    /// Optional GitHub token sent as `Authorization: token <value>`.
    pub github_token: Option<String>,
    /// Medium site base URL for profile pages.
    pub medium_url: String,
    /// Client timeouts.
    pub timeouts: HttpTimeouts,
}

impl Default for MetadataEndpoints {
    fn default() -> Self {
        Self {
            github_api_url: DEFAULT_GITHUB_API_URL.to_string(),
            github_token: None,
            medium_url: DEFAULT_MEDIUM_URL.to_string(),
            timeouts: HttpTimeouts::default(),
        }
    }
}

impl std::fmt::Debug for MetadataEndpoints {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetadataEndpoints")
            .field("github_api_url", &self.github_api_url)
            .field("github_token", &self.github_token.as_ref().map(|_| "<redacted>"))
            .field("medium_url", &self.medium_url)
            .field("timeouts", &self.timeouts)
            .finish()
    }
}

/// [`MetadataSource`] backed by live HTTP requests.
#[derive(Debug)]
pub struct HttpMetadataSource {
    client: Client,
    github: GithubApi,
    medium_url: String,
}

impl HttpMetadataSource {
    /// Builds the HTTP client and endpoint handles.
    ///
    /// # Errors
    ///
    /// Returns [`MetadataError::ClientBuild`] when client construction fails.
    pub fn new(endpoints: &MetadataEndpoints) -> Result<Self, MetadataError> {
        let client = build_http_client(endpoints.timeouts)?;
        Ok(Self {
            client,
            github: GithubApi::new(
                endpoints.github_api_url.clone(),
                endpoints.github_token.clone(),
            ),
            medium_url: endpoints.medium_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl MetadataSource for HttpMetadataSource {
    async fn repo_readme(&self, owner: &str, repo: &str) -> Result<String, MetadataError> {
        self.github.readme_path(&self.client, owner, repo).await
    }

    async fn github_user(&self, login: &str) -> Result<Option<GithubUser>, MetadataError> {
        self.github.user(&self.client, login).await
    }

    async fn open_graph(&self, url: &str) -> Result<OpenGraph, MetadataError> {
        opengraph::fetch_open_graph(&self.client, url).await
    }

    async fn medium_post_author(&self, post_url: &str) -> Result<Option<String>, MetadataError> {
        medium::fetch_post_author(&self.client, post_url).await
    }

    async fn medium_profile(&self, handle: &str) -> Result<Option<MediumProfile>, MetadataError> {
        medium::fetch_profile(&self.client, &self.medium_url, handle).await
    }
}
