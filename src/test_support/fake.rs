//! In-memory [`MetadataSource`] for routine-level tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::metadata::{GithubUser, MediumProfile, MetadataError, MetadataSource, OpenGraph};

#[derive(Debug, Default)]
pub struct FakeMetadata {
    offline: bool,
    readme: Option<String>,
    github_users: HashMap<String, GithubUser>,
    open_graph: Option<OpenGraph>,
    post_author: Option<String>,
    medium_profiles: HashMap<String, MediumProfile>,
    calls: AtomicUsize,
}

impl FakeMetadata {
    /// Every lookup fails as if the network were unreachable.
    pub fn offline() -> Self {
        Self {
            offline: true,
            ..Self::default()
        }
    }

    pub fn with_readme(mut self, path: &str) -> Self {
        self.readme = Some(path.to_string());
        self
    }

    pub fn with_github_user(mut self, user: GithubUser) -> Self {
        self.github_users.insert(user.login.to_lowercase(), user);
        self
    }

    pub fn with_open_graph(mut self, graph: OpenGraph) -> Self {
        self.open_graph = Some(graph);
        self
    }

    pub fn with_post_author(mut self, handle: &str) -> Self {
        self.post_author = Some(handle.to_string());
        self
    }

    pub fn with_medium_profile(mut self, profile: MediumProfile) -> Self {
        self.medium_profiles.insert(profile.handle.clone(), profile);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn enter(&self, target: &str) -> Result<(), MetadataError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.offline {
            Err(MetadataError::unexpected(target, "network unreachable"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl MetadataSource for FakeMetadata {
    async fn repo_readme(&self, owner: &str, repo: &str) -> Result<String, MetadataError> {
        let target = format!("repos/{owner}/{repo}/readme");
        self.enter(&target)?;
        self.readme
            .clone()
            .ok_or_else(|| MetadataError::http_status(&target, 404))
    }

    async fn github_user(&self, login: &str) -> Result<Option<GithubUser>, MetadataError> {
        self.enter(login)?;
        Ok(self.github_users.get(&login.to_lowercase()).cloned())
    }

    async fn open_graph(&self, url: &str) -> Result<OpenGraph, MetadataError> {
        self.enter(url)?;
        self.open_graph
            .clone()
            .ok_or_else(|| MetadataError::unexpected(url, "page has no Open Graph metadata"))
    }

    async fn medium_post_author(&self, post_url: &str) -> Result<Option<String>, MetadataError> {
        self.enter(post_url)?;
        Ok(self.post_author.clone())
    }

    async fn medium_profile(&self, handle: &str) -> Result<Option<MediumProfile>, MetadataError> {
        self.enter(handle)?;
        Ok(self
            .medium_profiles
            .get(handle.trim_start_matches('@'))
            .cloned())
    }
}
