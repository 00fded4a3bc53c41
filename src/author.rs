//! Author registry: `<root>/authors/<id>.json`.
//!
//! Project records reference authors by normalized id. Creation is
//! best-effort: lookups may fail or decline (organizations, missing
//! profiles), so callers re-check existence afterwards instead of trusting
//! the creation result. That re-check is advisory; nothing prevents another
//! process from changing the directory in between.

use std::path::PathBuf;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::metadata::{GithubUser, MediumProfile, MetadataError, MetadataSource};
use crate::store::{ConfigStore, JsonObject, StoreError};

/// Errors from author creation.
#[derive(Debug, Error)]
pub enum AuthorError {
    /// Profile lookup failed.
    #[error("author lookup failed: {0}")]
    Metadata(#[from] MetadataError),

    /// Author record could not be written.
    #[error("author record write failed: {0}")]
    Store(#[from] StoreError),

    /// Author record could not be serialized.
    #[error("author record serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result of an author creation attempt that did not error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorOutcome {
    /// Record written at the given path.
    Created(PathBuf),
    /// Nothing written.
    Skipped(&'static str),
}

/// Author record as persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorRecord {
    /// Display name (falls back to the handle).
    pub name: String,
    /// Short bio.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    /// Avatar URL.
    #[serde(rename = "photoURL", skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    /// GitHub profile URL.
    #[serde(rename = "githubURL", skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
    /// Medium profile URL.
    #[serde(rename = "mediumURL", skip_serializing_if = "Option::is_none")]
    pub medium_url: Option<String>,
}

impl AuthorRecord {
    /// Builds a record from a GitHub user profile.
    #[must_use]
    pub fn from_github(user: &GithubUser) -> Self {
        Self {
            name: non_empty(user.name.as_deref()).unwrap_or_else(|| user.login.clone()),
            bio: non_empty(user.bio.as_deref()),
            photo_url: user.avatar_url.clone(),
            github_url: Some(
                user.html_url
                    .clone()
                    .unwrap_or_else(|| format!("https://github.com/{}", user.login)),
            ),
            medium_url: None,
        }
    }

    /// Builds a record from a Medium profile.
    #[must_use]
    pub fn from_medium(profile: &MediumProfile) -> Self {
        Self {
            name: non_empty(profile.name.as_deref()).unwrap_or_else(|| profile.handle.clone()),
            bio: non_empty(profile.bio.as_deref()),
            photo_url: profile.image.clone(),
            github_url: None,
            medium_url: Some(profile.url.clone()),
        }
    }

    fn to_object(&self) -> Result<JsonObject, serde_json::Error> {
        match serde_json::to_value(self)? {
            Value::Object(object) => Ok(object),
            _ => Ok(JsonObject::new()),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Normalizes a raw handle into an author id: trimmed, one leading `@`
/// removed, lowercased.
///
/// ```
/// use addproject_core::author::normalize_author_id;
///
/// assert_eq!(normalize_author_id(" @JaneDoe "), "janedoe");
/// ```
#[must_use]
pub fn normalize_author_id(raw: &str) -> String {
    let trimmed = raw.trim();
    trimmed
        .strip_prefix('@')
        .unwrap_or(trimmed)
        .to_lowercase()
}

/// Author records stored under the catalog root.
#[derive(Debug, Clone)]
pub struct AuthorRegistry {
    store: ConfigStore,
}

impl AuthorRegistry {
    /// Creates a registry over `store`.
    #[must_use]
    pub fn new(store: ConfigStore) -> Self {
        Self { store }
    }

    /// Returns true when a record exists for the normalized form of `handle`.
    /// Handles unusable as file names never exist.
    #[must_use]
    pub fn exists(&self, handle: &str) -> bool {
        self.store
            .author_path(&normalize_author_id(handle))
            .is_ok_and(|path| path.is_file())
    }

    /// Creates an author record from a GitHub profile.
    ///
    /// Organizations and unknown logins are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`AuthorError`] when the lookup or the write fails.
    #[tracing::instrument(skip(self, source))]
    pub async fn add_github_author(
        &self,
        source: &dyn MetadataSource,
        handle: &str,
    ) -> Result<AuthorOutcome, AuthorError> {
        let Some(user) = source.github_user(handle).await? else {
            return Ok(AuthorOutcome::Skipped("GitHub user not found"));
        };
        if user.is_organization() {
            info!(login = %user.login, "Skipping GitHub organization; not added as an author");
            return Ok(AuthorOutcome::Skipped("GitHub account is an organization"));
        }
        self.write(handle, &AuthorRecord::from_github(&user))
    }

    /// Creates an author record from a Medium profile.
    ///
    /// # Errors
    ///
    /// Returns [`AuthorError`] when the lookup or the write fails.
    #[tracing::instrument(skip(self, source))]
    pub async fn add_medium_author(
        &self,
        source: &dyn MetadataSource,
        handle: &str,
    ) -> Result<AuthorOutcome, AuthorError> {
        let Some(profile) = source.medium_profile(handle).await? else {
            return Ok(AuthorOutcome::Skipped("Medium profile not found"));
        };
        self.write(handle, &AuthorRecord::from_medium(&profile))
    }

    /// Makes sure a GitHub author exists: check, create if absent, check again.
    ///
    /// Returns whether the author exists after the attempt. Creation errors
    /// are logged, not returned.
    pub async fn ensure_github_author(&self, source: &dyn MetadataSource, handle: &str) -> bool {
        if !self.exists(handle) {
            match self.add_github_author(source, handle).await {
                Ok(outcome) => debug!(handle, ?outcome, "GitHub author creation finished"),
                Err(error) => warn!(handle, error = %error, "Could not add GitHub author"),
            }
        }
        self.exists(handle)
    }

    /// Makes sure a Medium author exists: check, create if absent, check again.
    ///
    /// Returns whether the author exists after the attempt.
    pub async fn ensure_medium_author(&self, source: &dyn MetadataSource, handle: &str) -> bool {
        if !self.exists(handle) {
            match self.add_medium_author(source, handle).await {
                Ok(outcome) => debug!(handle, ?outcome, "Medium author creation finished"),
                Err(error) => warn!(handle, error = %error, "Could not add Medium author"),
            }
        }
        self.exists(handle)
    }

    fn write(&self, handle: &str, record: &AuthorRecord) -> Result<AuthorOutcome, AuthorError> {
        let author_id = normalize_author_id(handle);
        let path = self.store.author_path(&author_id)?;
        self.store.write_or_update(&path, &record.to_object()?)?;
        info!(author_id = %author_id, path = %path.display(), "Added author");
        Ok(AuthorOutcome::Created(path))
    }
}
