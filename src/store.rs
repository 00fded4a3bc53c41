//! On-disk JSON layout of the project catalog.
//!
//! ```text
//! <root>/
//!   template-blog.json
//!   template-repo.json
//!   authors/<author-id>.json
//!   <product>/blogs/<id>.json
//!   <product>/repos/<id>.json
//! ```
//!
//! Writes merge into an existing file field by field (shallow, last write
//! wins). Nothing is locked or written atomically; concurrent invocations
//! targeting the same file may race.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

/// JSON object as read from and written to the store.
pub type JsonObject = Map<String, Value>;

/// Errors from reading templates or writing records.
#[derive(Debug, Error)]
pub enum StoreError {
    /// File system error.
    #[error("IO error at {path}: {source}")]
    Io {
        /// File or directory involved.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },

    /// File content is not valid JSON.
    #[error("invalid JSON in {path}: {source}")]
    Json {
        /// File that failed to parse.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// File holds JSON that is not an object.
    #[error("expected a JSON object in {path}\n  Suggestion: Replace the file content with an object, e.g. {{}}")]
    NotAnObject {
        /// Offending file.
        path: PathBuf,
    },

    /// A product name or id cannot be used as a single path segment.
    #[error("invalid {kind} '{value}': {reason}\n  Suggestion: Use a plain name without path separators")]
    InvalidSegment {
        /// `product` or `id`.
        kind: &'static str,
        /// Rejected value.
        value: String,
        /// Why it was rejected.
        reason: &'static str,
    },
}

impl StoreError {
    fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Per-product collection a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    /// Blog posts (Medium and generic pages).
    Blogs,
    /// Code repositories.
    Repos,
}

impl Collection {
    /// Directory name under the product directory.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Blogs => "blogs",
            Self::Repos => "repos",
        }
    }

    /// Template providing default fields for this collection.
    #[must_use]
    pub fn template_file(self) -> &'static str {
        match self {
            Self::Blogs => "template-blog.json",
            Self::Repos => "template-repo.json",
        }
    }
}

/// Root of the catalog configuration directory.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    root: PathBuf,
}

impl ConfigStore {
    /// Creates a store rooted at `root`. The directory is not required to exist
    /// until something is read or written.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Catalog root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding author records.
    #[must_use]
    pub fn authors_dir(&self) -> PathBuf {
        self.root.join("authors")
    }

    /// Loads the template for `collection`. Templates are read fresh on every call.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the template is missing, unreadable, or not an object.
    pub fn load_template(&self, collection: Collection) -> Result<JsonObject, StoreError> {
        let path = self.root.join(collection.template_file());
        let raw = fs::read_to_string(&path).map_err(|e| StoreError::io(&path, e))?;
        parse_object(&path, &raw)
    }

    /// Path of `<root>/<product>/<collection>/<id>.json`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidSegment`] when `product` or `id` is empty,
    /// `.`/`..`, or contains a path separator.
    pub fn record_path(
        &self,
        product: &str,
        collection: Collection,
        id: &str,
    ) -> Result<PathBuf, StoreError> {
        validate_segment("product", product)?;
        validate_segment("id", id)?;
        Ok(self
            .root
            .join(product)
            .join(collection.as_str())
            .join(format!("{id}.json")))
    }

    /// Path of `<root>/authors/<id>.json`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidSegment`] for ids unusable as a file name.
    pub fn author_path(&self, author_id: &str) -> Result<PathBuf, StoreError> {
        validate_segment("author id", author_id)?;
        Ok(self.authors_dir().join(format!("{author_id}.json")))
    }

    /// Reads a JSON object file; `Ok(None)` when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the file exists but cannot be read or parsed.
    pub fn read_object(&self, path: &Path) -> Result<Option<JsonObject>, StoreError> {
        match fs::read_to_string(path) {
            Ok(raw) => parse_object(path, &raw).map(Some),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(StoreError::io(path, error)),
        }
    }

    /// Writes `update` to `path`, merging it over any existing object.
    ///
    /// Existing keys absent from `update` are kept; keys present in both take
    /// the value from `update`. Parent directories are created as needed.
    /// Returns the object that was written.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the existing file is unreadable or invalid,
    /// or the write fails.
    pub fn write_or_update(
        &self,
        path: &Path,
        update: &JsonObject,
    ) -> Result<JsonObject, StoreError> {
        let merged = match self.read_object(path)? {
            Some(mut existing) => {
                debug!(path = %path.display(), "Merging into existing record");
                merge_shallow(&mut existing, update);
                existing
            }
            None => update.clone(),
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }

        let mut serialized = serde_json::to_string_pretty(&merged).map_err(|e| StoreError::Json {
            path: path.to_path_buf(),
            source: e,
        })?;
        serialized.push('\n');
        fs::write(path, serialized).map_err(|e| StoreError::io(path, e))?;
        debug!(path = %path.display(), fields = merged.len(), "Wrote record");
        Ok(merged)
    }
}

/// Overwrites keys of `base` with those of `layer`, appending new keys in order.
pub fn merge_shallow(base: &mut JsonObject, layer: &JsonObject) {
    for (key, value) in layer {
        base.insert(key.clone(), value.clone());
    }
}

fn parse_object(path: &Path, raw: &str) -> Result<JsonObject, StoreError> {
    let value: Value = serde_json::from_str(raw).map_err(|e| StoreError::Json {
        path: path.to_path_buf(),
        source: e,
    })?;
    match value {
        Value::Object(object) => Ok(object),
        _ => Err(StoreError::NotAnObject {
            path: path.to_path_buf(),
        }),
    }
}

fn validate_segment(kind: &'static str, value: &str) -> Result<(), StoreError> {
    let reason = if value.trim().is_empty() {
        Some("cannot be empty")
    } else if value == "." || value == ".." {
        Some("cannot be '.' or '..'")
    } else if value.contains(['/', '\\']) {
        Some("cannot contain path separators")
    } else if value.chars().any(char::is_control) {
        Some("cannot contain control characters")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(StoreError::InvalidSegment {
            kind,
            value: value.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}
