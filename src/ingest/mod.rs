//! Project ingestion: URL in, JSON record on disk.
//!
//! Each routine follows the same pipeline:
//!
//! 1. Pull identifiers out of the URL and settle the record id. Failures
//!    here are fatal and happen before any network call or write.
//! 2. Start from the collection template and set the computed fields.
//! 3. Query remote metadata. Failures are logged and the template values
//!    stay in place.
//! 4. Apply caller overrides, then merge the record into the file on disk.

mod blog;
mod repo;

use std::path::PathBuf;

use thiserror::Error;
use tracing::info;

use crate::author::AuthorRegistry;
use crate::metadata::MetadataSource;
use crate::parser::{ParseError, SourceKind, classify_url};
use crate::record::ProjectRecord;
use crate::store::{ConfigStore, JsonObject, StoreError};

/// Fatal ingestion errors. Metadata failures never surface here.
#[derive(Debug, Error)]
pub enum IngestError {
    /// URL unusable for its source kind.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Template or record file could not be read or written.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result of a successful ingestion.
#[derive(Debug, Clone, PartialEq)]
pub struct IngestOutcome {
    /// Source kind the URL was routed to.
    pub kind: SourceKind,
    /// Record identifier.
    pub id: String,
    /// File the record was written to.
    pub path: PathBuf,
    /// Record content as written, including fields kept from an earlier run.
    pub record: JsonObject,
}

/// Runs ingestion routines against one configuration directory.
pub struct Ingestor {
    store: ConfigStore,
    authors: AuthorRegistry,
    metadata: Box<dyn MetadataSource>,
}

impl std::fmt::Debug for Ingestor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ingestor")
            .field("root", &self.store.root())
            .finish_non_exhaustive()
    }
}

impl Ingestor {
    /// Creates an ingestor writing under `store` and querying `metadata`.
    #[must_use]
    pub fn new(store: ConfigStore, metadata: Box<dyn MetadataSource>) -> Self {
        Self {
            authors: AuthorRegistry::new(store.clone()),
            store,
            metadata,
        }
    }

    /// Classifies `url` and runs the matching routine.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError`] when the URL yields no usable identifier or the
    /// record cannot be persisted.
    pub async fn ingest(
        &self,
        product: &str,
        url: &str,
        id: Option<&str>,
        overrides: &JsonObject,
    ) -> Result<IngestOutcome, IngestError> {
        let kind = classify_url(url);
        info!(product, url, %kind, "Ingesting project");
        match kind {
            SourceKind::Github => self.add_repo(product, url, id, overrides).await,
            SourceKind::Medium => self.add_medium_blog(product, url, id, overrides).await,
            SourceKind::Other => self.add_other_blog(product, url, id, overrides).await,
        }
    }

    fn persist(
        &self,
        kind: SourceKind,
        id: String,
        path: PathBuf,
        record: &ProjectRecord,
    ) -> Result<IngestOutcome, IngestError> {
        let written = self.store.write_or_update(&path, record.as_object())?;
        info!(%kind, id = %id, path = %path.display(), "Saved project");
        Ok(IngestOutcome {
            kind,
            id,
            path,
            record: written,
        })
    }
}
