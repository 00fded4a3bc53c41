use tracing::{debug, info, warn};

use super::{IngestError, IngestOutcome, Ingestor};
use crate::author::normalize_author_id;
use crate::parser::{ParseError, SourceKind, derive_slug, parse_medium_url};
use crate::record::ProjectRecord;
use crate::store::{Collection, JsonObject};

impl Ingestor {
    /// Adds a Medium post under `<product>/blogs/`.
    ///
    /// The record id defaults to the post slug. The writer is resolved from
    /// the post page and created as an author when unknown; `authorIds`
    /// names the writer even when that creation fails.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::Parse`] when neither an id nor a slug is
    /// available, before any network call or write.
    #[tracing::instrument(skip(self, overrides))]
    pub async fn add_medium_blog(
        &self,
        product: &str,
        url: &str,
        id: Option<&str>,
        overrides: &JsonObject,
    ) -> Result<IngestOutcome, IngestError> {
        let parts = parse_medium_url(url);
        let Some(id) = id.map(str::to_string).or(parts.slug) else {
            return Err(ParseError::unparseable_medium(url).into());
        };
        let path = self.store.record_path(product, Collection::Blogs, &id)?;

        let mut record = ProjectRecord::from_template(self.store.load_template(Collection::Blogs)?);
        record.set_source(SourceKind::Medium);
        record.set_link(url);

        let author = match self.metadata.medium_post_author(url).await {
            Ok(author) => author,
            Err(error) => {
                warn!(url, error = %error, "Could not resolve Medium post author");
                None
            }
        };
        let author_ids = match author {
            Some(handle) => {
                if !self
                    .authors
                    .ensure_medium_author(self.metadata.as_ref(), &handle)
                    .await
                {
                    warn!(handle = %handle, "Medium author record missing; referencing it anyway");
                }
                vec![normalize_author_id(&handle)]
            }
            None => {
                info!(url, "No author found for Medium post");
                Vec::new()
            }
        };
        record.set_author_ids(author_ids);

        record.apply_overrides(overrides);
        self.persist(SourceKind::Medium, id, path, &record)
    }

    /// Adds an arbitrary web page under `<product>/blogs/`.
    ///
    /// The record id defaults to a slug of the URL path; `title` comes from
    /// the page's Open Graph title when the page can be fetched.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::Parse`] when no id is given and the URL is
    /// malformed or its path yields an empty slug.
    #[tracing::instrument(skip(self, overrides))]
    pub async fn add_other_blog(
        &self,
        product: &str,
        url: &str,
        id: Option<&str>,
        overrides: &JsonObject,
    ) -> Result<IngestOutcome, IngestError> {
        let id = match id {
            Some(id) => id.to_string(),
            None => {
                let slug = derive_slug(url)?;
                if slug.is_empty() {
                    return Err(ParseError::empty_slug(url).into());
                }
                slug
            }
        };
        let path = self.store.record_path(product, Collection::Blogs, &id)?;

        let mut record = ProjectRecord::from_template(self.store.load_template(Collection::Blogs)?);
        record.set_source(SourceKind::Other);
        record.set_link(url);

        match self.metadata.open_graph(url).await {
            Ok(graph) => match graph.title {
                Some(title) => record.set("title", title),
                None => debug!(url, "Page has no title; keeping template title"),
            },
            Err(error) => warn!(url, error = %error, "Open Graph scrape failed; keeping template title"),
        }

        record.apply_overrides(overrides);
        self.persist(SourceKind::Other, id, path, &record)
    }
}
