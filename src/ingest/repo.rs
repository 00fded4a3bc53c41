use tracing::{info, warn};

use super::{IngestError, IngestOutcome, Ingestor};
use crate::author::normalize_author_id;
use crate::parser::{SourceKind, parse_github_url};
use crate::record::ProjectRecord;
use crate::store::{Collection, JsonObject};

impl Ingestor {
    /// Adds a GitHub repository under `<product>/repos/`.
    ///
    /// The record id defaults to `<owner>-<repo>`. The owner becomes the
    /// record's author when an author record exists for it after a creation
    /// attempt; the readme path becomes `content` when the API provides one.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::Parse`] when the URL lacks `owner/repo`, and
    /// [`IngestError::Store`] when the template or record file fails.
    #[tracing::instrument(skip(self, overrides))]
    pub async fn add_repo(
        &self,
        product: &str,
        url: &str,
        id: Option<&str>,
        overrides: &JsonObject,
    ) -> Result<IngestOutcome, IngestError> {
        let repo = parse_github_url(url)?;
        let id = id.map_or_else(|| repo.default_id(), str::to_string);
        let path = self.store.record_path(product, Collection::Repos, &id)?;

        let mut record = ProjectRecord::from_template(self.store.load_template(Collection::Repos)?);
        record.set_source(SourceKind::Github);
        record.set_link(url);
        record.set("owner", repo.owner.as_str());
        record.set("repo", repo.repo.as_str());

        let author_ids = if self
            .authors
            .ensure_github_author(self.metadata.as_ref(), &repo.owner)
            .await
        {
            vec![normalize_author_id(&repo.owner)]
        } else {
            info!(owner = %repo.owner, "No author record for repository owner");
            Vec::new()
        };
        record.set_author_ids(author_ids);

        match self.metadata.repo_readme(&repo.owner, &repo.repo).await {
            Ok(readme) => record.set("content", readme),
            Err(error) => warn!(
                owner = %repo.owner,
                repo = %repo.repo,
                error = %error,
                "Readme lookup failed; keeping template content"
            ),
        }

        record.apply_overrides(overrides);
        self.persist(SourceKind::Github, id, path, &record)
    }
}
