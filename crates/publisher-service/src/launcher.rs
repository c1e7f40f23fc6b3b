//! Job launcher: turns a publish request into exactly one backend job.

use std::sync::Arc;

use tracing::info;

use publisher_core::error::AppError;
use publisher_core::result::AppResult;
use publisher_core::traits::PublishingBackend;
use publisher_core::types::{JobHandle, PublishJob, PublishRequest};

/// Validates publish requests against the backend and submits them.
///
/// Every store and item a request names is resolved before anything is
/// submitted, so a request either yields a handle or fails with no job
/// created.
#[derive(Debug, Clone)]
pub struct JobLauncher {
    /// Publishing backend
    backend: Arc<dyn PublishingBackend>,
}

impl JobLauncher {
    /// Create a new launcher
    pub fn new(backend: Arc<dyn PublishingBackend>) -> Self {
        Self { backend }
    }

    /// Submit `request` as a single backend job.
    pub async fn launch(&self, request: &PublishRequest) -> AppResult<JobHandle> {
        let source = self.backend.resolve_store(&request.source_store).await?;
        let target = self.backend.resolve_store(&request.target_store).await?;

        let root = match request.scope.item_path() {
            Some(path) => Some(self.backend.resolve_item(&source, path).await?),
            None => None,
        };

        let languages = if request.scope.uses_language_catalog() {
            let catalog = self.backend.languages(&source).await?;
            if catalog.is_empty() {
                return Err(AppError::validation(format!(
                    "store {} has no languages to republish",
                    source.name
                )));
            }
            catalog
        } else {
            if request.languages.is_empty() {
                return Err(AppError::validation("at least one language is required"));
            }
            request.languages.clone()
        };

        let job = PublishJob {
            source,
            targets: vec![target],
            languages,
            root,
            options: request.scope.options(),
        };

        let languages = job.languages.clone();
        let handle = self.backend.submit(job).await?;

        info!(
            handle = %handle,
            scope = %request.scope,
            target = %request.target_store,
            languages = ?languages,
            "Publish job submitted"
        );

        Ok(handle)
    }

    /// Publishing targets configured for `source_store`.
    pub async fn publishing_targets(&self, source_store: &str) -> AppResult<Vec<String>> {
        let source = self.backend.resolve_store(source_store).await?;
        Ok(self.backend.publishing_targets(&source).await?)
    }
}
