//! In-memory publishing backend.

pub mod content;
pub mod jobs;

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use publisher_core::config::BackendConfig;
use publisher_core::traits::{BackendError, PublishingBackend};
use publisher_core::types::{ItemRef, JobHandle, JobState, JobStatus, PublishJob, StoreRef};

use self::content::{ContentStore, normalize_path};
use self::jobs::JobTable;

/// In-process stand-in for the content-management backend.
///
/// Cheap to clone; clones share the same stores and job table.
#[derive(Debug, Clone)]
pub struct MemoryBackend {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    instance: String,
    source: String,
    targets: Vec<String>,
    languages: Vec<String>,
    stores: DashMap<String, ContentStore>,
    jobs: JobTable,
    step_delay: Duration,
    submissions: AtomicU64,
}

impl MemoryBackend {
    /// Build a backend with the stores, languages and items from `config`.
    pub fn new(config: &BackendConfig) -> Self {
        let stores = DashMap::new();

        let mut source = ContentStore::default();
        for path in &config.items {
            source.touch(path);
        }
        stores.insert(config.source_store.clone(), source);
        for target in &config.targets {
            stores.entry(target.clone()).or_default();
        }

        info!(
            instance = %config.instance,
            source = %config.source_store,
            targets = ?config.targets,
            items = config.items.len(),
            "In-memory publishing backend ready"
        );

        Self {
            inner: Arc::new(Inner {
                instance: config.instance.clone(),
                source: config.source_store.clone(),
                targets: config.targets.clone(),
                languages: config.languages.clone(),
                stores,
                jobs: JobTable::new(Duration::from_secs(config.retention_seconds)),
                step_delay: Duration::from_millis(config.step_delay_ms),
                submissions: AtomicU64::new(0),
            }),
        }
    }

    /// Delete an item and its descendants from the source store.
    pub fn remove_item(&self, path: &str) -> usize {
        self.inner
            .stores
            .get_mut(&self.inner.source)
            .map(|mut source| source.remove(path))
            .unwrap_or(0)
    }

    /// Revision of `path` last published to `target` in `language`.
    pub fn published_revision(&self, target: &str, path: &str, language: &str) -> Option<u64> {
        self.inner
            .stores
            .get(target)
            .and_then(|store| store.published_revision(path, language))
    }

    /// Number of jobs accepted since startup.
    pub fn submissions(&self) -> u64 {
        self.inner.submissions.load(Ordering::Relaxed)
    }

    /// Drop job records whose retention window has passed.
    pub fn purge_expired(&self) -> usize {
        self.inner.jobs.purge_expired()
    }

    /// Periodically purge expired job records until `shutdown` flips to `true`.
    pub fn spawn_sweeper(
        &self,
        interval: Duration,
        mut shutdown: watch::Receiver<bool>,
    ) -> JoinHandle<()> {
        let backend = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                tokio::select! {
                    changed = shutdown.changed() => {
                        if changed.is_err() || *shutdown.borrow() {
                            info!("Job retention sweeper stopping");
                            break;
                        }
                    }
                    _ = ticker.tick() => {
                        let purged = backend.purge_expired();
                        if purged > 0 {
                            debug!(purged, "Purged expired job records");
                        }
                    }
                }
            }
        })
    }

    fn ensure_store(&self, name: &str) -> Result<(), BackendError> {
        if self.inner.stores.contains_key(name) {
            Ok(())
        } else {
            Err(BackendError::StoreNotFound(name.to_string()))
        }
    }

    async fn run_job(self, handle: JobHandle, job: PublishJob) {
        let id = handle.id();
        let jobs = &self.inner.jobs;

        tokio::time::sleep(self.inner.step_delay).await;
        jobs.set_state(id, JobState::Running);
        debug!(handle = %handle, "Publish job running");

        tokio::time::sleep(self.inner.step_delay).await;

        let source = self
            .inner
            .stores
            .get(&job.source.name)
            .map(|store| store.value().clone());
        let Some(source) = source else {
            warn!(handle = %handle, store = %job.source.name, "Source store vanished");
            jobs.finish(
                id,
                true,
                0,
                vec![format!("Store {} no longer exists", job.source.name)],
            );
            return;
        };

        let mut processed = 0;
        let mut messages = Vec::new();
        let mut failed = false;
        for target in &job.targets {
            let Some(mut store) = self.inner.stores.get_mut(&target.name) else {
                failed = true;
                messages.push(format!("Store {} no longer exists", target.name));
                continue;
            };
            let outcome = source.publish_into(&mut store, &target.name, &job);
            processed += outcome.processed;
            failed |= outcome.failed;
            messages.extend(outcome.messages);
        }

        jobs.finish(id, failed, processed, messages);
        info!(handle = %handle, processed, failed, "Publish job finished");
    }
}

#[async_trait]
impl PublishingBackend for MemoryBackend {
    async fn resolve_store(&self, name: &str) -> Result<StoreRef, BackendError> {
        self.ensure_store(name)?;
        Ok(StoreRef {
            name: name.to_string(),
        })
    }

    async fn resolve_item(&self, store: &StoreRef, path: &str) -> Result<ItemRef, BackendError> {
        let found = self
            .inner
            .stores
            .get(&store.name)
            .ok_or_else(|| BackendError::StoreNotFound(store.name.clone()))?
            .contains(path);

        if !found {
            return Err(BackendError::ItemNotFound {
                store: store.name.clone(),
                path: path.to_string(),
            });
        }

        Ok(ItemRef {
            store: store.name.clone(),
            path: normalize_path(path),
        })
    }

    async fn languages(&self, store: &StoreRef) -> Result<Vec<String>, BackendError> {
        self.ensure_store(&store.name)?;
        Ok(self.inner.languages.clone())
    }

    async fn publishing_targets(&self, store: &StoreRef) -> Result<Vec<String>, BackendError> {
        self.ensure_store(&store.name)?;
        if store.name == self.inner.source {
            Ok(self.inner.targets.clone())
        } else {
            Ok(Vec::new())
        }
    }

    async fn submit(&self, job: PublishJob) -> Result<JobHandle, BackendError> {
        self.ensure_store(&job.source.name)?;
        for target in &job.targets {
            self.ensure_store(&target.name)?;
        }
        if let Some(root) = &job.root {
            self.resolve_item(&job.source, &root.path).await?;
        }

        let handle = JobHandle::new(self.inner.instance.clone());
        self.inner.jobs.insert(handle.id());
        self.inner.submissions.fetch_add(1, Ordering::Relaxed);

        debug!(
            handle = %handle,
            languages = ?job.languages,
            mode = ?job.options.mode,
            "Publish job queued"
        );

        tokio::spawn(self.clone().run_job(handle.clone(), job));
        Ok(handle)
    }

    async fn status(&self, handle: &JobHandle) -> Result<JobStatus, BackendError> {
        if handle.instance() != self.inner.instance {
            return Err(BackendError::JobNotFound(handle.clone()));
        }
        self.inner
            .jobs
            .get(handle.id())
            .ok_or_else(|| BackendError::JobNotFound(handle.clone()))
    }
}
