//! Scripted backend for unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use publisher_core::traits::{BackendError, PublishingBackend};
use publisher_core::types::{
    ItemRef, JobHandle, JobState, JobStatus, PublishJob, StoreRef,
};

/// Backend whose status answers are scripted in advance.
///
/// Each `status` call pops the next scripted answer; the last one repeats.
/// A non-zero `status_delay` makes every `status` call take that long.
#[derive(Debug)]
pub struct ScriptedBackend {
    pub stores: Vec<String>,
    pub items: Vec<String>,
    pub languages: Vec<String>,
    pub targets: Vec<String>,
    pub statuses: Mutex<VecDeque<Result<JobStatus, BackendError>>>,
    pub submitted: Mutex<Vec<PublishJob>>,
    pub status_calls: AtomicUsize,
    pub status_delay: Duration,
}

impl Default for ScriptedBackend {
    fn default() -> Self {
        Self {
            stores: vec!["master".into(), "web".into(), "experienceedge".into()],
            items: vec!["/content".into(), "/content/home".into()],
            languages: vec!["en".into(), "fr".into()],
            targets: vec!["web".into(), "experienceedge".into()],
            statuses: Mutex::new(VecDeque::new()),
            submitted: Mutex::new(Vec::new()),
            status_calls: AtomicUsize::new(0),
            status_delay: Duration::ZERO,
        }
    }
}

impl ScriptedBackend {
    pub fn with_statuses(
        self,
        statuses: impl IntoIterator<Item = Result<JobStatus, BackendError>>,
    ) -> Self {
        *self.statuses.lock().unwrap() = statuses.into_iter().collect();
        self
    }

    pub fn submitted(&self) -> Vec<PublishJob> {
        self.submitted.lock().unwrap().clone()
    }

    pub fn status_calls(&self) -> usize {
        self.status_calls.load(Ordering::SeqCst)
    }
}

pub fn status(state: JobState) -> Result<JobStatus, BackendError> {
    Ok(JobStatus {
        state,
        failed: false,
        processed: 0,
        messages: Vec::new(),
    })
}

#[async_trait]
impl PublishingBackend for ScriptedBackend {
    async fn resolve_store(&self, name: &str) -> Result<StoreRef, BackendError> {
        if self.stores.iter().any(|s| s == name) {
            Ok(StoreRef {
                name: name.to_string(),
            })
        } else {
            Err(BackendError::StoreNotFound(name.to_string()))
        }
    }

    async fn resolve_item(&self, store: &StoreRef, path: &str) -> Result<ItemRef, BackendError> {
        if self.items.iter().any(|i| i == path) {
            Ok(ItemRef {
                store: store.name.clone(),
                path: path.to_string(),
            })
        } else {
            Err(BackendError::ItemNotFound {
                store: store.name.clone(),
                path: path.to_string(),
            })
        }
    }

    async fn languages(&self, _store: &StoreRef) -> Result<Vec<String>, BackendError> {
        Ok(self.languages.clone())
    }

    async fn publishing_targets(&self, _store: &StoreRef) -> Result<Vec<String>, BackendError> {
        Ok(self.targets.clone())
    }

    async fn submit(&self, job: PublishJob) -> Result<JobHandle, BackendError> {
        self.submitted.lock().unwrap().push(job);
        Ok(JobHandle::new("cm-test"))
    }

    async fn status(&self, handle: &JobHandle) -> Result<JobStatus, BackendError> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        if !self.status_delay.is_zero() {
            tokio::time::sleep(self.status_delay).await;
        }
        let mut statuses = self.statuses.lock().unwrap();
        let next = if statuses.len() > 1 {
            statuses.pop_front()
        } else {
            statuses.front().cloned()
        };
        next.unwrap_or_else(|| Err(BackendError::JobNotFound(handle.clone())))
    }
}
