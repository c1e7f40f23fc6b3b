//! Job status table with a retention window.

use std::time::Duration;

use dashmap::DashMap;
use tokio::time::Instant;

use publisher_core::types::{JobId, JobState, JobStatus};

#[derive(Debug, Clone)]
struct JobRecord {
    status: JobStatus,
    finished_at: Option<Instant>,
}

impl JobRecord {
    fn is_expired(&self, now: Instant, retention: Duration) -> bool {
        self.finished_at
            .is_some_and(|finished| now.saturating_duration_since(finished) >= retention)
    }
}

/// Concurrent table of job status records.
///
/// Finished jobs are kept for `retention`, after which lookups miss and the
/// record is dropped, either lazily on lookup or by [`JobTable::purge_expired`].
#[derive(Debug)]
pub struct JobTable {
    records: DashMap<JobId, JobRecord>,
    retention: Duration,
}

impl JobTable {
    /// Create an empty table.
    pub fn new(retention: Duration) -> Self {
        Self {
            records: DashMap::new(),
            retention,
        }
    }

    /// Register a newly accepted job.
    pub fn insert(&self, id: JobId) {
        self.records.insert(
            id,
            JobRecord {
                status: JobStatus::queued(),
                finished_at: None,
            },
        );
    }

    /// Move a job to `state` without touching its counters.
    pub fn set_state(&self, id: JobId, state: JobState) {
        if let Some(mut record) = self.records.get_mut(&id) {
            record.status.state = state;
        }
    }

    /// Mark a job finished and start its retention clock.
    pub fn finish(&self, id: JobId, failed: bool, processed: u64, messages: Vec<String>) {
        if let Some(mut record) = self.records.get_mut(&id) {
            record.status.state = JobState::Finished;
            record.status.failed = failed;
            record.status.processed = processed;
            record.status.messages.extend(messages);
            record.finished_at = Some(Instant::now());
        }
    }

    /// Snapshot of a job's status, or `None` if unknown or expired.
    pub fn get(&self, id: JobId) -> Option<JobStatus> {
        let now = Instant::now();
        {
            let record = self.records.get(&id)?;
            if !record.is_expired(now, self.retention) {
                return Some(record.status.clone());
            }
        }

        // The read guard must be released before removing from the same shard.
        self.records
            .remove_if(&id, |_, record| record.is_expired(now, self.retention));
        None
    }

    /// Drop every expired record. Returns how many were dropped.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut purged = 0;
        self.records.retain(|_, record| {
            let expired = record.is_expired(now, self.retention);
            if expired {
                purged += 1;
            }
            !expired
        });
        purged
    }

    /// Number of records currently held.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
