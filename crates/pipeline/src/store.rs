//! In-memory job store.
//!
//! Process-wide map from job id to [`JobRecord`]. Handlers only create
//! records and read snapshots; all mutation goes through the progress
//! simulator that owns the record, so each key has a single writer and
//! arbitrarily many concurrent readers.
//!
//! Locks are held only for the map operation itself, never across an await
//! point. Terminal records are reclaimed by the [`EvictionSweeper`] once
//! their TTL expires; running records are never evicted.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use blueflame_core::job::{step_log_entry, JobId, JobRecord, JobStatus, ResultAssets};
use chrono::Utc;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

#[derive(Default)]
pub struct JobStore {
    jobs: RwLock<HashMap<JobId, JobRecord>>,
}

impl JobStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<JobId, JobRecord>> {
        self.jobs.read().expect("job store lock poisoned")
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<JobId, JobRecord>> {
        self.jobs.write().expect("job store lock poisoned")
    }

    /// Insert a fresh `running` record and return its id.
    ///
    /// The record is visible to [`get`](Self::get) as soon as this returns.
    pub fn create(&self, input_tempo: u16) -> JobId {
        let id = Uuid::new_v4();
        self.write().insert(id, JobRecord::new(id, input_tempo));
        id
    }

    /// Snapshot of the record, or `None` for an unknown id.
    pub fn get(&self, id: &JobId) -> Option<JobRecord> {
        self.read().get(id).cloned()
    }

    /// Number of records currently tracked.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Record that `step` is now in progress: update the step label, raise
    /// the percent, and append the step log line. No-op for unknown or
    /// already-terminal records.
    pub fn advance_step(&self, id: &JobId, step: &str, percent: u8) {
        if let Some(job) = self.write().get_mut(id) {
            if job.status.is_terminal() {
                return;
            }
            job.current_step = step.to_string();
            // Monotonic: never step a percent backwards.
            job.percent_complete = job.percent_complete.max(percent);
            let entry = step_log_entry(step, job.input_tempo);
            job.log_entries.push(entry);
        }
    }

    /// Transition to `done`: percent 100 and all result assets attached in
    /// the same locked mutation, so readers never observe a partial set.
    pub fn complete(&self, id: &JobId, assets: ResultAssets) {
        if let Some(job) = self.write().get_mut(id) {
            if job.status.is_terminal() {
                return;
            }
            job.percent_complete = 100;
            job.status = JobStatus::Done;
            job.result_assets = Some(assets);
            job.finished_at = Some(Utc::now());
        }
    }

    /// Transition to `error` with a descriptive log entry. No-op if the
    /// record already reached a terminal status.
    pub fn fail(&self, id: &JobId, reason: &str) {
        if let Some(job) = self.write().get_mut(id) {
            if job.status.is_terminal() {
                return;
            }
            job.status = JobStatus::Error;
            job.log_entries.push(format!("Generation failed: {reason}"));
            job.finished_at = Some(Utc::now());
        }
    }

    /// Drop terminal records that finished more than `ttl` ago. Returns the
    /// number of evicted records. Running records are always retained.
    pub fn evict_expired(&self, ttl: Duration) -> usize {
        let Ok(ttl) = chrono::Duration::from_std(ttl) else {
            return 0;
        };
        let cutoff = Utc::now() - ttl;

        let mut jobs = self.write();
        let before = jobs.len();
        jobs.retain(|_, job| match job.finished_at {
            Some(finished) if job.status.is_terminal() => finished > cutoff,
            _ => true,
        });
        before - jobs.len()
    }
}

/// Background task that periodically evicts expired terminal records so the
/// store does not grow without bound in a long-running service.
pub struct EvictionSweeper {
    store: Arc<JobStore>,
    ttl: Duration,
    sweep_interval: Duration,
}

impl EvictionSweeper {
    /// Sweep at one tenth of the TTL, clamped to [1s, 60s].
    pub fn new(store: Arc<JobStore>, ttl: Duration) -> Self {
        let sweep_interval = (ttl / 10).clamp(Duration::from_secs(1), Duration::from_secs(60));
        Self {
            store,
            ttl,
            sweep_interval,
        }
    }

    /// Run the sweep loop until the cancellation token is triggered.
    pub async fn run(self, cancel: CancellationToken) {
        let mut ticker = tokio::time::interval(self.sweep_interval);
        tracing::info!(
            ttl_secs = self.ttl.as_secs(),
            sweep_interval_secs = self.sweep_interval.as_secs(),
            "Job eviction sweeper started",
        );

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Job eviction sweeper shutting down");
                    break;
                }
                _ = ticker.tick() => {
                    let evicted = self.store.evict_expired(self.ttl);
                    if evicted > 0 {
                        tracing::debug!(evicted, remaining = self.store.len(), "Evicted expired job records");
                    }
                }
            }
        }
    }
}
