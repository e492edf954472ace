//! Background progress simulation for a single job.
//!
//! Each submitted job gets exactly one simulator task, spawned
//! fire-and-forget by the submission handler. The task is the record's only
//! writer: it walks the step list with fixed pacing, then marks completion
//! and attaches the mock assets. A scoped guard ensures a record can never
//! be abandoned in `running` state if the task unwinds early.

use std::sync::Arc;
use std::time::Duration;

use blueflame_core::job::{step_percent, JobId, ResultAssets};

use crate::store::JobStore;

/// Marks a job `error` if its simulator exits before reaching a terminal
/// status. Disarmed on normal completion; fires on panic or early return.
struct CompletionGuard {
    store: Arc<JobStore>,
    job_id: JobId,
    armed: bool,
}

impl CompletionGuard {
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for CompletionGuard {
    fn drop(&mut self) {
        if self.armed {
            tracing::error!(job_id = %self.job_id, "Progress simulation aborted before completion");
            self.store
                .fail(&self.job_id, "simulation aborted before completion");
        }
    }
}

/// Walk `job_id` through `steps` in order, pausing `pacing` after each, then
/// mark the job done with the fixed mock assets.
///
/// For step `idx` (1-based) of `total` the visible percent is
/// `idx / total * 100 * 0.95`; the held-back 5% keeps a poller from reading
/// 100 before the assets are attached. Log entries are appended in step
/// order, so they double as a transition history.
pub async fn simulate_progress(
    store: Arc<JobStore>,
    job_id: JobId,
    steps: Vec<String>,
    pacing: Duration,
) {
    debug_assert!(!steps.is_empty());

    let guard = CompletionGuard {
        store: Arc::clone(&store),
        job_id,
        armed: true,
    };

    let total = steps.len();
    for (idx, step) in steps.iter().enumerate() {
        store.advance_step(&job_id, step, step_percent(idx + 1, total));
        tokio::time::sleep(pacing).await;
    }

    store.complete(&job_id, ResultAssets::mock());
    guard.disarm();

    tracing::info!(job_id = %job_id, steps = total, "Job simulation complete");
}
