//! Job records and the fixed generation pipeline.
//!
//! A [`JobRecord`] tracks one song-generation request from submission to
//! completion. Records are mutated only by the progress simulator that owns
//! them (single writer per job); status reads take cloned snapshots.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Job identifiers are random v4 UUIDs, so collisions are negligible and
/// ids leak nothing about submission order.
pub type JobId = Uuid;

/// The six mock-mode pipeline stages, in execution order.
pub const MOCK_PIPELINE_STEPS: &[&str] = &[
    "Uploading/Adapting Voice Profile",
    "Generating Instrumental",
    "Generating Melody from Lyrics",
    "Vocal Synthesis",
    "Mix & Master",
    "Video Generation",
];

/// Placeholder step list used when the real backend is selected.
pub const REAL_PIPELINE_STEPS: &[&str] = &["Processing"];

/// Lifecycle state of a job. Advances forward only; `Done` and `Error`
/// are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Running,
    Done,
    Error,
}

impl JobStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, JobStatus::Running)
    }
}

/// The named asset URLs attached to a completed job.
///
/// All five are attached in a single mutation when the job reaches `Done`;
/// a status read never observes a partial set. In mock mode these are the
/// same fixed paths for every job.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultAssets {
    pub master_url: String,
    pub video_url: String,
    pub vertical_video_url: String,
    pub promo_url: String,
    pub stems_zip_url: String,
}

impl ResultAssets {
    /// The fixed mock-mode asset paths, served from the `/mock` mount.
    pub fn mock() -> Self {
        Self {
            master_url: "/mock/master.mp3".into(),
            video_url: "/mock/video_16_9.mp4".into(),
            vertical_video_url: "/mock/video_9_16.mp4".into(),
            promo_url: "/mock/promo_30s.mp4".into(),
            stems_zip_url: "/mock/stems.zip".into(),
        }
    }
}

/// Mutable state of one generation job.
#[derive(Debug, Clone)]
pub struct JobRecord {
    pub id: JobId,
    pub status: JobStatus,
    /// Human-readable label of the step currently in progress.
    pub current_step: String,
    /// 0-100, monotonically non-decreasing; reaches 100 exactly when
    /// `status` becomes `Done`.
    pub percent_complete: u8,
    /// Append-only, in step order.
    pub log_entries: Vec<String>,
    /// BPM captured at submission. Immutable; used only to annotate logs.
    pub input_tempo: u16,
    pub result_assets: Option<ResultAssets>,
    /// Set when the job reaches a terminal status; drives TTL eviction.
    pub finished_at: Option<DateTime<Utc>>,
}

impl JobRecord {
    pub fn new(id: JobId, input_tempo: u16) -> Self {
        Self {
            id,
            status: JobStatus::Running,
            current_step: "Starting".into(),
            percent_complete: 0,
            log_entries: Vec::new(),
            input_tempo,
            result_assets: None,
            finished_at: None,
        }
    }
}

/// Percent shown while step `idx` (1-based) of `total` is in progress.
///
/// The final 5% is reserved for the completion transition, so a poller
/// never reads 100 before the result assets are attached.
pub fn step_percent(idx: usize, total: usize) -> u8 {
    debug_assert!(total > 0 && idx >= 1 && idx <= total);
    (idx as f64 / total as f64 * 100.0 * 0.95) as u8
}

/// Log line recorded when a step begins.
pub fn step_log_entry(step: &str, bpm: u16) -> String {
    format!("{step} started at BPM {bpm}")
}
