//! Job status polling.
//!
//! The status read is a pure snapshot-to-wire mapping: it takes the current
//! in-memory record and returns, never waiting on the simulator.

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use uuid::Uuid;

use blueflame_core::error::CoreError;
use blueflame_core::job::{JobId, JobRecord, JobStatus};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Client-visible job status representation.
///
/// The asset fields are omitted from the JSON until the job is done, at
/// which point all five appear together.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobStatusResponse {
    pub job_id: JobId,
    pub status: JobStatus,
    pub step: String,
    pub percent: u8,
    pub logs: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub master_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vertical_video_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stems_zip_url: Option<String>,
}

impl From<JobRecord> for JobStatusResponse {
    fn from(job: JobRecord) -> Self {
        let assets = job.result_assets;
        Self {
            job_id: job.id,
            status: job.status,
            step: job.current_step,
            percent: job.percent_complete,
            logs: job.log_entries,
            master_url: assets.as_ref().map(|a| a.master_url.clone()),
            video_url: assets.as_ref().map(|a| a.video_url.clone()),
            vertical_video_url: assets.as_ref().map(|a| a.vertical_video_url.clone()),
            promo_url: assets.as_ref().map(|a| a.promo_url.clone()),
            stems_zip_url: assets.map(|a| a.stems_zip_url),
        }
    }
}

/// GET /api/job/{job_id}/status
///
/// Current snapshot of the job, or 404 for an unrecognized id. The id is
/// taken as a raw string so a malformed id is indistinguishable from an
/// unknown one.
pub async fn job_status(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> AppResult<Json<JobStatusResponse>> {
    let job = Uuid::parse_str(&job_id)
        .ok()
        .and_then(|id| state.jobs.get(&id))
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Job",
            id: job_id,
        }))?;

    Ok(Json(JobStatusResponse::from(job)))
}

/// Routes mounted at `/api`.
pub fn router() -> Router<AppState> {
    Router::new().route("/job/{job_id}/status", get(job_status))
}
