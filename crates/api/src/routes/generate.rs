//! Generation endpoints: job submission plus the per-stage prompt calls.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};

use blueflame_core::job::{MOCK_PIPELINE_STEPS, REAL_PIPELINE_STEPS};
use blueflame_core::prompts;
use blueflame_pipeline::simulate::simulate_progress;

use crate::error::AppResult;
use crate::requests::SongRequest;
use crate::state::AppState;

/// POST /api/generate/create
///
/// Validate the request, create a job record, and spawn its progress
/// simulator. Returns `{jobId}` immediately; the handler schedules the
/// simulation but never waits on it.
pub async fn create_job(
    State(state): State<AppState>,
    Json(input): Json<SongRequest>,
) -> AppResult<Json<Value>> {
    let input = input.validated()?;

    let job_id = state.jobs.create(input.bpm);

    let steps = if state.config.mock_mode {
        MOCK_PIPELINE_STEPS
    } else {
        REAL_PIPELINE_STEPS
    };
    let steps: Vec<String> = steps.iter().map(|s| s.to_string()).collect();

    tokio::spawn(simulate_progress(
        Arc::clone(&state.jobs),
        job_id,
        steps,
        state.config.step_delay(),
    ));

    tracing::info!(
        job_id = %job_id,
        bpm = input.bpm,
        mock = state.config.mock_mode,
        "Generation job submitted",
    );

    Ok(Json(json!({ "jobId": job_id })))
}

/// Run one stage call through the generation backend and shape the
/// stage-endpoint response from it.
async fn stage_call(state: &AppState, prompt_key: &str, input: SongRequest) -> AppResult<Json<Value>> {
    let input = input.validated()?;
    let response = state.backend.call(prompt_key, input.bpm).await?;

    Ok(Json(json!({
        "status": "ok",
        "prompt": response.get("prompt").cloned().unwrap_or_else(|| json!({})),
        "bpm": input.bpm,
    })))
}

/// POST /api/generate/instrumental
pub async fn instrumental(
    State(state): State<AppState>,
    Json(input): Json<SongRequest>,
) -> AppResult<Json<Value>> {
    stage_call(&state, prompts::KEY_INSTRUMENTAL, input).await
}

/// POST /api/generate/melody
pub async fn melody(
    State(state): State<AppState>,
    Json(input): Json<SongRequest>,
) -> AppResult<Json<Value>> {
    stage_call(&state, prompts::KEY_MELODY, input).await
}

/// POST /api/synthesize/vocal
pub async fn vocal(
    State(state): State<AppState>,
    Json(input): Json<SongRequest>,
) -> AppResult<Json<Value>> {
    stage_call(&state, prompts::KEY_VOCAL, input).await
}

/// POST /api/mix
pub async fn mix(
    State(state): State<AppState>,
    Json(input): Json<SongRequest>,
) -> AppResult<Json<Value>> {
    stage_call(&state, prompts::KEY_MIX, input).await
}

/// POST /api/generate/video
pub async fn video(
    State(state): State<AppState>,
    Json(input): Json<SongRequest>,
) -> AppResult<Json<Value>> {
    stage_call(&state, prompts::KEY_VIDEO, input).await
}

/// Routes mounted at `/api`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/generate/create", post(create_job))
        .route("/generate/instrumental", post(instrumental))
        .route("/generate/melody", post(melody))
        .route("/generate/video", post(video))
        .route("/synthesize/vocal", post(vocal))
        .route("/mix", post(mix))
}
