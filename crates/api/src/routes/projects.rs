//! Project endpoints.
//!
//! Projects have no server-side storage in this simulation: creation echoes
//! the validated payload back with a fresh id, and lookups acknowledge any
//! id as existing.

use axum::extract::Path;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::AppResult;
use crate::requests::SongRequest;
use crate::state::AppState;

/// POST /api/projects
pub async fn create_project(Json(input): Json<SongRequest>) -> AppResult<Json<Value>> {
    let input = input.validated()?;

    Ok(Json(json!({
        "id": Uuid::new_v4(),
        "bpm": input.bpm,
        "lyrics": input.lyrics,
        "voice": input.voice,
        "moods": input.moods,
        "tracks": input.tracks,
    })))
}

/// GET /api/projects/{project_id}
pub async fn get_project(Path(project_id): Path<String>) -> Json<Value> {
    Json(json!({ "id": project_id, "exists": true }))
}

/// Routes mounted at `/api`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/projects", post(create_project))
        .route("/projects/{project_id}", get(get_project))
}
