use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;
use serde_json::{json, Value};

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Number of job records currently tracked.
    pub jobs_tracked: usize,
}

/// GET / -- service banner with the active backend mode.
async fn root_info(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "message": "AI Song Generator Backend",
        "mock": state.config.mock_mode,
    }))
}

/// GET /health -- returns service health and job store size.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        jobs_tracked: state.jobs.len(),
    })
}

/// Mount root-level routes (intended for root-level, NOT under `/api`).
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(root_info))
        .route("/health", get(health_check))
}
