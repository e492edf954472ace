pub mod generate;
pub mod health;
pub mod jobs;
pub mod projects;
pub mod voice;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /generate/create              submit a generation job (POST)
/// /generate/instrumental        instrumental stage prompt (POST)
/// /generate/melody              melody stage prompt (POST)
/// /generate/video               video stage prompt (POST)
/// /synthesize/vocal             vocal synthesis stage prompt (POST)
/// /mix                          mix & master stage prompt (POST)
///
/// /job/{job_id}/status          poll job progress (GET)
///
/// /projects                     create project (POST)
/// /projects/{id}                project lookup (GET)
///
/// /upload/voice                 voice clip upload (POST, multipart)
/// /voice/{voice_id}             delete voice profile (DELETE)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(generate::router())
        .merge(jobs::router())
        .merge(projects::router())
        .merge(voice::router())
}
