use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use blueflame_api::config::ServerConfig;
use blueflame_api::router::build_app_router;
use blueflame_api::state::AppState;
use blueflame_core::prompts::PromptLibrary;
use blueflame_pipeline::backend::MockBackend;
use blueflame_pipeline::store::JobStore;

/// Build a test `ServerConfig` with safe defaults and millisecond step
/// pacing so end-to-end polling tests finish quickly.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        mock_mode: true,
        step_delay_ms: 1,
        job_ttl_secs: 3600,
        mock_assets_dir: PathBuf::from("mock_assets"),
        prompts_path: PathBuf::from("does_not_exist/blueflame_prompts.json"),
    }
}

/// Build the full application router with all middleware layers.
///
/// This mirrors the router construction in `main.rs` (minus the eviction
/// sweeper) so integration tests exercise the same middleware stack that
/// production uses.
pub fn build_test_app() -> Router {
    let config = test_config();
    let prompts = Arc::new(PromptLibrary::default());

    let state = AppState {
        config: Arc::new(config.clone()),
        jobs: Arc::new(JobStore::new()),
        prompts: Arc::clone(&prompts),
        backend: Arc::new(MockBackend::new(prompts)),
    };

    build_app_router(state, &config)
}

/// Send a GET request to the app and return the raw response.
#[allow(dead_code)]
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("request build failed"),
    )
    .await
    .expect("request failed")
}

/// Send a JSON POST request to the app and return the raw response.
#[allow(dead_code)]
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request build failed"),
    )
    .await
    .expect("request failed")
}

/// Collect a response body and parse it as JSON.
#[allow(dead_code)]
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("failed to read body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body was not valid JSON")
}
