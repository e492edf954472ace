//! Integration tests for job submission, progress polling, and the
//! per-stage generation endpoints.

mod common;

use std::time::Duration;

use axum::http::StatusCode;
use common::{body_json, get, post_json};
use serde_json::json;

/// The canonical demo request from the project's e2e script.
fn demo_request() -> serde_json::Value {
    json!({
        "bpm": 90,
        "lyrics": "Hello world, sing along",
        "voice": {"type": "Male", "preset": "male_hindi_1"},
        "moods": ["Romantic"],
        "tracks": []
    })
}

const EXPECTED_STEPS: &[&str] = &[
    "Uploading/Adapting Voice Profile",
    "Generating Instrumental",
    "Generating Melody from Lyrics",
    "Vocal Synthesis",
    "Mix & Master",
    "Video Generation",
];

// ---------------------------------------------------------------------------
// Test: full mock run -- submit, poll to done, verify contract
// ---------------------------------------------------------------------------

#[tokio::test]
async fn mock_run_completes_with_six_steps_and_all_assets() {
    let app = common::build_test_app();

    let response = post_json(app.clone(), "/api/generate/create", demo_request()).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let job_id = json["jobId"].as_str().expect("jobId missing").to_string();

    // Poll until done, checking the status contract at every read.
    let mut last_percent = 0u64;
    let mut done = None;
    for _ in 0..500 {
        let response = get(app.clone(), &format!("/api/job/{job_id}/status")).await;
        assert_eq!(response.status(), StatusCode::OK);
        let status = body_json(response).await;

        let percent = status["percent"].as_u64().unwrap();
        assert!(
            percent >= last_percent,
            "percent went backwards: {last_percent} -> {percent}"
        );
        last_percent = percent;

        match status["status"].as_str().unwrap() {
            "done" => {
                done = Some(status);
                break;
            }
            "running" => {
                // 100 is reached only in the done state.
                assert!(percent < 100);
                // Assets never appear before completion.
                assert!(status.get("masterUrl").is_none());
                tokio::time::sleep(Duration::from_millis(2)).await;
            }
            other => panic!("unexpected status {other}: {status}"),
        }
    }

    let status = done.expect("job did not complete in time");
    assert_eq!(status["jobId"], job_id.as_str());
    assert_eq!(status["percent"], 100);

    // Exactly six step transitions, in order, each carrying the tempo.
    let logs = status["logs"].as_array().unwrap();
    assert_eq!(logs.len(), EXPECTED_STEPS.len());
    for (entry, step) in logs.iter().zip(EXPECTED_STEPS) {
        assert_eq!(entry.as_str().unwrap(), format!("{step} started at BPM 90"));
    }

    // All five asset URLs present simultaneously, with the fixed paths.
    assert_eq!(status["masterUrl"], "/mock/master.mp3");
    assert_eq!(status["videoUrl"], "/mock/video_16_9.mp4");
    assert_eq!(status["verticalVideoUrl"], "/mock/video_9_16.mp4");
    assert_eq!(status["promoUrl"], "/mock/promo_30s.mp4");
    assert_eq!(status["stemsZipUrl"], "/mock/stems.zip");
}

// ---------------------------------------------------------------------------
// Test: submission responds immediately with only the job id
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_returns_job_id_without_waiting() {
    let app = common::build_test_app();

    let response = post_json(app.clone(), "/api/generate/create", demo_request()).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert!(json["jobId"].is_string());
    assert_eq!(json.as_object().unwrap().len(), 1);

    // The job is visible right away (it may even have finished already
    // with the millisecond pacing used in tests).
    let job_id = json["jobId"].as_str().unwrap();
    let status = body_json(get(app, &format!("/api/job/{job_id}/status")).await).await;
    assert!(matches!(
        status["status"].as_str().unwrap(),
        "running" | "done"
    ));
}

// ---------------------------------------------------------------------------
// Test: tempo outside [40, 220] is rejected
// ---------------------------------------------------------------------------

#[tokio::test]
async fn out_of_range_bpm_is_rejected() {
    let app = common::build_test_app();

    for bpm in [10, 300] {
        let mut body = demo_request();
        body["bpm"] = json!(bpm);

        let response = post_json(app.clone(), "/api/generate/create", body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = body_json(response).await;
        assert_eq!(json["code"], "VALIDATION_ERROR");
    }
}

// ---------------------------------------------------------------------------
// Test: stage endpoints answer with the prompt and tempo
// ---------------------------------------------------------------------------

#[tokio::test]
async fn stage_endpoints_return_prompt_and_bpm() {
    let app = common::build_test_app();

    for path in [
        "/api/generate/instrumental",
        "/api/generate/melody",
        "/api/generate/video",
        "/api/synthesize/vocal",
        "/api/mix",
    ] {
        let response = post_json(app.clone(), path, demo_request()).await;
        assert_eq!(response.status(), StatusCode::OK, "{path}");

        let json = body_json(response).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["bpm"], 90);
        // Empty prompt library degrades to an empty template.
        assert_eq!(json["prompt"], json!({}));
    }
}
