//! Integration tests for voice clip upload validation.

mod common;

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Request, StatusCode};
use axum::Router;
use common::body_json;
use tower::ServiceExt;

const BOUNDARY: &str = "blueflame-test-boundary";

/// Build a single-file `files` multipart body.
fn multipart_body(filename: &str, bytes: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"files\"; \
             filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

async fn upload(app: Router, filename: &str, bytes: &[u8]) -> axum::http::Response<Body> {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri("/api/upload/voice")
            .header(
                CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(multipart_body(filename, bytes)))
            .unwrap(),
    )
    .await
    .unwrap()
}

// ---------------------------------------------------------------------------
// Test: undersized clips are "too short" regardless of extension
// ---------------------------------------------------------------------------

#[tokio::test]
async fn short_clip_rejected_regardless_of_extension() {
    for filename in ["clip.wav", "clip.txt"] {
        let app = common::build_test_app();
        let response = upload(app, filename, &[0u8; 100]).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{filename}");
        let json = body_json(response).await;
        assert!(
            json["error"].as_str().unwrap().contains("too short"),
            "{filename}: {json}"
        );
    }
}

// ---------------------------------------------------------------------------
// Test: unsupported formats are rejected regardless of size
// ---------------------------------------------------------------------------

#[tokio::test]
async fn txt_upload_rejected_regardless_of_size() {
    let app = common::build_test_app();
    let response = upload(app, "lyrics.txt", &[0u8; 20_000]).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("Unsupported format"));
}

// ---------------------------------------------------------------------------
// Test: a valid clip yields a profile id and quality report
// ---------------------------------------------------------------------------

#[tokio::test]
async fn valid_clip_is_accepted_with_quality_report() {
    let app = common::build_test_app();
    let response = upload(app, "sample.wav", &[0u8; 64_000]).await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert!(json["voiceProfileId"].is_string());
    assert_eq!(json["processedFiles"][0]["filename"], "sample.wav");
    assert_eq!(json["qualityReport"]["sampleRate"], 44100);
    assert_eq!(json["qualityReport"]["durationMs"], 1000);
    assert_eq!(json["qualityReport"]["clipping"], false);
}

// ---------------------------------------------------------------------------
// Test: upload with no files field is a bad request
// ---------------------------------------------------------------------------

#[tokio::test]
async fn upload_without_files_field_is_rejected() {
    let app = common::build_test_app();
    let body = format!("--{BOUNDARY}--\r\n");

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/upload/voice")
                .header(
                    CONTENT_TYPE,
                    format!("multipart/form-data; boundary={BOUNDARY}"),
                )
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Test: voice profile deletion is acknowledged
// ---------------------------------------------------------------------------

#[tokio::test]
async fn delete_voice_acknowledges() {
    let app = common::build_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/voice/some-profile-id")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["deleted"], true);
    assert_eq!(json["voice_id"], "some-profile-id");
}
