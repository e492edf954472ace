//! Voice sample upload and removal.

use axum::extract::{Multipart, Path};
use axum::routing::{delete, post};
use axum::{Json, Router};
use serde::Serialize;
use serde_json::{json, Value};
use uuid::Uuid;

use blueflame_core::voice::{validate_voice_clip, VoiceQuality};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// One accepted clip with its quality report.
#[derive(Debug, Serialize)]
pub struct ProcessedFile {
    pub filename: String,
    pub quality: VoiceQuality,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceUploadResponse {
    pub voice_profile_id: Uuid,
    pub processed_files: Vec<ProcessedFile>,
    /// Quality of the first accepted clip.
    pub quality_report: Option<VoiceQuality>,
}

/// POST /api/upload/voice
///
/// Multipart upload of one or more voice clips under the `files` field.
/// Every clip must pass validation; the first rejection fails the whole
/// request with a 400 and a human-readable reason.
pub async fn upload_voice(mut multipart: Multipart) -> AppResult<Json<VoiceUploadResponse>> {
    let mut processed: Vec<ProcessedFile> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some("files") {
            continue; // ignore unknown fields
        }

        let filename = field.file_name().unwrap_or("clip").to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;

        let quality = validate_voice_clip(&filename, &data)?;
        processed.push(ProcessedFile { filename, quality });
    }

    if processed.is_empty() {
        return Err(AppError::BadRequest(
            "Missing required 'files' field".into(),
        ));
    }

    tracing::info!(clips = processed.len(), "Voice clips accepted");

    Ok(Json(VoiceUploadResponse {
        voice_profile_id: Uuid::new_v4(),
        quality_report: Some(processed[0].quality.clone()),
        processed_files: processed,
    }))
}

/// DELETE /api/voice/{voice_id}
///
/// Voice profiles have no server-side storage; deletion is acknowledged
/// unconditionally.
pub async fn delete_voice(Path(voice_id): Path<String>) -> Json<Value> {
    Json(json!({ "deleted": true, "voice_id": voice_id }))
}

/// Routes mounted at `/api`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/upload/voice", post(upload_voice))
        .route("/voice/{voice_id}", delete(delete_voice))
}
