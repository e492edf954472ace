//! Voice clip upload validation.
//!
//! Uploaded clips must be one of the supported formats and long enough to
//! be usable for voice adaptation. Accepted clips get a canned quality
//! report; no real audio analysis is performed in this simulation.

use serde::Serialize;

use crate::error::CoreError;

/// Supported voice clip extensions (lowercase, no dot).
pub const SUPPORTED_VOICE_EXTENSIONS: &[&str] = &["wav", "mp3", "amr"];

/// Clips below this byte length are roughly under half a second of audio
/// and are rejected outright.
pub const MIN_CLIP_BYTES: usize = 8000;

/// Quality report for an accepted voice clip.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceQuality {
    pub sample_rate: u32,
    pub duration_ms: u64,
    pub clipping: bool,
}

/// Validate an uploaded voice clip and produce its quality report.
///
/// Byte length is checked before the extension, so an undersized clip is
/// always reported as "too short" no matter what it is named.
pub fn validate_voice_clip(filename: &str, data: &[u8]) -> Result<VoiceQuality, CoreError> {
    if data.len() < MIN_CLIP_BYTES {
        return Err(CoreError::Validation(
            "File too short (<0.5s). Please upload longer clips.".into(),
        ));
    }

    let ext = filename.rsplit('.').next().unwrap_or("").to_lowercase();
    if !SUPPORTED_VOICE_EXTENSIONS.contains(&ext.as_str()) {
        return Err(CoreError::Validation(
            "Unsupported format. Please upload .wav, .mp3, or .amr".into(),
        ));
    }

    Ok(VoiceQuality {
        sample_rate: 44100,
        duration_ms: (data.len() as u64 / 64).max(600),
        clipping: false,
    })
}
