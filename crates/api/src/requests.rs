//! Shared request body types.

use serde::Deserialize;
use serde_json::Value;
use validator::Validate;

use blueflame_core::error::CoreError;

use crate::error::{AppError, AppResult};

/// Body accepted by the project and generation endpoints.
///
/// `voice` and `tracks` are deliberately untyped: their shapes belong to the
/// generation service and are passed through unchanged.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SongRequest {
    /// Tempo in beats per minute.
    #[serde(default = "default_bpm")]
    #[validate(range(min = 40, max = 220, message = "bpm must be between 40 and 220"))]
    pub bpm: u16,
    pub lyrics: String,
    pub voice: Value,
    #[serde(default)]
    pub moods: Vec<String>,
    #[serde(default)]
    pub tracks: Vec<Value>,
    /// Set when the request extends an existing project.
    #[serde(default)]
    pub project_id: Option<String>,
}

fn default_bpm() -> u16 {
    90
}

impl SongRequest {
    /// Run field validation, mapping failures to a 400-equivalent.
    pub fn validated(self) -> AppResult<Self> {
        self.validate()
            .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;
        Ok(self)
    }
}
