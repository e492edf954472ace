use std::sync::Arc;

use blueflame_core::prompts::PromptLibrary;
use blueflame_pipeline::backend::GenerationBackend;
use blueflame_pipeline::store::JobStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// In-memory job store, shared with the simulator tasks and sweeper.
    pub jobs: Arc<JobStore>,
    /// Prompt template library, loaded once at startup.
    pub prompts: Arc<PromptLibrary>,
    /// Generation backend (mock or real, selected by configuration).
    pub backend: Arc<dyn GenerationBackend>,
}
