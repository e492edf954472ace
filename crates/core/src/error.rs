#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Generation backend not implemented: {0}")]
    UnimplementedBackend(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
