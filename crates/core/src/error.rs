use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// The backing store failed (connectivity, constraint violation, ...).
    #[error("Storage error: {0}")]
    Storage(String),
}

/// Convenience alias used across the repository traits and the service.
pub type CoreResult<T> = Result<T, CoreError>;
