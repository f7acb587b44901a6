use std::sync::Arc;

use notekeeper_core::service::NoteService;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Note business rules over the configured repository.
    pub notes: NoteService,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
