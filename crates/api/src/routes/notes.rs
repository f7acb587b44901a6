//! Route definitions for the notes resource.
//!
//! Mounted at `/notes` by `api_routes()`.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::notes;
use crate::state::AppState;

/// Note routes.
///
/// ```text
/// POST   /                   -> create_note
/// GET    /active             -> list_active_notes
/// GET    /archived           -> list_archived_notes
/// GET    /{id}               -> get_note
/// PUT    /{id}               -> update_note
/// DELETE /{id}               -> delete_note
/// PUT    /{id}/archive       -> archive_note
/// PUT    /{id}/unarchive     -> unarchive_note
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(notes::create_note))
        .route("/active", get(notes::list_active_notes))
        .route("/archived", get(notes::list_archived_notes))
        .route(
            "/{id}",
            get(notes::get_note)
                .put(notes::update_note)
                .delete(notes::delete_note),
        )
        .route("/{id}/archive", put(notes::archive_note))
        .route("/{id}/unarchive", put(notes::unarchive_note))
}
