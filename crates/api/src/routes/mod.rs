pub mod health;
pub mod notes;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree (mounted by [`crate::router::build_app_router`]).
///
/// ```text
/// /notes                     create (POST)
/// /notes/active              list active (GET)
/// /notes/archived            list archived (GET)
/// /notes/{id}                get, update, delete
/// /notes/{id}/archive        archive (PUT)
/// /notes/{id}/unarchive      unarchive (PUT)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/notes", notes::router())
}
