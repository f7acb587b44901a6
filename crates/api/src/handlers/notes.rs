//! Handlers for the notes resource.
//!
//! Each handler delegates to [`NoteService`](notekeeper_core::service::NoteService)
//! and turns an absent result into a 404. Bodies are returned unwrapped: the
//! note (or list of notes) is the whole JSON payload.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use notekeeper_core::error::CoreError;
use notekeeper_core::note::{NoteRequest, NOTE_ENTITY};
use notekeeper_core::types::DbId;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: NOTE_ENTITY,
        id,
    })
}

/// POST /notes
///
/// Create a new note.
pub async fn create_note(
    State(state): State<AppState>,
    Json(input): Json<NoteRequest>,
) -> AppResult<impl IntoResponse> {
    let note = state.notes.create(input).await?;
    Ok((StatusCode::CREATED, Json(note)))
}

/// GET /notes/{id}
pub async fn get_note(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let note = state.notes.get_by_id(id).await?.ok_or_else(|| not_found(id))?;
    Ok(Json(note))
}

/// GET /notes/active
pub async fn list_active_notes(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let notes = state.notes.list_active().await?;
    Ok(Json(notes))
}

/// GET /notes/archived
pub async fn list_archived_notes(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let notes = state.notes.list_archived().await?;
    Ok(Json(notes))
}

/// PUT /notes/{id}
///
/// Replace title and content. The archived flag is not affected.
pub async fn update_note(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<NoteRequest>,
) -> AppResult<impl IntoResponse> {
    let note = state
        .notes
        .update(id, input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(note))
}

/// PUT /notes/{id}/archive
pub async fn archive_note(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let note = state.notes.archive(id).await?.ok_or_else(|| not_found(id))?;
    Ok(Json(note))
}

/// PUT /notes/{id}/unarchive
pub async fn unarchive_note(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let note = state
        .notes
        .unarchive(id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(note))
}

/// DELETE /notes/{id}
pub async fn delete_note(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !state.notes.delete(id).await? {
        return Err(not_found(id));
    }
    Ok(StatusCode::NO_CONTENT)
}
