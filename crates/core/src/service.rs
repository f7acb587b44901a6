//! Note business rules.
//!
//! Absence is reported as a value (`Option` / `bool`), never as an error, so
//! the transport layer decides how to surface it. Every mutation runs inside
//! a single repository transaction.

use std::sync::Arc;

use crate::error::CoreResult;
use crate::note::{Note, NoteRequest, NoteRecord};
use crate::repository::NoteRepository;
use crate::types::DbId;

/// Domain service over a [`NoteRepository`]. Cheap to clone.
#[derive(Clone)]
pub struct NoteService {
    repo: Arc<dyn NoteRepository>,
}

impl NoteService {
    pub fn new(repo: Arc<dyn NoteRepository>) -> Self {
        Self { repo }
    }

    /// Verify the underlying store is reachable.
    pub async fn health_check(&self) -> CoreResult<()> {
        self.repo.health_check().await
    }

    /// Create a new, unarchived note.
    pub async fn create(&self, request: NoteRequest) -> CoreResult<Note> {
        let mut tx = self.repo.begin().await?;
        let note = tx.save(NoteRecord::from(request)).await?;
        tx.commit().await?;

        tracing::info!(note_id = note.id, "Note created");
        Ok(note)
    }

    pub async fn get_by_id(&self, id: DbId) -> CoreResult<Option<Note>> {
        tracing::debug!(note_id = id, "Fetching note");
        self.repo.find_by_id(id).await
    }

    /// Notes with `archived == false`, in insertion order.
    pub async fn list_active(&self) -> CoreResult<Vec<Note>> {
        self.repo.find_by_archived(false).await
    }

    /// Notes with `archived == true`, in insertion order.
    pub async fn list_archived(&self) -> CoreResult<Vec<Note>> {
        self.repo.find_by_archived(true).await
    }

    /// Overwrite title and content. The archived flag is left untouched.
    pub async fn update(&self, id: DbId, request: NoteRequest) -> CoreResult<Option<Note>> {
        let note = self
            .modify(id, |record| {
                record.title = request.title;
                record.content = request.content;
            })
            .await?;

        if note.is_some() {
            tracing::info!(note_id = id, "Note updated");
        }
        Ok(note)
    }

    /// Mark a note archived. Archiving an archived note still succeeds and
    /// refreshes `last_modified_at`.
    pub async fn archive(&self, id: DbId) -> CoreResult<Option<Note>> {
        let note = self.set_archived(id, true).await?;
        if note.is_some() {
            tracing::info!(note_id = id, "Note archived");
        }
        Ok(note)
    }

    /// Mark a note active again. Symmetric to [`NoteService::archive`].
    pub async fn unarchive(&self, id: DbId) -> CoreResult<Option<Note>> {
        let note = self.set_archived(id, false).await?;
        if note.is_some() {
            tracing::info!(note_id = id, "Note unarchived");
        }
        Ok(note)
    }

    /// Permanently delete a note. Returns `false` if it did not exist.
    pub async fn delete(&self, id: DbId) -> CoreResult<bool> {
        let mut tx = self.repo.begin().await?;
        if !tx.exists_by_id(id).await? {
            return Ok(false);
        }
        tx.delete_by_id(id).await?;
        tx.commit().await?;

        tracing::info!(note_id = id, "Note deleted");
        Ok(true)
    }

    async fn set_archived(&self, id: DbId, archived: bool) -> CoreResult<Option<Note>> {
        self.modify(id, |record| record.archived = archived).await
    }

    /// Read, apply `change`, save and commit, all in one transaction.
    async fn modify<F>(&self, id: DbId, change: F) -> CoreResult<Option<Note>>
    where
        F: FnOnce(&mut NoteRecord) + Send,
    {
        let mut tx = self.repo.begin().await?;
        let Some(existing) = tx.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut record = existing.to_record();
        change(&mut record);
        let saved = tx.save(record).await?;
        tx.commit().await?;

        Ok(Some(saved))
    }
}
