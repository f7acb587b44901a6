//! Storage boundary between the domain service and the persistence layer.
//!
//! Reads go straight through [`NoteRepository`]. Every mutation runs inside a
//! [`NoteTransaction`] obtained from [`NoteRepository::begin`]; dropping a
//! transaction without calling [`NoteTransaction::commit`] rolls it back.

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::note::{Note, NoteRecord};
use crate::types::DbId;

/// Read access to the note store plus the entry point for transactions.
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// Fetch a note by id.
    async fn find_by_id(&self, id: DbId) -> CoreResult<Option<Note>>;

    /// All notes with the given archived flag, in ascending id order.
    async fn find_by_archived(&self, archived: bool) -> CoreResult<Vec<Note>>;

    /// Verify the store is reachable.
    async fn health_check(&self) -> CoreResult<()>;

    /// Open a transaction for a read-modify-write sequence.
    async fn begin(&self) -> CoreResult<Box<dyn NoteTransaction>>;
}

/// A single atomic unit of work against the note store.
#[async_trait]
pub trait NoteTransaction: Send {
    /// Insert (`record.id == None`) or overwrite (`Some(id)`) a note.
    ///
    /// Assigns the id and `created_at` on insert and refreshes
    /// `last_modified_at` on every call. Overwriting a missing id fails with
    /// `CoreError::NotFound`.
    async fn save(&mut self, record: NoteRecord) -> CoreResult<Note>;

    /// Fetch a note by id, locking it for the rest of the transaction.
    async fn find_by_id(&mut self, id: DbId) -> CoreResult<Option<Note>>;

    /// Check whether a note exists.
    async fn exists_by_id(&mut self, id: DbId) -> CoreResult<bool>;

    /// Permanently delete a note. Deleting a missing id is a no-op.
    async fn delete_by_id(&mut self, id: DbId) -> CoreResult<()>;

    /// Make every change in this transaction visible.
    async fn commit(self: Box<Self>) -> CoreResult<()>;
}
