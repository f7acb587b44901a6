//! In-memory [`NoteRepository`] for tests and database-less runs.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::error::{CoreError, CoreResult};
use crate::note::{Note, NoteRecord, NOTE_ENTITY};
use crate::repository::{NoteRepository, NoteTransaction};
use crate::types::{DbId, Timestamp};

#[derive(Debug, Default, Clone)]
struct MemoryState {
    notes: BTreeMap<DbId, Note>,
    /// Last identity handed out. Never decremented, so ids are not reused.
    last_id: DbId,
}

/// Note store backed by a `BTreeMap` behind an async mutex.
///
/// A transaction holds the mutex for its whole lifetime and works on a copy
/// of the state, which replaces the shared state on commit. Transactions are
/// therefore fully serialized.
#[derive(Debug, Clone, Default)]
pub struct InMemoryNoteRepository {
    state: Arc<Mutex<MemoryState>>,
}

impl InMemoryNoteRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NoteRepository for InMemoryNoteRepository {
    async fn find_by_id(&self, id: DbId) -> CoreResult<Option<Note>> {
        Ok(self.state.lock().await.notes.get(&id).cloned())
    }

    async fn find_by_archived(&self, archived: bool) -> CoreResult<Vec<Note>> {
        let state = self.state.lock().await;
        Ok(state
            .notes
            .values()
            .filter(|note| note.archived == archived)
            .cloned()
            .collect())
    }

    async fn health_check(&self) -> CoreResult<()> {
        Ok(())
    }

    async fn begin(&self) -> CoreResult<Box<dyn NoteTransaction>> {
        let guard = Arc::clone(&self.state).lock_owned().await;
        let staged = guard.clone();
        Ok(Box::new(InMemoryTransaction { guard, staged }))
    }
}

struct InMemoryTransaction {
    guard: OwnedMutexGuard<MemoryState>,
    staged: MemoryState,
}

/// Current time, clamped so it never precedes `previous`.
fn next_timestamp(previous: Option<Timestamp>) -> Timestamp {
    let now = Utc::now();
    match previous {
        Some(previous) if previous > now => previous,
        _ => now,
    }
}

#[async_trait]
impl NoteTransaction for InMemoryTransaction {
    async fn save(&mut self, record: NoteRecord) -> CoreResult<Note> {
        match record.id {
            None => {
                self.staged.last_id += 1;
                let id = self.staged.last_id;
                let now = next_timestamp(None);
                let note = Note {
                    id,
                    title: record.title,
                    content: record.content,
                    created_at: now,
                    last_modified_at: now,
                    archived: record.archived,
                };
                self.staged.notes.insert(id, note.clone());
                Ok(note)
            }
            Some(id) => {
                let note = self
                    .staged
                    .notes
                    .get_mut(&id)
                    .ok_or(CoreError::NotFound {
                        entity: NOTE_ENTITY,
                        id,
                    })?;
                note.title = record.title;
                note.content = record.content;
                note.archived = record.archived;
                note.last_modified_at = next_timestamp(Some(note.last_modified_at));
                Ok(note.clone())
            }
        }
    }

    async fn find_by_id(&mut self, id: DbId) -> CoreResult<Option<Note>> {
        Ok(self.staged.notes.get(&id).cloned())
    }

    async fn exists_by_id(&mut self, id: DbId) -> CoreResult<bool> {
        Ok(self.staged.notes.contains_key(&id))
    }

    async fn delete_by_id(&mut self, id: DbId) -> CoreResult<()> {
        self.staged.notes.remove(&id);
        Ok(())
    }

    async fn commit(self: Box<Self>) -> CoreResult<()> {
        let InMemoryTransaction { mut guard, staged } = *self;
        *guard = staged;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn record(title: &str) -> NoteRecord {
        NoteRecord {
            id: None,
            title: title.to_string(),
            content: None,
            archived: false,
        }
    }

    async fn insert(repo: &InMemoryNoteRepository, title: &str) -> Note {
        let mut tx = repo.begin().await.unwrap();
        let note = tx.save(record(title)).await.unwrap();
        tx.commit().await.unwrap();
        note
    }

    #[tokio::test]
    async fn insert_assigns_sequential_ids_and_equal_timestamps() {
        let repo = InMemoryNoteRepository::new();

        let first = insert(&repo, "first").await;
        let second = insert(&repo, "second").await;

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(first.created_at, first.last_modified_at);
        assert!(!first.archived);
    }

    #[tokio::test]
    async fn uncommitted_transaction_is_rolled_back() {
        let repo = InMemoryNoteRepository::new();

        {
            let mut tx = repo.begin().await.unwrap();
            tx.save(record("discarded")).await.unwrap();
        }

        assert_eq!(repo.find_by_id(1).await.unwrap(), None);
        assert!(repo.find_by_archived(false).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn deleted_ids_are_not_reused() {
        let repo = InMemoryNoteRepository::new();
        let note = insert(&repo, "gone").await;

        let mut tx = repo.begin().await.unwrap();
        tx.delete_by_id(note.id).await.unwrap();
        tx.commit().await.unwrap();

        let next = insert(&repo, "next").await;
        assert_eq!(next.id, note.id + 1);
    }

    #[tokio::test]
    async fn save_of_missing_id_is_not_found() {
        let repo = InMemoryNoteRepository::new();
        let mut tx = repo.begin().await.unwrap();

        let result = tx
            .save(NoteRecord {
                id: Some(42),
                ..record("ghost")
            })
            .await;

        assert_matches!(result, Err(CoreError::NotFound { id: 42, .. }));
    }

    #[tokio::test]
    async fn overwrite_keeps_created_at_and_advances_last_modified() {
        let repo = InMemoryNoteRepository::new();
        let note = insert(&repo, "draft").await;
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;

        let mut tx = repo.begin().await.unwrap();
        let mut changed = note.to_record();
        changed.title = "final".into();
        changed.archived = true;
        let saved = tx.save(changed).await.unwrap();
        tx.commit().await.unwrap();

        assert_eq!(saved.created_at, note.created_at);
        assert!(saved.last_modified_at > note.last_modified_at);
        assert_eq!(saved.title, "final");
        assert!(saved.archived);
    }

    #[tokio::test]
    async fn find_by_archived_partitions_in_id_order() {
        let repo = InMemoryNoteRepository::new();
        let a = insert(&repo, "a").await;
        let b = insert(&repo, "b").await;
        let c = insert(&repo, "c").await;

        let mut tx = repo.begin().await.unwrap();
        let mut archived = b.to_record();
        archived.archived = true;
        tx.save(archived).await.unwrap();
        tx.commit().await.unwrap();

        let active: Vec<_> = repo
            .find_by_archived(false)
            .await
            .unwrap()
            .into_iter()
            .map(|n| n.id)
            .collect();
        let archived: Vec<_> = repo
            .find_by_archived(true)
            .await
            .unwrap()
            .into_iter()
            .map(|n| n.id)
            .collect();

        assert_eq!(active, vec![a.id, c.id]);
        assert_eq!(archived, vec![b.id]);
    }

    #[test]
    fn next_timestamp_never_moves_backwards() {
        let future = Utc::now() + chrono::Duration::hours(1);
        assert_eq!(next_timestamp(Some(future)), future);
    }
}
