//! Repository for the `notes` table.

use async_trait::async_trait;
use sqlx::{FromRow, PgPool, Postgres, Transaction};

use notekeeper_core::error::{CoreError, CoreResult};
use notekeeper_core::note::{Note, NoteRecord, NOTE_ENTITY};
use notekeeper_core::repository::{NoteRepository, NoteTransaction};
use notekeeper_core::types::{DbId, Timestamp};

/// Column list for notes queries.
const COLUMNS: &str = "id, title, content, created_at, last_modified_at, archived";

/// A row from the `notes` table.
#[derive(Debug, FromRow)]
struct NoteRow {
    id: DbId,
    title: String,
    content: Option<String>,
    created_at: Timestamp,
    last_modified_at: Timestamp,
    archived: bool,
}

impl From<NoteRow> for Note {
    fn from(row: NoteRow) -> Self {
        Note {
            id: row.id,
            title: row.title,
            content: row.content,
            created_at: row.created_at,
            last_modified_at: row.last_modified_at,
            archived: row.archived,
        }
    }
}

/// Log a sqlx error and convert it into a domain storage error.
fn storage_error(err: sqlx::Error) -> CoreError {
    tracing::error!(error = %err, "Database error");
    CoreError::Storage(err.to_string())
}

/// PostgreSQL implementation of [`NoteRepository`].
#[derive(Clone)]
pub struct PgNoteRepository {
    pool: PgPool,
}

impl PgNoteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NoteRepository for PgNoteRepository {
    async fn find_by_id(&self, id: DbId) -> CoreResult<Option<Note>> {
        let query = format!("SELECT {COLUMNS} FROM notes WHERE id = $1");
        let row = sqlx::query_as::<_, NoteRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error)?;
        Ok(row.map(Note::from))
    }

    async fn find_by_archived(&self, archived: bool) -> CoreResult<Vec<Note>> {
        let query = format!("SELECT {COLUMNS} FROM notes WHERE archived = $1 ORDER BY id ASC");
        let rows = sqlx::query_as::<_, NoteRow>(&query)
            .bind(archived)
            .fetch_all(&self.pool)
            .await
            .map_err(storage_error)?;
        Ok(rows.into_iter().map(Note::from).collect())
    }

    async fn health_check(&self) -> CoreResult<()> {
        crate::health_check(&self.pool).await.map_err(storage_error)
    }

    async fn begin(&self) -> CoreResult<Box<dyn NoteTransaction>> {
        let tx = self.pool.begin().await.map_err(storage_error)?;
        Ok(Box::new(PgNoteTransaction { tx }))
    }
}

/// A note transaction over a pooled PostgreSQL connection.
///
/// Dropping it without commit rolls back, as `sqlx::Transaction` does.
struct PgNoteTransaction {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl NoteTransaction for PgNoteTransaction {
    async fn save(&mut self, record: NoteRecord) -> CoreResult<Note> {
        match record.id {
            None => {
                let query = format!(
                    "INSERT INTO notes (title, content, archived)
                     VALUES ($1, $2, $3)
                     RETURNING {COLUMNS}"
                );
                let row = sqlx::query_as::<_, NoteRow>(&query)
                    .bind(&record.title)
                    .bind(&record.content)
                    .bind(record.archived)
                    .fetch_one(&mut *self.tx)
                    .await
                    .map_err(storage_error)?;
                Ok(row.into())
            }
            Some(id) => {
                // NOW() is the transaction start time; last_modified_at must not regress.
                let query = format!(
                    "UPDATE notes SET
                        title = $2,
                        content = $3,
                        archived = $4,
                        last_modified_at = GREATEST(NOW(), last_modified_at)
                     WHERE id = $1
                     RETURNING {COLUMNS}"
                );
                let row = sqlx::query_as::<_, NoteRow>(&query)
                    .bind(id)
                    .bind(&record.title)
                    .bind(&record.content)
                    .bind(record.archived)
                    .fetch_optional(&mut *self.tx)
                    .await
                    .map_err(storage_error)?;
                row.map(Note::from).ok_or(CoreError::NotFound {
                    entity: NOTE_ENTITY,
                    id,
                })
            }
        }
    }

    async fn find_by_id(&mut self, id: DbId) -> CoreResult<Option<Note>> {
        let query = format!("SELECT {COLUMNS} FROM notes WHERE id = $1 FOR UPDATE");
        let row = sqlx::query_as::<_, NoteRow>(&query)
            .bind(id)
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(storage_error)?;
        Ok(row.map(Note::from))
    }

    async fn exists_by_id(&mut self, id: DbId) -> CoreResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM notes WHERE id = $1)")
            .bind(id)
            .fetch_one(&mut *self.tx)
            .await
            .map_err(storage_error)
    }

    async fn delete_by_id(&mut self, id: DbId) -> CoreResult<()> {
        sqlx::query("DELETE FROM notes WHERE id = $1")
            .bind(id)
            .execute(&mut *self.tx)
            .await
            .map_err(storage_error)?;
        Ok(())
    }

    async fn commit(self: Box<Self>) -> CoreResult<()> {
        self.tx.commit().await.map_err(storage_error)
    }
}
