//! Note entity and its wire shapes.

use serde::{Deserialize, Serialize};

use crate::types::{DbId, Timestamp};

/// Entity name used in not-found errors.
pub const NOTE_ENTITY: &str = "Note";

/// A persisted note, as returned by every read and write operation.
///
/// Serialized with camelCase keys; this is the response body of the HTTP API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: DbId,
    pub title: String,
    pub content: Option<String>,
    pub created_at: Timestamp,
    pub last_modified_at: Timestamp,
    pub archived: bool,
}

impl Note {
    /// The record to hand back to `save` after an in-place mutation.
    pub fn to_record(&self) -> NoteRecord {
        NoteRecord {
            id: Some(self.id),
            title: self.title.clone(),
            content: self.content.clone(),
            archived: self.archived,
        }
    }
}

/// Request body for create and update.
///
/// Only `title` and `content` are accepted; any other key in the payload
/// (`id`, `archived`, timestamps) is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteRequest {
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
}

/// Writable state of a note, passed to `NoteTransaction::save`.
///
/// `id == None` inserts a new row; `Some(id)` overwrites the existing one.
/// Identity and timestamps are always assigned by the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteRecord {
    pub id: Option<DbId>,
    pub title: String,
    pub content: Option<String>,
    pub archived: bool,
}

impl From<NoteRequest> for NoteRecord {
    fn from(request: NoteRequest) -> Self {
        Self {
            id: None,
            title: request.title,
            content: request.content,
            archived: false,
        }
    }
}
