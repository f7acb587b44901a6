//! Domain layer of the notekeeper backend.
//!
//! Holds the [`note::Note`] entity and its wire shapes, the repository
//! traits the persistence layer implements, the [`service::NoteService`]
//! business rules, and an in-memory repository used by tests and by the
//! `NOTES_STORE=memory` server mode.

pub mod error;
pub mod memory;
pub mod note;
pub mod repository;
pub mod service;
pub mod types;
