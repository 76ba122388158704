//! Domain model for drawing notes.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Keep the JSON field layout stable for the persisted note blob.
//!
//! # Invariants
//! - Every note is identified by a stable `NoteId`.
//! - Deletion is a hard delete; there are no tombstones.

pub mod note;
pub mod stroke;
