//! Note collection persistence over a key-value storage entry.
//!
//! # Responsibility
//! - Persist all notes as one JSON array under one storage key.
//! - Provide full read-modify-write CRUD over that collection.
//!
//! # Invariants
//! - The stored array never holds two notes with the same `id`.
//! - Persisted order is insertion/update order (new notes at the head);
//!   `load_all` re-sorts by `updated_at DESC` for callers.
//! - `load_all` never fails: absent, unreadable or corrupt data reads as
//!   an empty list and is not logged.
//! - `save`/`delete` propagate read and write failures unchanged.
//! - No locking: callers serialize operations on one store.

use crate::kv::{KvError, KvStorage};
use crate::logging::{log_store_event, StoreOp};
use crate::model::note::{now_epoch_ms, Note, NoteValidationError};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub type StoreResult<T> = Result<T, StoreError>;

/// Error for note store write paths.
#[derive(Debug)]
pub enum StoreError {
    Validation(NoteValidationError),
    Storage(KvError),
    /// The stored blob exists but is not a JSON note array.
    Corrupt(serde_json::Error),
    Serialize(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "invalid note: {err}"),
            Self::Storage(err) => write!(f, "{err}"),
            Self::Corrupt(err) => write!(f, "stored note collection is corrupt: {err}"),
            Self::Serialize(err) => write!(f, "failed to serialize notes: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Storage(err) => Some(err),
            Self::Corrupt(err) | Self::Serialize(err) => Some(err),
        }
    }
}

impl From<NoteValidationError> for StoreError {
    fn from(value: NoteValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<KvError> for StoreError {
    fn from(value: KvError) -> Self {
        Self::Storage(value)
    }
}

/// Repository interface for note CRUD.
pub trait NoteRepository {
    /// All notes, newest `updated_at` first. Empty on any read failure.
    fn load_all(&self) -> Vec<Note>;
    /// Inserts or replaces the note with the same id.
    fn save(&mut self, note: &Note) -> StoreResult<()>;
    /// Removes the note with this id; missing ids are a no-op.
    fn delete(&mut self, id: &str) -> StoreResult<()>;
    /// Fresh, unsaved note stamped at `now` (epoch ms).
    fn create_new_at(&self, now: i64) -> Note {
        Note::new_at(now)
    }
    /// Fresh, unsaved note stamped with the wall clock.
    fn create_new(&self) -> Note {
        self.create_new_at(now_epoch_ms())
    }
}

/// Note store bound to one storage key.
pub struct NoteStore<S: KvStorage> {
    storage: S,
    key: String,
}

impl<S: KvStorage> NoteStore<S> {
    /// Creates a store handle persisting under `key`.
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        self.key.as_str()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Reads the collection in persisted order, surfacing failures.
    ///
    /// A blank value reads like an absent key.
    fn read_collection(&self) -> StoreResult<Vec<Note>> {
        match self.storage.get_item(self.key.as_str())? {
            Some(raw) if raw.trim().is_empty() => Ok(Vec::new()),
            Some(raw) => serde_json::from_str(raw.as_str()).map_err(StoreError::Corrupt),
            None => Ok(Vec::new()),
        }
    }

    fn write_collection(&mut self, notes: &[Note]) -> StoreResult<()> {
        let raw = serde_json::to_string(notes).map_err(StoreError::Serialize)?;
        self.storage.set_item(self.key.as_str(), raw.as_str())?;
        Ok(())
    }

    fn upsert(&mut self, note: &Note) -> StoreResult<usize> {
        note.validate()?;
        let mut notes = self.read_collection()?;
        match notes.iter_mut().find(|existing| existing.id == note.id) {
            Some(existing) => *existing = note.clone(),
            None => notes.insert(0, note.clone()),
        }
        self.write_collection(&notes)?;
        Ok(notes.len())
    }

    fn remove(&mut self, id: &str) -> StoreResult<usize> {
        let mut notes = self.read_collection()?;
        let before = notes.len();
        notes.retain(|note| note.id != id);
        let removed = before - notes.len();
        self.write_collection(&notes)?;
        Ok(removed)
    }
}

impl<S: KvStorage> NoteRepository for NoteStore<S> {
    fn load_all(&self) -> Vec<Note> {
        let mut notes = self.read_collection().unwrap_or_default();
        notes.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        notes
    }

    fn save(&mut self, note: &Note) -> StoreResult<()> {
        let started_at = Instant::now();
        let result = self.upsert(note);
        let elapsed = started_at.elapsed();
        match &result {
            Ok(total) => {
                let counts = [("strokes", note.strokes.len()), ("total", *total)];
                log_store_event(StoreOp::Save, &note.id, elapsed, Ok(&counts[..]));
            }
            Err(err) => {
                let err: &dyn Display = err;
                log_store_event(StoreOp::Save, &note.id, elapsed, Err(err));
            }
        }
        result.map(|_| ())
    }

    fn delete(&mut self, id: &str) -> StoreResult<()> {
        let started_at = Instant::now();
        let result = self.remove(id);
        let elapsed = started_at.elapsed();
        match &result {
            Ok(removed) => {
                let counts = [("removed", *removed)];
                log_store_event(StoreOp::Delete, id, elapsed, Ok(&counts[..]));
            }
            Err(err) => {
                let err: &dyn Display = err;
                log_store_event(StoreOp::Delete, id, elapsed, Err(err));
            }
        }
        result.map(|_| ())
    }
}
