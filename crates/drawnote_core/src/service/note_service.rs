//! Note use-case service.
//!
//! # Responsibility
//! - Provide the edit/list/delete flows used by note screens.
//! - Bump `updated_at` on every mutation and persist immediately.
//! - Derive list-card summaries (display title, body preview).
//!
//! # Invariants
//! - A mutation is applied to the caller's note only after the save
//!   succeeded, so in-memory state never runs ahead of storage.
//! - Editing the body of an untitled note derives the title from the
//!   first body line.
//! - Note list order is `updated_at DESC`.

use crate::drawing::capture::{StrokeCapture, StrokeOutcome};
use crate::model::note::{now_epoch_ms, Note};
use crate::model::stroke::Stroke;
use crate::repo::note_store::{NoteRepository, StoreError};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

const TITLE_FROM_BODY_MAX_CHARS: usize = 50;
const PREVIEW_MAX_CHARS: usize = 100;
pub const UNTITLED_LABEL: &str = "(untitled)";
pub const EMPTY_PREVIEW_HINT: &str = "(empty note)";

/// Service error for note use-cases.
#[derive(Debug)]
pub enum NoteServiceError {
    Store(StoreError),
}

impl Display for NoteServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for NoteServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
        }
    }
}

impl From<StoreError> for NoteServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

pub type NoteServiceResult<T> = Result<T, NoteServiceError>;

/// List-card projection of one note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteSummary {
    pub id: String,
    /// Title, or `UNTITLED_LABEL` when blank.
    pub title: String,
    /// Whitespace-collapsed body, or `EMPTY_PREVIEW_HINT` when blank.
    pub preview: String,
    pub updated_at: i64,
    pub stroke_count: usize,
}

/// Note service facade over repository implementations.
pub struct NoteService<R: NoteRepository> {
    repo: R,
    clock: fn() -> i64,
}

impl<R: NoteRepository> NoteService<R> {
    pub fn new(repo: R) -> Self {
        Self::with_clock(repo, now_epoch_ms)
    }

    /// Creates a service that stamps mutations with `clock`.
    pub fn with_clock(repo: R, clock: fn() -> i64) -> Self {
        Self { repo, clock }
    }

    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// New unsaved note from the repository, stamped with the service clock.
    ///
    /// Nothing is persisted until the first edit.
    pub fn create_new(&self) -> Note {
        self.repo.create_new_at((self.clock)())
    }

    /// All notes as list cards, most recently updated first.
    pub fn list_notes(&self) -> Vec<NoteSummary> {
        self.repo.load_all().iter().map(derive_note_preview).collect()
    }

    /// Loads one note by id.
    pub fn get_note(&self, id: &str) -> Option<Note> {
        self.repo.load_all().into_iter().find(|note| note.id == id)
    }

    pub fn update_title(&mut self, note: &mut Note, title: impl Into<String>) -> NoteServiceResult<()> {
        let title = title.into();
        self.commit(note, |next| next.title = title)
    }

    /// Replaces the body; an empty title is derived from the first line.
    pub fn update_body(&mut self, note: &mut Note, body: impl Into<String>) -> NoteServiceResult<()> {
        let body = body.into();
        self.commit(note, |next| {
            if next.title.is_empty() {
                next.title = title_from_body(body.as_str());
            }
            next.body = body;
        })
    }

    pub fn replace_strokes(&mut self, note: &mut Note, strokes: Vec<Stroke>) -> NoteServiceResult<()> {
        self.commit(note, |next| next.strokes = strokes)
    }

    /// Ends the capture's gesture on `note` and persists any change.
    ///
    /// The gesture is consumed even when the save fails.
    pub fn apply_gesture(
        &mut self,
        note: &mut Note,
        capture: &mut StrokeCapture,
    ) -> NoteServiceResult<StrokeOutcome> {
        let mut strokes = note.strokes.clone();
        let outcome = capture.end_stroke(&mut strokes);
        if outcome.changed() {
            self.commit(note, |next| next.strokes = strokes)?;
        }
        Ok(outcome)
    }

    /// Hard-deletes a note; unknown ids are a no-op.
    pub fn delete_note(&mut self, id: &str) -> NoteServiceResult<()> {
        self.repo.delete(id)?;
        Ok(())
    }

    fn commit(&mut self, note: &mut Note, edit: impl FnOnce(&mut Note)) -> NoteServiceResult<()> {
        let mut next = note.clone();
        edit(&mut next);
        next.touch_at((self.clock)());
        self.repo.save(&next)?;
        *note = next;
        Ok(())
    }
}

/// First body line, trimmed and capped at 50 characters.
pub fn title_from_body(body: &str) -> String {
    body.split('\n')
        .next()
        .unwrap_or_default()
        .trim()
        .chars()
        .take(TITLE_FROM_BODY_MAX_CHARS)
        .collect()
}

/// Derives the list-card projection for one note.
///
/// Rules:
/// - `title`: stored title, or `UNTITLED_LABEL` when blank.
/// - `preview`: body with whitespace runs collapsed, first 100 chars, or
///   `EMPTY_PREVIEW_HINT` when blank.
pub fn derive_note_preview(note: &Note) -> NoteSummary {
    let title = match note.title.trim() {
        "" => UNTITLED_LABEL.to_string(),
        trimmed => trimmed.to_string(),
    };
    let collapsed = WHITESPACE_RE.replace_all(note.body.as_str(), " ");
    let preview = match collapsed.trim() {
        "" => EMPTY_PREVIEW_HINT.to_string(),
        trimmed => trimmed.chars().take(PREVIEW_MAX_CHARS).collect(),
    };

    NoteSummary {
        id: note.id.clone(),
        title,
        preview,
        updated_at: note.updated_at,
        stroke_count: note.strokes.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        derive_note_preview, title_from_body, NoteService, EMPTY_PREVIEW_HINT, UNTITLED_LABEL,
    };
    use crate::kv::MemoryKvStorage;
    use crate::model::note::Note;
    use crate::repo::note_store::{NoteRepository, NoteStore, StoreResult};

    struct FixedIdRepo;

    impl NoteRepository for FixedIdRepo {
        fn load_all(&self) -> Vec<Note> {
            Vec::new()
        }

        fn save(&mut self, _note: &Note) -> StoreResult<()> {
            Ok(())
        }

        fn delete(&mut self, _id: &str) -> StoreResult<()> {
            Ok(())
        }

        fn create_new_at(&self, now: i64) -> Note {
            Note::with_id("fixed", now)
        }
    }

    #[test]
    fn create_new_comes_from_the_repository_at_service_time() {
        let service = NoteService::with_clock(FixedIdRepo, || 42);
        let note = service.create_new();
        assert_eq!(note.id, "fixed");
        assert_eq!((note.created_at, note.updated_at), (42, 42));
    }

    #[test]
    fn create_new_leaves_the_store_untouched() {
        let service = NoteService::with_clock(NoteStore::new(MemoryKvStorage::new(), "k"), || 7);
        let note = service.create_new();
        assert!(note.id.starts_with("note_"));
        assert_eq!(note.created_at, 7);
        assert!(service.repo().load_all().is_empty());
        assert!(service.repo().storage().raw("k").is_none());
    }

    #[test]
    fn title_from_body_takes_trimmed_first_line() {
        assert_eq!(title_from_body("  Groceries \nmilk\neggs"), "Groceries");
        assert_eq!(title_from_body("\nsecond line"), "");
        let long = "x".repeat(80);
        assert_eq!(title_from_body(&long).chars().count(), 50);
    }

    #[test]
    fn preview_falls_back_for_blank_notes() {
        let note = Note::with_id("n1", 1);
        let summary = derive_note_preview(&note);
        assert_eq!(summary.title, UNTITLED_LABEL);
        assert_eq!(summary.preview, EMPTY_PREVIEW_HINT);
        assert_eq!(summary.stroke_count, 0);
    }

    #[test]
    fn preview_collapses_whitespace_and_limits_length() {
        let mut note = Note::with_id("n1", 1);
        note.title = "Trip".to_string();
        note.body = format!("day one\n\n\tpacked   bags {}", "y".repeat(200));
        let summary = derive_note_preview(&note);
        assert_eq!(summary.title, "Trip");
        assert!(summary.preview.starts_with("day one packed bags y"));
        assert_eq!(summary.preview.chars().count(), 100);
    }
}
