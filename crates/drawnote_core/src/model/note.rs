//! Note domain model.
//!
//! # Responsibility
//! - Define the canonical note record: text fields plus a stroke layer.
//! - Own id generation and timestamp helpers for note lifecycle.
//!
//! # Invariants
//! - `id` is assigned once at creation and never reassigned.
//! - `updated_at >= created_at` always.
//! - `title` and `body` are plain strings; absence is the empty string.
//!
//! # See also
//! - `repo::note_store` for the persisted JSON layout.

use crate::model::stroke::Stroke;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Stable note identifier (`note_<epoch_ms>_<suffix>`).
pub type NoteId = String;

const NOTE_ID_PREFIX: &str = "note";
const NOTE_ID_SUFFIX_LEN: usize = 7;
const BASE36_DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// One user record combining text and zero or more strokes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
    /// Append order is z-order: later strokes render on top.
    #[serde(default)]
    pub strokes: Vec<Stroke>,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    /// Unix epoch milliseconds. Never earlier than `created_at`.
    pub updated_at: i64,
}

/// Validation error for note write paths.
#[derive(Debug, Clone, PartialEq)]
pub enum NoteValidationError {
    EmptyId,
    UpdatedBeforeCreated { created_at: i64, updated_at: i64 },
    InvalidStrokeWidth { index: usize, width: f64 },
}

impl Display for NoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "note id cannot be empty"),
            Self::UpdatedBeforeCreated {
                created_at,
                updated_at,
            } => write!(
                f,
                "updated_at ({updated_at}) must be >= created_at ({created_at})"
            ),
            Self::InvalidStrokeWidth { index, width } => {
                write!(f, "stroke #{index} has non-positive width {width}")
            }
        }
    }
}

impl Error for NoteValidationError {}

impl Note {
    /// Creates an empty, unsaved note stamped with the current time.
    pub fn new() -> Self {
        Self::new_at(now_epoch_ms())
    }

    /// Creates an empty, unsaved note stamped with `now`.
    ///
    /// # Invariants
    /// - `created_at == updated_at == now`.
    /// - `title`, `body`, `strokes` start empty.
    pub fn new_at(now: i64) -> Self {
        Self::with_id(generate_note_id_at(now), now)
    }

    /// Creates an empty note with a caller-provided id.
    pub fn with_id(id: impl Into<NoteId>, now: i64) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            body: String::new(),
            strokes: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Marks the note as modified now.
    pub fn touch(&mut self) {
        self.touch_at(now_epoch_ms());
    }

    /// Marks the note as modified at `now`, never moving before `created_at`.
    pub fn touch_at(&mut self, now: i64) {
        self.updated_at = now.max(self.created_at);
    }

    /// Validates invariants required before persistence.
    pub fn validate(&self) -> Result<(), NoteValidationError> {
        if self.id.trim().is_empty() {
            return Err(NoteValidationError::EmptyId);
        }
        if self.updated_at < self.created_at {
            return Err(NoteValidationError::UpdatedBeforeCreated {
                created_at: self.created_at,
                updated_at: self.updated_at,
            });
        }
        for (index, stroke) in self.strokes.iter().enumerate() {
            let width = stroke.width();
            if !width.is_finite() || width <= 0.0 {
                return Err(NoteValidationError::InvalidStrokeWidth { index, width });
            }
        }
        Ok(())
    }

    /// Returns whether the note carries neither text nor drawing.
    pub fn is_blank(&self) -> bool {
        self.title.trim().is_empty() && self.body.trim().is_empty() && self.strokes.is_empty()
    }
}

impl Default for Note {
    fn default() -> Self {
        Self::new()
    }
}

/// Current wall-clock time in epoch milliseconds.
///
/// Falls back to `0` if the system clock is before the unix epoch.
pub fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}

/// Generates a note id for the current time.
pub fn generate_note_id() -> NoteId {
    generate_note_id_at(now_epoch_ms())
}

/// Generates `note_<now>_<7 base36 chars>`.
///
/// The suffix is drawn from a v4 UUID. This is a best-effort scheme:
/// collisions are unlikely in practice but not formally excluded.
pub fn generate_note_id_at(now: i64) -> NoteId {
    let mut random = Uuid::new_v4().as_u128();
    let mut suffix = String::with_capacity(NOTE_ID_SUFFIX_LEN);
    for _ in 0..NOTE_ID_SUFFIX_LEN {
        let digit = (random % 36) as usize;
        suffix.push(char::from(BASE36_DIGITS[digit]));
        random /= 36;
    }
    format!("{NOTE_ID_PREFIX}_{now}_{suffix}")
}
