//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose note list/edit/delete flows to Dart via FRB.
//! - Keep error semantics simple: envelopes with a message, never panics.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Store calls are serialized process-wide; each one is a full
//!   read-modify-write of the note blob.
//! - `notes_load_all` masks read failures as an empty list.

use drawnote_core::db::open_db;
use drawnote_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    Note, NoteRepository, NoteStore, Point, SqliteKvStorage, StoreConfig, Stroke,
};
use log::warn;
use std::sync::{Mutex, OnceLock};

static STORE_CONFIG: OnceLock<StoreConfig> = OnceLock::new();
static STORE_LOCK: Mutex<()> = Mutex::new(());

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// One stroke as seen by Dart.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeDto {
    /// Polyline path commands (`M x y L x y ...`).
    pub path: String,
    pub color: String,
    pub width: f64,
}

/// One note as seen by Dart.
#[derive(Debug, Clone, PartialEq)]
pub struct NoteDto {
    pub id: String,
    pub title: String,
    pub body: String,
    pub strokes: Vec<StrokeDto>,
    /// Epoch milliseconds.
    pub created_at: i64,
    /// Epoch milliseconds.
    pub updated_at: i64,
}

/// Result envelope for write operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteActionResponse {
    pub ok: bool,
    pub note_id: Option<String>,
    /// Human-readable message for diagnostics/UI.
    pub message: String,
}

impl NoteActionResponse {
    fn success(message: impl Into<String>, note_id: String) -> Self {
        Self {
            ok: true,
            note_id: Some(note_id),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            note_id: None,
            message: message.into(),
        }
    }
}

/// Lists all notes, most recently updated first.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Returns an empty list when storage is unavailable or unreadable.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_load_all() -> Vec<NoteDto> {
    with_note_store(|store| Ok(store.load_all()))
        .unwrap_or_else(|err| {
            warn!("event=notes_load_all module=ffi status=degraded error={err}");
            Vec::new()
        })
        .into_iter()
        .map(to_note_dto)
        .collect()
}

/// Creates a fresh, unsaved note.
///
/// The note becomes durable only after `note_save`.
#[flutter_rust_bridge::frb(sync)]
pub fn note_create_new() -> NoteDto {
    to_note_dto(Note::new())
}

/// Inserts or replaces a note by id.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics; failures are reported in the envelope.
#[flutter_rust_bridge::frb(sync)]
pub fn note_save(note: NoteDto) -> NoteActionResponse {
    let note = match from_note_dto(note) {
        Ok(note) => note,
        Err(message) => return NoteActionResponse::failure(format!("note_save failed: {message}")),
    };
    let note_id = note.id.clone();
    match with_note_store(|store| store.save(&note).map_err(|err| err.to_string())) {
        Ok(()) => NoteActionResponse::success("Note saved.", note_id),
        Err(err) => NoteActionResponse::failure(format!("note_save failed: {err}")),
    }
}

/// Deletes the note whose id equals `note_id` exactly.
///
/// Unknown ids succeed as a no-op.
#[flutter_rust_bridge::frb(sync)]
pub fn note_delete(note_id: String) -> NoteActionResponse {
    let deleted =
        with_note_store(|store| store.delete(note_id.as_str()).map_err(|err| err.to_string()));
    match deleted {
        Ok(()) => NoteActionResponse::success("Note deleted.", note_id),
        Err(err) => NoteActionResponse::failure(format!("note_delete failed: {err}")),
    }
}

/// Builds the persisted path string for parallel coordinate lists.
///
/// Returns an empty string for fewer than two points or mismatched lists.
#[flutter_rust_bridge::frb(sync)]
pub fn stroke_path_from_points(xs: Vec<f64>, ys: Vec<f64>) -> String {
    if xs.len() != ys.len() {
        return String::new();
    }
    let points = xs
        .into_iter()
        .zip(ys)
        .map(|(x, y)| Point::new(x, y))
        .collect::<Vec<_>>();
    Stroke::from_points(&points, "", 1.0)
        .map(|stroke| stroke.path().to_string())
        .unwrap_or_default()
}

fn resolve_store_config() -> &'static StoreConfig {
    STORE_CONFIG.get_or_init(StoreConfig::from_env)
}

fn with_note_store<T>(
    f: impl FnOnce(&mut NoteStore<SqliteKvStorage<'_>>) -> Result<T, String>,
) -> Result<T, String> {
    // Poisoned only by a panicking caller; the stored blob is unaffected.
    let _guard = STORE_LOCK
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    let config = resolve_store_config();
    config.validate().map_err(|err| err.to_string())?;
    let conn = open_db(&config.db_path).map_err(|err| format!("note DB open failed: {err}"))?;
    let mut store = NoteStore::new(SqliteKvStorage::new(&conn), config.storage_key.as_str());
    f(&mut store)
}

fn to_note_dto(note: Note) -> NoteDto {
    NoteDto {
        id: note.id,
        title: note.title,
        body: note.body,
        strokes: note
            .strokes
            .iter()
            .map(|stroke| StrokeDto {
                path: stroke.path().to_string(),
                color: stroke.color().to_string(),
                width: stroke.width(),
            })
            .collect(),
        created_at: note.created_at,
        updated_at: note.updated_at,
    }
}

fn from_note_dto(dto: NoteDto) -> Result<Note, String> {
    let mut strokes = Vec::with_capacity(dto.strokes.len());
    for (index, stroke) in dto.strokes.into_iter().enumerate() {
        let points = drawnote_core::model::stroke::parse_path(stroke.path.as_str())
            .map_err(|err| format!("stroke #{index}: {err}"))?;
        let rebuilt = Stroke::from_points(&points, stroke.color, stroke.width)
            .ok_or_else(|| format!("stroke #{index}: needs at least two points"))?;
        strokes.push(rebuilt);
    }
    Ok(Note {
        id: dto.id,
        title: dto.title,
        body: dto.body,
        strokes,
        created_at: dto.created_at,
        updated_at: dto.updated_at,
    })
}
