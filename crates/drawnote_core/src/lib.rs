//! Core domain logic for DrawNote.
//! Notes with a freehand drawing layer, persisted as one JSON collection.

pub mod config;
pub mod db;
pub mod drawing;
pub mod kv;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{ConfigError, StoreConfig, DEFAULT_STORAGE_KEY};
pub use drawing::capture::{PreviewStroke, StrokeCapture, StrokeOutcome, ToolMode};
pub use drawing::palette::{Brush, PALETTE, STROKE_WIDTHS};
pub use drawing::render::{render_paths, render_svg, Canvas, RenderedPath};
pub use kv::{KvError, KvResult, KvStorage, MemoryKvStorage, SqliteKvStorage};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::note::{generate_note_id, now_epoch_ms, Note, NoteId, NoteValidationError};
pub use model::stroke::{PathParseError, Point, Stroke};
pub use repo::note_store::{NoteRepository, NoteStore, StoreError, StoreResult};
pub use service::note_service::{
    derive_note_preview, title_from_body, NoteService, NoteServiceError, NoteSummary,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
