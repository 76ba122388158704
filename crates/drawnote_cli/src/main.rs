//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `drawnote_core` linkage with deterministic output.
//! - Optionally list the notes stored in a database file.
//!
//! Usage: `drawnote_cli [db_path]` (falls back to `DRAWNOTE_DB_PATH`).

use drawnote_core::db::open_db;
use drawnote_core::{NoteService, NoteStore, SqliteKvStorage, StoreConfig};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("drawnote_core ping={}", drawnote_core::ping());
    println!("drawnote_core version={}", drawnote_core::core_version());

    let mut config = StoreConfig::from_env();
    match std::env::args().nth(1) {
        Some(path) => config.db_path = path.into(),
        None if std::env::var_os(drawnote_core::config::DB_PATH_ENV).is_none() => {
            return ExitCode::SUCCESS
        }
        None => {}
    }
    if let Err(err) = config.validate() {
        eprintln!("invalid config: {err}");
        return ExitCode::FAILURE;
    }

    let conn = match open_db(&config.db_path) {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("failed to open {}: {err}", config.db_path.display());
            return ExitCode::FAILURE;
        }
    };
    let service = NoteService::new(NoteStore::new(
        SqliteKvStorage::new(&conn),
        config.storage_key.as_str(),
    ));
    let notes = service.list_notes();
    println!("notes={}", notes.len());
    for note in notes {
        println!(
            "{}\t{}\tupdated_at={}\tstrokes={}\t{}",
            note.id, note.title, note.updated_at, note.stroke_count, note.preview
        );
    }
    ExitCode::SUCCESS
}
