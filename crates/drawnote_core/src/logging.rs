//! Diagnostic logging for the note core.
//!
//! # Responsibility
//! - Start one rolling file logger per process.
//! - Format note store events as single `key=value` lines.
//!
//! # Invariants
//! - Note titles, bodies and stroke paths are never logged; events carry
//!   ids, counts and durations only.
//! - A second `init_logging` with the same level and directory is a no-op;
//!   any other second call is rejected.
//! - Nothing in this module panics.

use flexi_logger::{
    Cleanup, Criterion, FileSpec, LogSpecification, Logger, LoggerHandle, Naming, WriteMode,
};
use log::{error, info, Level};
use once_cell::sync::OnceCell;
use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Once;
use std::time::Duration;

const LOG_FILE_BASENAME: &str = "drawnote";
const ROTATE_AT_BYTES: u64 = 10 * 1024 * 1024;
const KEPT_LOG_FILES: usize = 5;
const MAX_FIELD_CHARS: usize = 160;

static ACTIVE: OnceCell<ActiveLogger> = OnceCell::new();
static PANIC_HOOK: Once = Once::new();

struct ActiveLogger {
    level: Level,
    log_dir: PathBuf,
    _handle: LoggerHandle,
}

/// Note store operation named in an event line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StoreOp {
    Save,
    Delete,
}

impl StoreOp {
    fn event(self) -> &'static str {
        match self {
            Self::Save => "note_save",
            Self::Delete => "note_delete",
        }
    }
}

/// Starts file logging under `log_dir` at `level`.
///
/// `level` is one of `trace|debug|info|warn|error` (any case); `log_dir`
/// must be absolute and is created when missing.
///
/// # Errors
/// Returns a readable message for a bad level or directory, a backend
/// start failure, or a second call with a different configuration.
pub fn init_logging(level: &str, log_dir: &str) -> Result<(), String> {
    let level = parse_level(level)?;
    let log_dir = parse_log_dir(log_dir)?;

    let active = ACTIVE.get_or_try_init(|| start_logger(level, log_dir.as_path()))?;
    if active.level != level || active.log_dir != log_dir {
        return Err(format!(
            "logging already running at {} in `{}`; refusing to switch to {} in `{}`",
            active.level,
            active.log_dir.display(),
            level,
            log_dir.display()
        ));
    }
    Ok(())
}

/// Level and directory of the running logger, if any.
pub fn logging_status() -> Option<(Level, PathBuf)> {
    ACTIVE
        .get()
        .map(|active| (active.level, active.log_dir.clone()))
}

/// `debug` for debug builds, `info` otherwise.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

/// Logs the outcome of one store write.
///
/// `counts` are extra `name=value` pairs for a successful operation.
pub(crate) fn log_store_event(
    op: StoreOp,
    note_id: &str,
    elapsed: Duration,
    outcome: Result<&[(&str, usize)], &dyn Display>,
) {
    let line = store_event_line(op, note_id, elapsed, outcome);
    match outcome {
        Ok(_) => info!("{line}"),
        Err(_) => error!("{line}"),
    }
}

fn store_event_line(
    op: StoreOp,
    note_id: &str,
    elapsed: Duration,
    outcome: Result<&[(&str, usize)], &dyn Display>,
) -> String {
    let mut line = format!(
        "event={} module=store note_id={} duration_ms={}",
        op.event(),
        single_line(note_id),
        elapsed.as_millis()
    );
    match outcome {
        Ok(counts) => {
            line.push_str(" status=ok");
            for (name, value) in counts {
                line.push_str(&format!(" {name}={value}"));
            }
        }
        Err(err) => {
            line.push_str(" status=error error=");
            line.push_str(&single_line(&err.to_string()));
        }
    }
    line
}

fn start_logger(level: Level, log_dir: &Path) -> Result<ActiveLogger, String> {
    std::fs::create_dir_all(log_dir)
        .map_err(|err| format!("cannot create log directory `{}`: {err}", log_dir.display()))?;

    let spec = LogSpecification::builder()
        .default(level.to_level_filter())
        .build();
    let handle = Logger::with(spec)
        .log_to_file(
            FileSpec::default()
                .directory(log_dir)
                .basename(LOG_FILE_BASENAME),
        )
        .rotate(
            Criterion::Size(ROTATE_AT_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(KEPT_LOG_FILES),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .map_err(|err| format!("cannot start logger: {err}"))?;

    PANIC_HOOK.call_once(install_panic_hook);
    info!(
        "event=core_init module=core status=ok version={} os={} level={level}",
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS
    );

    Ok(ActiveLogger {
        level,
        log_dir: log_dir.to_path_buf(),
        _handle: handle,
    })
}

fn install_panic_hook() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let payload = info
            .payload()
            .downcast_ref::<&str>()
            .map(|message| (*message).to_string())
            .or_else(|| info.payload().downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "non-string panic payload".to_string());
        let location = info
            .location()
            .map(|loc| format!("{}:{}", loc.file(), loc.line()))
            .unwrap_or_else(|| "unknown".to_string());
        // Payloads may quote note text.
        error!(
            "event=panic module=core status=error location={location} payload={}",
            single_line(&payload)
        );
        previous(info);
    }));
}

fn parse_level(level: &str) -> Result<Level, String> {
    Level::from_str(level.trim()).map_err(|_| {
        format!("unsupported log level `{level}`; expected trace|debug|info|warn|error")
    })
}

fn parse_log_dir(log_dir: &str) -> Result<PathBuf, String> {
    let path = Path::new(log_dir.trim());
    if path.as_os_str().is_empty() {
        return Err("log_dir cannot be empty".to_string());
    }
    if !path.is_absolute() {
        return Err(format!("log_dir must be absolute, got `{}`", path.display()));
    }
    Ok(path.to_path_buf())
}

/// Flattens line breaks and caps length so one value stays one field.
fn single_line(value: &str) -> String {
    let mut flat: String = value
        .chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .take(MAX_FIELD_CHARS)
        .collect();
    if value.chars().count() > MAX_FIELD_CHARS {
        flat.push_str("...");
    }
    flat
}

#[cfg(test)]
mod tests {
    use super::{
        init_logging, logging_status, parse_level, parse_log_dir, single_line, store_event_line,
        StoreOp,
    };
    use log::Level;
    use std::time::Duration;

    #[test]
    fn levels_parse_case_insensitively() {
        assert_eq!(parse_level(" INFO ").unwrap(), Level::Info);
        assert_eq!(parse_level("warn").unwrap(), Level::Warn);
        assert!(parse_level("verbose").unwrap_err().contains("unsupported"));
    }

    #[test]
    fn log_dir_must_be_absolute() {
        assert!(parse_log_dir("logs/dev").unwrap_err().contains("absolute"));
        assert!(parse_log_dir("   ").unwrap_err().contains("empty"));
    }

    #[test]
    fn save_event_lists_counts_without_note_text() {
        let counts = [("strokes", 3), ("total", 7)];
        let line = store_event_line(
            StoreOp::Save,
            "note_1_abc",
            Duration::from_millis(4),
            Ok(&counts[..]),
        );
        assert_eq!(
            line,
            "event=note_save module=store note_id=note_1_abc duration_ms=4 status=ok strokes=3 total=7"
        );
    }

    #[test]
    fn error_event_keeps_one_line_per_event() {
        let err: &dyn std::fmt::Display = &"disk full\nretry later";
        let line = store_event_line(StoreOp::Delete, "id\nwith break", Duration::ZERO, Err(err));
        assert!(line.starts_with("event=note_delete module=store note_id=id with break"));
        assert!(line.ends_with("status=error error=disk full retry later"));
        assert!(!line.contains('\n'));
    }

    #[test]
    fn long_values_are_capped() {
        let flat = single_line(&"x".repeat(400));
        assert_eq!(flat.chars().count(), 163);
        assert!(flat.ends_with("..."));
    }

    #[test]
    fn init_logging_is_idempotent_and_rejects_reconfiguration() {
        let base = std::env::temp_dir().join(format!("drawnote-logging-{}", std::process::id()));
        let log_dir = base.join("logs");
        let log_dir_str = log_dir.to_str().unwrap().to_string();
        let other_dir = base.join("other");

        init_logging("info", &log_dir_str).unwrap();
        init_logging("INFO", &log_dir_str).unwrap();

        let level_error = init_logging("debug", &log_dir_str).unwrap_err();
        assert!(level_error.contains("refusing to switch"));
        let dir_error = init_logging("info", other_dir.to_str().unwrap()).unwrap_err();
        assert!(dir_error.contains("refusing to switch"));

        let (level, dir) = logging_status().unwrap();
        assert_eq!(level, Level::Info);
        assert_eq!(dir, log_dir);
    }
}
