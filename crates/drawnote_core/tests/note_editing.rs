use drawnote_core::db::open_db_in_memory;
use drawnote_core::{
    render_svg, Brush, Canvas, MemoryKvStorage, Note, NoteRepository, NoteService,
    NoteServiceError, NoteStore, Point, SqliteKvStorage, StoreError, StrokeCapture,
    StrokeOutcome, ToolMode, DEFAULT_STORAGE_KEY,
};
use std::sync::atomic::{AtomicI64, Ordering};

static FAKE_NOW: AtomicI64 = AtomicI64::new(1_000);

fn tick() -> i64 {
    FAKE_NOW.fetch_add(10, Ordering::SeqCst) + 10
}

fn draw(capture: &mut StrokeCapture, points: &[(f64, f64)]) {
    let (first, rest) = points.split_first().unwrap();
    capture.begin_stroke(Point::new(first.0, first.1), ToolMode::Draw);
    for &(x, y) in rest {
        capture.extend_stroke(Point::new(x, y));
    }
}

#[test]
fn every_edit_bumps_updated_at_and_is_persisted() {
    let conn = open_db_in_memory().unwrap();
    let store = NoteStore::new(SqliteKvStorage::new(&conn), DEFAULT_STORAGE_KEY);
    let mut service = NoteService::with_clock(store, tick);

    let mut note = service.create_new();
    assert!(service.list_notes().is_empty());

    let before = note.updated_at;
    service.update_title(&mut note, "Plan").unwrap();
    assert!(note.updated_at > before);
    assert!(note.updated_at >= note.created_at);

    let before = note.updated_at;
    service.update_body(&mut note, "first line\nsecond").unwrap();
    assert!(note.updated_at > before);

    let stored = service.get_note(&note.id).unwrap();
    assert_eq!(stored, note);
    assert_eq!(stored.title, "Plan");
}

#[test]
fn body_edit_fills_an_empty_title_from_first_line() {
    let mut service = NoteService::new(NoteStore::new(MemoryKvStorage::new(), "k"));
    let mut note = service.create_new();

    service
        .update_body(&mut note, "  Shopping list  \nmilk")
        .unwrap();
    assert_eq!(note.title, "Shopping list");

    service.update_body(&mut note, "Other first line").unwrap();
    assert_eq!(note.title, "Shopping list");
}

#[test]
fn gestures_append_and_erase_through_the_service() {
    let mut service = NoteService::new(NoteStore::new(MemoryKvStorage::new(), "k"));
    let mut note = service.create_new();
    let mut capture = StrokeCapture::new(Brush::new("#8e24aa", 2.0));

    for offset in [0.0, 20.0, 40.0] {
        draw(&mut capture, &[(offset, 0.0), (offset, 10.0)]);
        let outcome = service.apply_gesture(&mut note, &mut capture).unwrap();
        assert_eq!(outcome, StrokeOutcome::Appended);
    }
    let tap = [(5.0, 5.0)];
    draw(&mut capture, &tap);
    assert_eq!(
        service.apply_gesture(&mut note, &mut capture).unwrap(),
        StrokeOutcome::Nothing
    );
    assert_eq!(note.strokes.len(), 3);

    let expected_remaining = note.strokes[..2].to_vec();
    capture.begin_stroke(Point::new(0.0, 5.0), ToolMode::Erase);
    capture.extend_stroke(Point::new(1.0, 5.0));
    let outcome = service.apply_gesture(&mut note, &mut capture).unwrap();
    assert!(matches!(outcome, StrokeOutcome::Erased(_)));
    assert_eq!(note.strokes, expected_remaining);

    let stored = service.get_note(&note.id).unwrap();
    assert_eq!(stored.strokes, expected_remaining);

    let svg = render_svg(Canvas::new(300.0, 220.0), &stored.strokes, None);
    assert_eq!(svg.matches("<path ").count(), 2);
}

#[test]
fn failed_save_leaves_caller_note_untouched() {
    let mut storage = MemoryKvStorage::new();
    storage.set_fail_writes(true);
    let mut service = NoteService::new(NoteStore::new(storage, "k"));
    let mut note = Note::with_id("n1", 5);

    let err = service.update_title(&mut note, "never stored").unwrap_err();
    assert!(matches!(
        err,
        NoteServiceError::Store(StoreError::Storage(_))
    ));
    assert_eq!(note.title, "");
    assert_eq!(note.updated_at, 5);
}

#[test]
fn list_and_delete_follow_store_semantics() {
    let mut service = NoteService::with_clock(NoteStore::new(MemoryKvStorage::new(), "k"), tick);
    let mut first = service.create_new();
    let mut second = service.create_new();
    service.update_title(&mut first, "first").unwrap();
    service.update_body(&mut second, "second body").unwrap();

    let listed = service.list_notes();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].id, second.id);
    assert_eq!(listed[0].title, "second body");
    assert_eq!(listed[1].preview, "(empty note)");

    service.delete_note(&first.id).unwrap();
    service.delete_note(&first.id).unwrap();
    let remaining = service.repo().load_all();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, second.id);
}
