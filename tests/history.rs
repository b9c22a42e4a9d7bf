use eframe_annotate::{StrokeKind, StrokeStore};
use egui::{Color32, pos2};

fn store_with_strokes(count: usize) -> StrokeStore {
    let mut store = StrokeStore::new();
    for i in 0..count {
        let x = i as f32 * 10.0;
        store.begin_stroke(pos2(x, 0.0), Color32::WHITE, 5.0, StrokeKind::Pen);
        store.append_point(pos2(x + 5.0, 5.0)).unwrap();
        store.finish_stroke();
    }
    store
}

#[test]
fn test_undo_redo_round_trip() {
    let mut store = store_with_strokes(3);
    let before: Vec<_> = store.committed().iter().map(|s| s.id()).collect();

    assert!(store.undo());
    assert!(store.undo());
    assert_eq!(store.history_index(), 0);
    assert_eq!(store.committed().len(), 1);

    assert!(store.redo());
    assert!(store.redo());
    let after: Vec<_> = store.committed().iter().map(|s| s.id()).collect();
    assert_eq!(before, after);
    assert_eq!(store.history_index(), 2);
}

#[test]
fn test_undo_and_redo_saturate() {
    let mut store = store_with_strokes(1);

    assert!(store.undo());
    assert!(!store.undo());
    assert_eq!(store.history_index(), -1);
    assert!(store.committed().is_empty());

    assert!(store.redo());
    assert!(!store.redo());
    assert_eq!(store.history_index(), 0);
}

#[test]
fn test_empty_store_cannot_move() {
    let mut store = StrokeStore::new();
    assert!(!store.can_undo());
    assert!(!store.can_redo());
    assert!(!store.undo());
    assert!(!store.redo());
    assert_eq!(store.history_index(), -1);
}

#[test]
fn test_drawing_after_undo_discards_redo_tail() {
    let mut store = store_with_strokes(3);
    let first = store.committed()[0].id();
    store.undo();
    store.undo();

    let fresh = store.begin_stroke(pos2(50.0, 50.0), Color32::RED, 3.0, StrokeKind::Pen);
    store.finish_stroke();

    assert_eq!(store.len(), 2);
    assert_eq!(store.history_index(), 1);
    assert!(!store.can_redo());
    let ids: Vec<_> = store.committed().iter().map(|s| s.id()).collect();
    assert_eq!(ids, vec![first, fresh]);
}

#[test]
fn test_preview_is_what_renders() {
    let mut store = store_with_strokes(2);
    let doomed = store.committed()[1].id();

    store.begin_preview();
    assert!(store.remove_from_preview(doomed));
    assert_eq!(store.visible().len(), 1);
    assert_eq!(store.committed().len(), 2);

    assert!(store.commit_current_preview());
    assert_eq!(store.committed().len(), 1);
    assert!(!store.is_previewing());
}
