use std::fs;

use eframe_annotate::geometry::stroke_at_point;
use eframe_annotate::state::persistence::DOCUMENT_FILE;
use eframe_annotate::{
    BackgroundMode, BoardConfig, Document, EditorContext, InputEvent, JsonFilePersistence, MemoryPersistence,
    PersistenceAdapter, ToolKind,
};
use egui::{Color32, PointerButton, Pos2, pos2, vec2};

fn click(editor: &mut EditorContext, pos: Pos2) {
    editor.handle_event(InputEvent::PointerDown { pos, button: PointerButton::Primary });
    editor.handle_event(InputEvent::PointerUp { pos, button: PointerButton::Primary });
}

#[test]
fn test_board_survives_restart() {
    let dir = tempfile::tempdir().unwrap();

    let mut editor = EditorContext::load(BoardConfig::default(), Box::new(JsonFilePersistence::new(dir.path())));
    click(&mut editor, pos2(10.0, 10.0));
    click(&mut editor, pos2(40.0, 40.0));
    editor.undo();
    let ids: Vec<_> = editor.store().timeline().iter().map(|s| s.id()).collect();
    assert!(dir.path().join(DOCUMENT_FILE).exists());

    let restored = EditorContext::load(BoardConfig::default(), Box::new(JsonFilePersistence::new(dir.path())));
    let restored_ids: Vec<_> = restored.store().timeline().iter().map(|s| s.id()).collect();
    assert_eq!(restored_ids, ids);
    assert_eq!(restored.store().history_index(), 0);
    assert!(restored.can_redo());
}

#[test]
fn test_null_entries_are_skipped_on_load() {
    let dir = tempfile::tempdir().unwrap();
    let json = r##"{
        "drawingHistory": [
            null,
            {
                "id": "6f1c2a9e-0d4b-4c55-9a4e-2f0e6b1d7c33",
                "points": [{"x": 10, "y": 10}, {"x": 20, "y": 10}],
                "color": "#ef4444",
                "strokeWidth": 4,
                "tool": "pen"
            }
        ],
        "historyIndex": 1,
        "panOffset": {"x": 0, "y": 0},
        "bgColor": "#374151",
        "bgMode": "transparent-solid"
    }"##;
    fs::write(dir.path().join(DOCUMENT_FILE), json).unwrap();

    let document = JsonFilePersistence::new(dir.path()).load().unwrap().unwrap();
    assert_eq!(document.timeline.len(), 1);
    assert_eq!(document.history_index, 0);
    assert_eq!(document.background_mode, BackgroundMode::TransparentSolid);

    let editor = EditorContext::from_document(BoardConfig::default(), document);
    let hit = stroke_at_point(pos2(11.0, 10.0), editor.store().committed());
    assert!(hit.is_some());
    assert_eq!(editor.background_color(), Color32::from_rgb(0x37, 0x41, 0x51));
}

#[test]
fn test_pan_end_saves_but_pan_moves_do_not() {
    let memory = MemoryPersistence::new();
    let mut editor = EditorContext::new(BoardConfig::default()).with_persistence(Box::new(memory.clone()));

    editor.select_tool(ToolKind::Pan);
    editor.handle_event(InputEvent::PointerDown { pos: pos2(0.0, 0.0), button: PointerButton::Primary });
    for x in 1..5 {
        editor.handle_event(InputEvent::PointerMove { pos: pos2(x as f32, 0.0) });
    }
    assert_eq!(memory.save_count(), 0);
    editor.handle_event(InputEvent::PointerUp { pos: pos2(4.0, 0.0), button: PointerButton::Primary });

    assert_eq!(memory.save_count(), 1);
    assert_eq!(memory.document().unwrap().pan_offset, vec2(4.0, 0.0));
}

#[test]
fn test_saving_can_be_disabled() {
    let memory = MemoryPersistence::new();
    let config = BoardConfig {
        save_enabled: false,
        ..BoardConfig::default()
    };
    let mut editor = EditorContext::new(config).with_persistence(Box::new(memory.clone()));
    click(&mut editor, pos2(1.0, 1.0));

    assert_eq!(memory.save_count(), 0);
}

#[test]
fn test_document_json_uses_stable_keys() {
    let mut editor = EditorContext::new(BoardConfig::default());
    click(&mut editor, pos2(1.0, 1.0));
    let json = editor.document().to_json().unwrap();

    for key in ["drawingHistory", "historyIndex", "panOffset", "bgColor", "bgMode", "savedAt"] {
        assert!(json.contains(key), "missing {key} in {json}");
    }
    let reloaded = Document::from_json(&json).unwrap();
    assert_eq!(reloaded.timeline.len(), 1);
}
