use eframe_annotate::{BoardConfig, EditorContext, EditorState, InputEvent, StrokeKind, ToolKind};
use egui::{PointerButton, Pos2, pos2, vec2};

fn editor() -> EditorContext {
    EditorContext::new(BoardConfig::default())
}

fn press(editor: &mut EditorContext, pos: Pos2, button: PointerButton) {
    editor.handle_event(InputEvent::PointerDown { pos, button });
}

fn drag(editor: &mut EditorContext, path: &[Pos2]) {
    for pos in path {
        editor.handle_event(InputEvent::PointerMove { pos: *pos });
    }
}

fn release(editor: &mut EditorContext, pos: Pos2, button: PointerButton) {
    editor.handle_event(InputEvent::PointerUp { pos, button });
}

fn draw(editor: &mut EditorContext, path: &[Pos2]) {
    press(editor, path[0], PointerButton::Primary);
    drag(editor, &path[1..]);
    release(editor, path[path.len() - 1], PointerButton::Primary);
}

#[test]
fn test_pen_gesture_commits_one_stroke() {
    let mut editor = editor();
    press(&mut editor, pos2(0.0, 0.0), PointerButton::Primary);
    assert!(editor.state().is_drawing());
    drag(&mut editor, &[pos2(5.0, 0.0), pos2(10.0, 0.0)]);
    release(&mut editor, pos2(10.0, 0.0), PointerButton::Primary);

    assert_eq!(*editor.state(), EditorState::Idle);
    let committed = editor.store().committed();
    assert_eq!(committed.len(), 1);
    assert_eq!(committed[0].points().len(), 3);
    assert_eq!(committed[0].kind(), StrokeKind::Pen);
}

#[test]
fn test_pen_secondary_button_erases() {
    let mut editor = editor();
    press(&mut editor, pos2(0.0, 0.0), PointerButton::Secondary);
    release(&mut editor, pos2(0.0, 0.0), PointerButton::Secondary);
    assert_eq!(editor.store().committed()[0].kind(), StrokeKind::BrushEraser);
}

#[test]
fn test_pan_moves_later_strokes_into_world_space() {
    let mut editor = editor();
    editor.select_tool(ToolKind::Pan);
    press(&mut editor, pos2(0.0, 0.0), PointerButton::Primary);
    assert!(editor.state().is_panning());
    drag(&mut editor, &[pos2(4.0, 2.0), pos2(10.0, 5.0)]);
    release(&mut editor, pos2(10.0, 5.0), PointerButton::Primary);

    assert_eq!(editor.pan_offset(), vec2(10.0, 5.0));
    assert!(editor.store().committed().is_empty());
    assert_eq!(editor.active_tool(), ToolKind::Pan);

    editor.select_tool(ToolKind::Pen);
    draw(&mut editor, &[pos2(10.0, 5.0)]);
    assert_eq!(editor.store().committed()[0].points(), &[pos2(0.0, 0.0)]);
}

#[test]
fn test_stroke_eraser_removes_whole_strokes() {
    let mut editor = editor();
    draw(&mut editor, &[pos2(10.0, 10.0), pos2(20.0, 10.0)]);
    draw(&mut editor, &[pos2(100.0, 100.0), pos2(110.0, 100.0)]);
    let keep = editor.store().committed()[0].id();

    editor.select_tool(ToolKind::StrokeEraser);
    press(&mut editor, pos2(200.0, 200.0), PointerButton::Primary);
    assert!(editor.state().is_erasing());
    drag(&mut editor, &[pos2(150.0, 150.0), pos2(105.0, 100.0)]);
    // Gone from the frame before the release
    assert_eq!(editor.frame().strokes.len(), 1);
    release(&mut editor, pos2(105.0, 100.0), PointerButton::Primary);

    let committed = editor.store().committed();
    assert_eq!(committed.len(), 1);
    assert_eq!(committed[0].id(), keep);
}

#[test]
fn test_stroke_eraser_miss_keeps_history() {
    let mut editor = editor();
    draw(&mut editor, &[pos2(10.0, 10.0)]);

    editor.select_tool(ToolKind::StrokeEraser);
    draw(&mut editor, &[pos2(300.0, 300.0), pos2(310.0, 300.0)]);

    assert_eq!(editor.store().committed().len(), 1);
    assert_eq!(editor.store().history_index(), 0);
    assert!(!editor.store().is_previewing());
}

#[test]
fn test_move_tool_drags_hit_stroke() {
    let mut editor = editor();
    draw(&mut editor, &[pos2(10.0, 10.0), pos2(20.0, 10.0)]);
    let id = editor.store().committed()[0].id();

    editor.select_tool(ToolKind::Move);
    drag(&mut editor, &[pos2(11.0, 10.0)]);
    assert_eq!(editor.frame().highlighted, Some(id));

    press(&mut editor, pos2(10.0, 10.0), PointerButton::Primary);
    assert!(editor.state().is_dragging());
    assert_eq!(editor.selection().ids(), &[id]);
    // No hover outline while dragging
    assert_eq!(editor.frame().highlighted, None);

    drag(&mut editor, &[pos2(12.0, 12.0), pos2(15.0, 15.0)]);
    release(&mut editor, pos2(15.0, 15.0), PointerButton::Primary);

    let moved = &editor.store().committed()[0];
    assert_eq!(moved.id(), id);
    assert_eq!(moved.points(), &[pos2(15.0, 15.0), pos2(25.0, 15.0)]);
}

#[test]
fn test_select_tool_lasso_then_drag_group() {
    let mut editor = editor();
    draw(&mut editor, &[pos2(10.0, 10.0), pos2(12.0, 12.0)]);
    draw(&mut editor, &[pos2(100.0, 100.0)]);
    let inside = editor.store().committed()[0].id();

    editor.select_tool(ToolKind::Select);
    press(&mut editor, pos2(0.0, 0.0), PointerButton::Primary);
    assert!(editor.state().is_lassoing());
    drag(&mut editor, &[pos2(30.0, 0.0), pos2(30.0, 30.0), pos2(0.0, 30.0)]);
    assert_eq!(editor.frame().lasso_path.map(|path| path.len()), Some(4));
    release(&mut editor, pos2(0.0, 30.0), PointerButton::Primary);

    assert_eq!(editor.selection().ids(), &[inside]);
    let frame = editor.frame();
    assert!(frame.lasso_path.is_none());
    let bbox = frame.selection_box.unwrap();
    assert_eq!(bbox.min, pos2(0.0, 0.0));
    assert_eq!(bbox.max, pos2(22.0, 22.0));

    // A press inside the box drags the group
    press(&mut editor, pos2(5.0, 5.0), PointerButton::Primary);
    assert!(editor.state().is_dragging());
    drag(&mut editor, &[pos2(15.0, 5.0)]);
    release(&mut editor, pos2(15.0, 5.0), PointerButton::Primary);

    let committed = editor.store().committed();
    assert_eq!(committed[0].points()[0], pos2(20.0, 10.0));
    assert_eq!(committed[1].points()[0], pos2(100.0, 100.0));
}

#[test]
fn test_pointer_leave_finishes_gesture() {
    let mut editor = editor();
    press(&mut editor, pos2(0.0, 0.0), PointerButton::Primary);
    drag(&mut editor, &[pos2(3.0, 3.0)]);
    editor.handle_event(InputEvent::PointerLeave);

    assert!(editor.state().is_idle());
    assert_eq!(editor.store().committed().len(), 1);
}

#[test]
fn test_switching_tools_clears_selection_and_highlight() {
    let mut editor = editor();
    draw(&mut editor, &[pos2(10.0, 10.0)]);
    let id = editor.store().committed()[0].id();

    editor.select_tool(ToolKind::Move);
    press(&mut editor, pos2(10.0, 10.0), PointerButton::Primary);
    release(&mut editor, pos2(10.0, 10.0), PointerButton::Primary);
    assert_eq!(editor.selection().ids(), &[id]);

    editor.select_tool(ToolKind::Select);
    assert_eq!(editor.selection().ids(), &[id]);
    assert_eq!(editor.selection().highlighted(), None);

    editor.select_tool(ToolKind::Pen);
    assert!(editor.selection().is_empty());
}

#[test]
fn test_shortcuts_undo_and_redo() {
    let mut editor = editor();
    draw(&mut editor, &[pos2(0.0, 0.0)]);
    draw(&mut editor, &[pos2(20.0, 0.0)]);

    editor.handle_event(InputEvent::Undo);
    assert_eq!(editor.store().committed().len(), 1);
    editor.handle_event(InputEvent::Redo);
    assert_eq!(editor.store().committed().len(), 2);
}

#[test]
fn test_group_drag_after_undo_moves_only_live_strokes() {
    let mut editor = editor();
    draw(&mut editor, &[pos2(10.0, 10.0), pos2(12.0, 12.0)]);
    draw(&mut editor, &[pos2(20.0, 20.0)]);
    let live = editor.store().committed()[0].id();

    editor.select_tool(ToolKind::Select);
    draw(&mut editor, &[pos2(0.0, 0.0), pos2(30.0, 0.0), pos2(30.0, 30.0), pos2(0.0, 30.0)]);
    assert_eq!(editor.selection().ids().len(), 2);

    assert!(editor.undo());
    assert!(editor.can_redo());
    // Only the live stroke still counts towards the group box
    assert_eq!(editor.frame().selection_box.map(|rect| rect.max), Some(pos2(22.0, 22.0)));

    press(&mut editor, pos2(5.0, 5.0), PointerButton::Primary);
    assert!(editor.state().is_dragging());
    drag(&mut editor, &[pos2(15.0, 5.0)]);
    release(&mut editor, pos2(15.0, 5.0), PointerButton::Primary);

    assert!(editor.state().is_idle());
    assert_eq!(editor.store().len(), 1);
    assert!(!editor.can_redo());
    let moved = &editor.store().committed()[0];
    assert_eq!(moved.id(), live);
    assert_eq!(moved.points(), &[pos2(20.0, 10.0), pos2(22.0, 12.0)]);
}

#[test]
fn test_undone_stroke_loses_its_hover_outline() {
    for tool in [ToolKind::Move, ToolKind::StrokeEraser] {
        let mut editor = editor();
        draw(&mut editor, &[pos2(10.0, 10.0)]);
        draw(&mut editor, &[pos2(200.0, 200.0), pos2(210.0, 200.0)]);
        let last = editor.store().committed()[1].id();

        editor.select_tool(tool);
        drag(&mut editor, &[pos2(205.0, 200.0)]);
        assert_eq!(editor.frame().highlighted, Some(last), "{tool:?}");

        editor.undo();
        assert_eq!(editor.frame().highlighted, None, "{tool:?}");
    }
}
