use std::cell::RefCell;
use std::rc::Rc;

use eframe_annotate::{BoardConfig, EditorContext, EditorEvent, EditorState, InputEvent, ToolKind};
use egui::{PointerButton, pos2};

fn recording_editor() -> (EditorContext, Rc<RefCell<Vec<EditorEvent>>>) {
    let editor = EditorContext::new(BoardConfig::default());
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    editor.subscribe(Box::new(move |event: &EditorEvent| sink.borrow_mut().push(event.clone())));
    (editor, seen)
}

fn click(editor: &mut EditorContext, x: f32, y: f32) {
    editor.handle_event(InputEvent::PointerDown { pos: pos2(x, y), button: PointerButton::Primary });
    editor.handle_event(InputEvent::PointerUp { pos: pos2(x, y), button: PointerButton::Primary });
}

#[test]
fn test_stroke_reports_gesture_and_timeline() {
    let (mut editor, seen) = recording_editor();
    click(&mut editor, 1.0, 1.0);
    let id = editor.store().committed()[0].id();

    let drawing = EditorState::Drawing { stroke: id };
    assert_eq!(
        *seen.borrow(),
        vec![
            EditorEvent::StateChanged { old: EditorState::Idle, new: drawing },
            EditorEvent::StateChanged { old: drawing, new: EditorState::Idle },
            EditorEvent::TimelineChanged { history_index: 0, len: 1 },
        ]
    );
}

#[test]
fn test_only_board_changes_are_persistent() {
    let (mut editor, seen) = recording_editor();
    editor.select_tool(ToolKind::Pan);
    editor.handle_event(InputEvent::PointerMove { pos: pos2(3.0, 3.0) });
    assert!(seen.borrow().iter().all(|event| !event.is_persistent()));

    editor.handle_event(InputEvent::PointerDown { pos: pos2(0.0, 0.0), button: PointerButton::Primary });
    editor.handle_event(InputEvent::PointerMove { pos: pos2(8.0, 0.0) });
    editor.handle_event(InputEvent::PointerUp { pos: pos2(8.0, 0.0), button: PointerButton::Primary });

    let persistent: Vec<_> = seen.borrow().iter().filter(|event| event.is_persistent()).cloned().collect();
    assert_eq!(persistent.len(), 1);
    assert!(matches!(persistent[0], EditorEvent::ViewChanged { .. }));
}

#[test]
fn test_unsubscribed_handler_goes_quiet() {
    let editor = EditorContext::new(BoardConfig::default());
    let seen = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&seen);
    let id = editor.subscribe(Box::new(move |_: &EditorEvent| *sink.borrow_mut() += 1));

    let mut editor = editor;
    click(&mut editor, 1.0, 1.0);
    let before = *seen.borrow();
    assert!(before > 0);

    assert!(editor.unsubscribe(id));
    click(&mut editor, 5.0, 5.0);
    assert_eq!(*seen.borrow(), before);
}
