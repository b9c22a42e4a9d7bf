use egui::{Context, Key, PointerButton, Pos2, Rect};

/// Pointer and shortcut input, already reduced to what the editor reacts to.
///
/// Positions are canvas-local screen coordinates: the canvas origin is
/// subtracted, the pan offset is not.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A button was pressed over the canvas
    PointerDown { pos: Pos2, button: PointerButton },
    /// The pointer moved over the canvas
    PointerMove { pos: Pos2 },
    /// A button was released
    PointerUp { pos: Pos2, button: PointerButton },
    /// The pointer left the canvas
    PointerLeave,
    Undo,
    Redo,
}

impl InputEvent {
    pub fn pos(&self) -> Option<Pos2> {
        match self {
            InputEvent::PointerDown { pos, .. }
            | InputEvent::PointerMove { pos }
            | InputEvent::PointerUp { pos, .. } => Some(*pos),
            _ => None,
        }
    }
}

const BUTTONS: [PointerButton; 3] = [PointerButton::Primary, PointerButton::Secondary, PointerButton::Middle];

/// Handles converting raw egui input into [`InputEvent`]s for one canvas
#[derive(Debug, Clone)]
pub struct InputHandler {
    last_pointer_pos: Option<Pos2>,
    canvas_rect: Rect,
}

impl InputHandler {
    pub fn new(canvas_rect: Rect) -> Self {
        Self {
            last_pointer_pos: None,
            canvas_rect,
        }
    }

    /// Update the canvas rectangle (e.g. if window is resized)
    pub fn set_canvas_rect(&mut self, rect: Rect) {
        self.canvas_rect = rect;
    }

    fn to_canvas(&self, pos: Pos2) -> Pos2 {
        (pos - self.canvas_rect.min).to_pos2()
    }

    /// Process raw egui input and generate our InputEvents
    pub fn process_input(&mut self, ctx: &Context) -> Vec<InputEvent> {
        let mut events = Vec::new();

        ctx.input(|input| {
            let hover = input
                .pointer
                .hover_pos()
                .filter(|pos| self.canvas_rect.contains(*pos));

            // Presses only count on the canvas, releases count anywhere
            for button in BUTTONS {
                if input.pointer.button_pressed(button) {
                    if let Some(pos) = hover {
                        events.push(InputEvent::PointerDown {
                            pos: self.to_canvas(pos),
                            button,
                        });
                    }
                }
            }

            match hover {
                Some(pos) if Some(pos) != self.last_pointer_pos => {
                    events.push(InputEvent::PointerMove { pos: self.to_canvas(pos) });
                    self.last_pointer_pos = Some(pos);
                }
                Some(_) => {}
                None => {
                    if self.last_pointer_pos.take().is_some() {
                        events.push(InputEvent::PointerLeave);
                    }
                }
            }

            for button in BUTTONS {
                if input.pointer.button_released(button) {
                    if let Some(pos) = input.pointer.interact_pos().or(self.last_pointer_pos) {
                        events.push(InputEvent::PointerUp {
                            pos: self.to_canvas(pos),
                            button,
                        });
                    }
                }
            }

            if input.modifiers.command && input.key_pressed(Key::Z) {
                events.push(if input.modifiers.shift { InputEvent::Redo } else { InputEvent::Undo });
            } else if input.modifiers.command && input.key_pressed(Key::Y) {
                events.push(InputEvent::Redo);
            }
        });

        events
    }
}
