use egui::{Color32, Vec2};

use crate::document::BackgroundMode;
use crate::state::EditorState;
use crate::tools::ToolKind;

#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    StateChanged {
        old: EditorState,
        new: EditorState,
    },
    ToolChanged {
        old: ToolKind,
        new: ToolKind,
    },
    /// The committed timeline or its cursor moved.
    TimelineChanged {
        history_index: i64,
        len: usize,
    },
    SelectionChanged {
        count: usize,
    },
    ViewChanged {
        pan_offset: Vec2,
    },
    BackgroundChanged {
        color: Color32,
        mode: BackgroundMode,
    },
}

impl EditorEvent {
    /// Whether the event describes something worth saving.
    pub fn is_persistent(&self) -> bool {
        matches!(
            self,
            EditorEvent::TimelineChanged { .. }
                | EditorEvent::ViewChanged { .. }
                | EditorEvent::BackgroundChanged { .. }
        )
    }
}
