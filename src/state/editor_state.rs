/// The pointer-gesture state machine of the annotation board.
///
/// Exactly one gesture is in flight at a time. Every gesture starts from
/// `Idle` on a pointer press and returns to `Idle` on release or when the
/// pointer leaves the surface.
///
/// # State Transitions
///
/// ```text
///                    ┌─────────────────┐
///              ┌─────►     Drawing     ├─────┐
///              │     └─────────────────┘     │
///              │     ┌─────────────────┐     │
///              ├─────►     Panning     ├─────┤
///              │     └─────────────────┘     │
/// ┌──────────┐ │     ┌─────────────────┐     │ ┌──────────┐
/// │   Idle   ├─┼─────►DraggingSelection├─────┼─►   Idle   │
/// └──────────┘ │     └─────────────────┘     │ └──────────┘
///              │     ┌─────────────────┐     │
///              ├─────►    Lassoing     ├─────┤
///              │     └─────────────────┘     │
///              │     ┌─────────────────┐     │
///              └─────►  ErasingStroke  ├─────┘
///                    └─────────────────┘
/// ```
///
/// Gestures never chain into one another: a press while a gesture is active
/// is ignored.
use serde::{Deserialize, Serialize};

use crate::stroke::StrokeId;

/// The possible states of the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EditorState {
    /// No active gesture
    #[default]
    Idle,
    /// Laying down a pen or brush-eraser stroke
    Drawing { stroke: StrokeId },
    /// Moving the view
    Panning,
    /// Translating the selected strokes
    DraggingSelection,
    /// Drawing a lasso path
    Lassoing,
    /// Removing whole strokes under the pointer
    ErasingStroke,
}

impl EditorState {
    /// Validates whether a transition to the new state is allowed
    pub fn can_transition_to(&self, new_state: &EditorState) -> bool {
        match (self, new_state) {
            // Idle to Idle is a harmless no-op
            (EditorState::Idle, _) => true,
            // Every gesture can only finish or cancel
            (_, EditorState::Idle) => true,
            _ => false,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, EditorState::Idle)
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self, EditorState::Drawing { .. })
    }

    pub fn is_panning(&self) -> bool {
        matches!(self, EditorState::Panning)
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, EditorState::DraggingSelection)
    }

    pub fn is_lassoing(&self) -> bool {
        matches!(self, EditorState::Lassoing)
    }

    pub fn is_erasing(&self) -> bool {
        matches!(self, EditorState::ErasingStroke)
    }

    /// Returns the stroke being drawn if in drawing state
    pub fn drawing_stroke(&self) -> Option<StrokeId> {
        match self {
            EditorState::Drawing { stroke } => Some(*stroke),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            EditorState::Idle => "Idle",
            EditorState::Drawing { .. } => "Drawing",
            EditorState::Panning => "Panning",
            EditorState::DraggingSelection => "DraggingSelection",
            EditorState::Lassoing => "Lassoing",
            EditorState::ErasingStroke => "ErasingStroke",
        }
    }
}
