use std::collections::HashMap;
use std::sync::Arc;

use egui::Pos2;
use log::{debug, info};

use crate::geometry::{point_in_rect, stroke_at_point, strokes_in_lasso};
use crate::history::StrokeStore;
use crate::selection::Selection;
use crate::stroke::{StrokeId, StrokeRef};
use crate::tools::{Tool, ToolKind};

/// What a press with the move or select tool turned into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// The selection is being translated.
    Dragging,
    /// A lasso path is being drawn.
    Lassoing,
    /// Nothing to do; the selection may have been cleared.
    Idle,
}

#[derive(Debug, Clone, Default)]
enum SelectionGesture {
    #[default]
    Idle,
    Dragging {
        start: Pos2,
        /// Point lists of the dragged strokes as they were at press time.
        originals: HashMap<StrokeId, Vec<Pos2>>,
    },
    Lassoing,
}

/// Owns the selection and drives drag and lasso gestures over it.
#[derive(Debug, Clone, Default)]
pub struct SelectionTool {
    selection: Selection,
    gesture: SelectionGesture,
}

impl SelectionTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut Selection {
        &mut self.selection
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.gesture, SelectionGesture::Dragging { .. })
    }

    pub fn is_lassoing(&self) -> bool {
        matches!(self.gesture, SelectionGesture::Lassoing)
    }

    /// Handle a primary press in world space.
    ///
    /// Move picks the topmost stroke under the pointer and drags it alone.
    /// Select drags the whole group when the press lands in its padded
    /// bounding box, otherwise it drops the selection and starts a lasso.
    pub fn begin(&mut self, tool: ToolKind, point: Pos2, store: &StrokeStore) -> SelectionOutcome {
        match tool {
            ToolKind::Move => match stroke_at_point(point, store.visible()).map(|s| s.id()) {
                Some(id) => {
                    self.selection.select_only(id);
                    self.start_drag(point, store);
                    SelectionOutcome::Dragging
                }
                None => {
                    self.selection.clear();
                    SelectionOutcome::Idle
                }
            },
            ToolKind::Select => {
                let inside = self
                    .selection
                    .bounding_box(store.visible())
                    .is_some_and(|rect| point_in_rect(point, &rect));

                if inside {
                    self.start_drag(point, store);
                    SelectionOutcome::Dragging
                } else {
                    self.selection.clear();
                    self.selection.start_lasso(point);
                    self.gesture = SelectionGesture::Lassoing;
                    SelectionOutcome::Lassoing
                }
            }
            _ => SelectionOutcome::Idle,
        }
    }

    fn start_drag(&mut self, start: Pos2, store: &StrokeStore) {
        let originals = store
            .committed()
            .iter()
            .filter(|stroke| self.selection.contains(stroke.id()))
            .map(|stroke| (stroke.id(), stroke.points().to_vec()))
            .collect::<HashMap<_, _>>();

        debug!("Dragging {} strokes from {:?}", originals.len(), start);
        self.gesture = SelectionGesture::Dragging { start, originals };
    }

    /// Follow the pointer: rebuild the drag preview or extend the lasso.
    pub fn update(&mut self, point: Pos2, store: &mut StrokeStore) {
        match &self.gesture {
            SelectionGesture::Dragging { start, originals } => {
                let delta = point - *start;
                // Each frame starts again from the press-time points so the
                // translation never accumulates rounding.
                let preview: Vec<StrokeRef> = store
                    .committed()
                    .iter()
                    .map(|stroke| match originals.get(&stroke.id()) {
                        Some(points) => Arc::new(stroke.translated_from(points, delta)),
                        None => Arc::clone(stroke),
                    })
                    .collect();
                store.set_preview(preview);
            }
            SelectionGesture::Lassoing => self.selection.extend_lasso(point),
            SelectionGesture::Idle => {}
        }
    }

    /// Finish the gesture. Returns true when a drag was committed.
    ///
    /// A press without movement leaves no preview, so it commits nothing.
    pub fn end(&mut self, store: &mut StrokeStore) -> bool {
        match std::mem::take(&mut self.gesture) {
            SelectionGesture::Dragging { .. } => store.commit_current_preview(),
            SelectionGesture::Lassoing => {
                if let Some(path) = self.selection.take_lasso() {
                    if path.len() > 2 {
                        let ids = strokes_in_lasso(&path, store.committed());
                        info!("Lasso selected {} strokes", ids.len());
                        self.selection.set(ids);
                    }
                }
                false
            }
            SelectionGesture::Idle => false,
        }
    }

    /// Abandon the gesture without committing anything.
    pub fn cancel(&mut self, store: &mut StrokeStore) {
        if let SelectionGesture::Dragging { .. } = std::mem::take(&mut self.gesture) {
            store.discard_preview();
        }
        self.selection.take_lasso();
    }

    /// Track the stroke under an idle pointer.
    pub fn hover(&mut self, point: Pos2, store: &StrokeStore) {
        let id = stroke_at_point(point, store.visible()).map(|s| s.id());
        self.selection.set_highlighted(id);
    }

    pub fn clear_highlight(&mut self) {
        self.selection.set_highlighted(None);
    }
}

impl Tool for SelectionTool {
    fn name(&self) -> &'static str {
        "Selection"
    }

    fn is_active(&self, _store: &StrokeStore) -> bool {
        !matches!(self.gesture, SelectionGesture::Idle)
    }

    fn finish(&mut self, store: &mut StrokeStore) -> bool {
        self.end(store)
    }
}
