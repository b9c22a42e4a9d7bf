use std::sync::Arc;

use egui::{Color32, Pos2};
use log::{debug, warn};

use super::ViewState;
use crate::error::{EngineError, EngineResult};
use crate::stroke::{Stroke, StrokeId, StrokeKind, StrokeRef};

/// Sole owner of the stroke timeline and the preview overlay.
///
/// The timeline is one evolving list plus a cursor: the first `visible`
/// entries are the board, anything after them is the redo tail. Every bound
/// saturates, so there is no invalid state to report.
///
/// No other component mutates the timeline or the preview directly; they
/// describe the change they want through the methods below.
#[derive(Debug, Clone, Default)]
pub struct StrokeStore {
    timeline: Vec<StrokeRef>,
    /// Number of visible entries, i.e. history index + 1.
    visible: usize,
    view: ViewState,
    /// The stroke currently being drawn, if any.
    drawing: Option<StrokeId>,
}

impl StrokeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore a store from persisted parts. The index is clamped to
    /// `-1..=len-1`.
    pub fn from_timeline(timeline: Vec<StrokeRef>, history_index: i64) -> Self {
        let visible = if history_index < 0 {
            0
        } else {
            usize::try_from(history_index)
                .map(|index| index.saturating_add(1))
                .unwrap_or(usize::MAX)
                .min(timeline.len())
        };

        Self {
            timeline,
            visible,
            view: ViewState::Committed,
            drawing: None,
        }
    }

    /// The whole timeline, redo tail included.
    pub fn timeline(&self) -> &[StrokeRef] {
        &self.timeline
    }

    /// Cursor over the timeline; `-1` is the empty board.
    pub fn history_index(&self) -> i64 {
        self.visible as i64 - 1
    }

    pub fn len(&self) -> usize {
        self.timeline.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timeline.is_empty()
    }

    /// The committed board, ignoring any preview.
    pub fn committed(&self) -> &[StrokeRef] {
        &self.timeline[..self.visible]
    }

    /// The authoritative list: the preview while one is active, else the
    /// committed board.
    pub fn visible(&self) -> &[StrokeRef] {
        self.view.preview().unwrap_or_else(|| self.committed())
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn is_previewing(&self) -> bool {
        self.view.is_previewing()
    }

    pub fn active_stroke(&self) -> Option<StrokeId> {
        self.drawing
    }

    pub fn can_undo(&self) -> bool {
        self.visible > 0
    }

    pub fn can_redo(&self) -> bool {
        self.visible < self.timeline.len()
    }

    /// Start a new single-point stroke on top of the visible board.
    ///
    /// This is the branch point: the redo tail is dropped.
    pub fn begin_stroke(&mut self, point: Pos2, color: Color32, width: f32, kind: StrokeKind) -> StrokeId {
        if self.view.is_previewing() {
            warn!("Starting a stroke while a preview is active; discarding the preview");
            self.view = ViewState::Committed;
        }

        let id = StrokeId::new();
        self.timeline.truncate(self.visible);
        self.timeline.push(Stroke::new_ref(id, point, color, width, kind));
        self.visible = self.timeline.len();
        self.drawing = Some(id);

        debug!("Began {:?} stroke {} at index {}", kind, id, self.history_index());
        id
    }

    /// Append a point to the stroke being drawn.
    ///
    /// The stroke is the last entry of the visible list. Only that stroke is
    /// ever mutated in place; if it is shared (e.g. captured by a snapshot)
    /// it is copied first.
    pub fn append_point(&mut self, point: Pos2) -> EngineResult<()> {
        let id = self.drawing.ok_or(EngineError::NoActiveStroke)?;

        let list: &mut [StrokeRef] = match &mut self.view {
            ViewState::Previewing(strokes) => strokes.as_mut_slice(),
            ViewState::Committed => &mut self.timeline[..self.visible],
        };

        match list.last_mut() {
            Some(last) if last.id() == id => {
                Arc::make_mut(last).push_point(point);
                Ok(())
            }
            _ => Err(EngineError::NoActiveStroke),
        }
    }

    /// Seal the stroke being drawn. It is immutable from here on.
    pub fn finish_stroke(&mut self) -> Option<StrokeId> {
        self.drawing.take()
    }

    /// Open a preview that starts as a copy of the committed board.
    pub fn begin_preview(&mut self) {
        self.view = ViewState::Previewing(self.committed().to_vec());
    }

    /// Replace the preview list wholesale, opening one if needed.
    pub fn set_preview(&mut self, strokes: Vec<StrokeRef>) {
        self.view = ViewState::Previewing(strokes);
    }

    /// Drop a stroke from the active preview. Returns whether it was there.
    pub fn remove_from_preview(&mut self, id: StrokeId) -> bool {
        let ViewState::Previewing(strokes) = &mut self.view else {
            return false;
        };
        let before = strokes.len();
        strokes.retain(|stroke| stroke.id() != id);
        strokes.len() != before
    }

    /// Replace the timeline with `strokes` and move the cursor to its end.
    ///
    /// Any preview is cleared.
    pub fn commit_preview(&mut self, strokes: Vec<StrokeRef>) {
        self.timeline = strokes;
        self.visible = self.timeline.len();
        self.view = ViewState::Committed;
        self.drawing = None;
        debug!("Committed {} strokes", self.timeline.len());
    }

    /// Commit the active preview, if there is one.
    pub fn commit_current_preview(&mut self) -> bool {
        match self.view.take_preview() {
            Some(strokes) => {
                self.commit_preview(strokes);
                true
            }
            None => false,
        }
    }

    /// Forget the preview without touching the timeline.
    pub fn discard_preview(&mut self) -> bool {
        self.view.take_preview().is_some()
    }

    /// Step the cursor back. No-op on an empty board.
    pub fn undo(&mut self) -> bool {
        if self.visible == 0 {
            return false;
        }
        self.visible -= 1;
        true
    }

    /// Step the cursor forward. No-op at the end of the timeline.
    pub fn redo(&mut self) -> bool {
        if self.visible >= self.timeline.len() {
            return false;
        }
        self.visible += 1;
        true
    }
}
