use egui::Pos2;
use log::warn;

use crate::history::StrokeStore;
use crate::stroke::{StrokeId, StrokeKind};
use crate::tools::{Brush, Tool};

/// Lays down pen and brush-eraser strokes.
///
/// The stroke lives in the timeline from the first point on and the store
/// knows which one is being drawn, so this tool carries no state.
#[derive(Debug, Default, Clone, Copy)]
pub struct DrawStrokeTool;

impl DrawStrokeTool {
    pub fn new() -> Self {
        Self
    }

    /// Start a stroke at `point` with the current brush.
    pub fn begin(&mut self, point: Pos2, brush: &Brush, kind: StrokeKind, store: &mut StrokeStore) -> StrokeId {
        store.begin_stroke(point, brush.color(), brush.width(), kind)
    }

    /// Extend the stroke being drawn, if any.
    pub fn extend(&mut self, point: Pos2, store: &mut StrokeStore) {
        if store.active_stroke().is_none() {
            return;
        }
        if let Err(err) = store.append_point(point) {
            warn!("Dropping point {:?}: {}", point, err);
        }
    }
}

impl Tool for DrawStrokeTool {
    fn name(&self) -> &'static str {
        "DrawStroke"
    }

    fn is_active(&self, store: &StrokeStore) -> bool {
        store.active_stroke().is_some()
    }

    fn finish(&mut self, store: &mut StrokeStore) -> bool {
        store.finish_stroke().is_some()
    }
}
