use egui::Pos2;
use log::debug;

use crate::geometry::stroke_at_point;
use crate::history::StrokeStore;
use crate::tools::Tool;

/// Removes whole strokes under the pointer as one undoable step.
///
/// Removals accumulate in the store's preview and are committed together when
/// the gesture ends, only if anything was actually removed.
#[derive(Debug, Default)]
pub struct StrokeEraserTool {
    active: bool,
}

impl StrokeEraserTool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the preview and erase whatever lies under the first point.
    pub fn begin(&mut self, point: Pos2, store: &mut StrokeStore) {
        store.begin_preview();
        self.active = true;
        self.erase_at(point, store);
    }

    pub fn update(&mut self, point: Pos2, store: &mut StrokeStore) {
        if self.active {
            self.erase_at(point, store);
        }
    }

    fn erase_at(&self, point: Pos2, store: &mut StrokeStore) {
        // Hit against the preview so already-erased strokes are not found again
        let Some(id) = stroke_at_point(point, store.visible()).map(|s| s.id()) else {
            return;
        };
        if store.remove_from_preview(id) {
            debug!("Erased stroke {}", id);
        }
    }
}

impl Tool for StrokeEraserTool {
    fn name(&self) -> &'static str {
        "StrokeEraser"
    }

    fn is_active(&self, _store: &StrokeStore) -> bool {
        self.active
    }

    fn finish(&mut self, store: &mut StrokeStore) -> bool {
        if !std::mem::take(&mut self.active) {
            return false;
        }

        let changed = store
            .view()
            .preview()
            .is_some_and(|preview| preview.len() != store.committed().len());

        if changed {
            store.commit_current_preview()
        } else {
            store.discard_preview();
            false
        }
    }
}
