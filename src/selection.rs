use egui::{Pos2, Rect};

use crate::geometry::group_bounding_box;
use crate::stroke::{StrokeId, StrokeRef};

/// Selected strokes, hover highlight and the lasso being drawn.
///
/// Ids are weak references: an id whose stroke is not in the list being
/// looked at (e.g. after an undo) is simply skipped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    ids: Vec<StrokeId>,
    highlighted: Option<StrokeId>,
    lasso: Option<Vec<Pos2>>,
}

impl Selection {
    pub fn ids(&self) -> &[StrokeId] {
        &self.ids
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: StrokeId) -> bool {
        self.ids.contains(&id)
    }

    pub fn set(&mut self, ids: Vec<StrokeId>) {
        self.ids = ids;
        self.ids.dedup();
    }

    pub fn select_only(&mut self, id: StrokeId) {
        self.ids.clear();
        self.ids.push(id);
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// The selected ids that still resolve in `strokes`.
    pub fn live_ids(&self, strokes: &[StrokeRef]) -> Vec<StrokeId> {
        self.ids
            .iter()
            .copied()
            .filter(|id| strokes.iter().any(|s| s.id() == *id))
            .collect()
    }

    /// Padded bounding box of the selection within `strokes`.
    pub fn bounding_box(&self, strokes: &[StrokeRef]) -> Option<Rect> {
        group_bounding_box(&self.ids, strokes)
    }

    pub fn highlighted(&self) -> Option<StrokeId> {
        self.highlighted
    }

    pub fn set_highlighted(&mut self, id: Option<StrokeId>) {
        self.highlighted = id;
    }

    pub fn lasso(&self) -> Option<&[Pos2]> {
        self.lasso.as_deref()
    }

    pub(crate) fn start_lasso(&mut self, first: Pos2) {
        self.lasso = Some(vec![first]);
    }

    pub(crate) fn extend_lasso(&mut self, point: Pos2) {
        if let Some(path) = &mut self.lasso {
            path.push(point);
        }
    }

    pub(crate) fn take_lasso(&mut self) -> Option<Vec<Pos2>> {
        self.lasso.take()
    }
}
