use egui::Pos2;

use super::{hit_threshold, point_in_polygon, squared_distance};
use crate::stroke::{Stroke, StrokeId, StrokeRef};

/// True when any point of `stroke` lies strictly within its hit threshold of `point`.
pub fn stroke_hit(stroke: &Stroke, point: Pos2) -> bool {
    let threshold = hit_threshold(stroke.width());
    stroke
        .points()
        .iter()
        .any(|p| squared_distance(*p, point) < threshold)
}

/// The topmost stroke under `point`.
///
/// Strokes are scanned from last to first, so a later stroke shadows an
/// earlier one wherever both qualify.
pub fn stroke_at_point(point: Pos2, strokes: &[StrokeRef]) -> Option<&StrokeRef> {
    strokes.iter().rev().find(|stroke| stroke_hit(stroke, point))
}

/// Ids of every stroke with at least one point inside `lasso`, in list order.
///
/// A lasso of fewer than three vertices encloses nothing.
pub fn strokes_in_lasso(lasso: &[Pos2], strokes: &[StrokeRef]) -> Vec<StrokeId> {
    if lasso.len() < 3 {
        return Vec::new();
    }

    strokes
        .iter()
        .filter(|stroke| stroke.points().iter().any(|p| point_in_polygon(*p, lasso)))
        .map(|stroke| stroke.id())
        .collect()
}

pub fn find_stroke(id: StrokeId, strokes: &[StrokeRef]) -> Option<&StrokeRef> {
    strokes.iter().find(|stroke| stroke.id() == id)
}
