//! Stateless geometry shared by hit-testing, selection and rendering.
//!
//! All coordinates are world coordinates: pan never reaches this module.

use egui::{Pos2, Rect};

pub mod hit_testing;
pub use hit_testing::{find_stroke, stroke_at_point, stroke_hit, strokes_in_lasso};

use crate::stroke::{StrokeId, StrokeRef};

/// Fixed tolerance added around half the stroke width for pointer hits.
pub const HIT_PADDING: f32 = 5.0;

/// Padding added on every side of a selection bounding box.
pub const SELECTION_PADDING: f32 = 10.0;

pub fn squared_distance(a: Pos2, b: Pos2) -> f32 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    dx * dx + dy * dy
}

/// Squared distance from `point` to the closest point of the segment `a..b`.
///
/// A zero-length segment degenerates to the distance to `a`.
pub fn segment_squared_distance(point: Pos2, a: Pos2, b: Pos2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_sq();
    if len_sq == 0.0 {
        return squared_distance(point, a);
    }
    let t = ((point - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    squared_distance(point, a + ab * t)
}

/// Squared hit radius for a stroke of the given width.
pub fn hit_threshold(stroke_width: f32) -> f32 {
    let radius = stroke_width / 2.0 + HIT_PADDING;
    radius * radius
}

/// Inclusive on all four edges.
pub fn point_in_rect(point: Pos2, rect: &Rect) -> bool {
    point.x >= rect.min.x && point.x <= rect.max.x && point.y >= rect.min.y && point.y <= rect.max.y
}

/// Even-odd ray casting test.
///
/// Edges are visited as `(i, i - 1 mod n)`. An edge only counts when it
/// straddles the horizontal line through `point`, so horizontal edges never
/// toggle the parity and the division below cannot be by zero.
pub fn point_in_polygon(point: Pos2, polygon: &[Pos2]) -> bool {
    if polygon.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let (xi, yi) = (polygon[i].x, polygon[i].y);
        let (xj, yj) = (polygon[j].x, polygon[j].y);

        let straddles = (yi > point.y) != (yj > point.y);
        if straddles && point.x < (xj - xi) * (point.y - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Tight bounds of a point set, or `None` when it is empty.
pub fn points_bounds(points: &[Pos2]) -> Option<Rect> {
    let first = points.first()?;
    let mut min = *first;
    let mut max = *first;

    for point in &points[1..] {
        min.x = min.x.min(point.x);
        min.y = min.y.min(point.y);
        max.x = max.x.max(point.x);
        max.y = max.y.max(point.y);
    }

    Some(Rect::from_min_max(min, max))
}

/// Padded bounding box over every point of every stroke named in `ids`.
///
/// Ids missing from `strokes` are skipped. Returns `None` when no named
/// stroke contributes a point.
pub fn group_bounding_box<'a, I>(ids: I, strokes: &[StrokeRef]) -> Option<Rect>
where
    I: IntoIterator<Item = &'a StrokeId>,
{
    let mut bounds: Option<Rect> = None;

    for id in ids {
        let Some(stroke) = strokes.iter().find(|s| s.id() == *id) else {
            continue;
        };
        let Some(stroke_bounds) = points_bounds(stroke.points()) else {
            continue;
        };
        bounds = Some(match bounds {
            Some(acc) => acc.union(stroke_bounds),
            None => stroke_bounds,
        });
    }

    bounds.map(|rect| rect.expand(SELECTION_PADDING))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stroke::{Stroke, StrokeKind};
    use egui::{Color32, pos2};
    use std::sync::Arc;

    #[test]
    fn test_segment_distance_clamps_to_endpoints() {
        let (a, b) = (pos2(0.0, 0.0), pos2(10.0, 0.0));
        assert_eq!(segment_squared_distance(pos2(5.0, 3.0), a, b), 9.0);
        assert_eq!(segment_squared_distance(pos2(-3.0, 4.0), a, b), 25.0);
        assert_eq!(segment_squared_distance(pos2(13.0, 0.0), a, b), 9.0);
        assert_eq!(segment_squared_distance(pos2(1.0, 1.0), a, a), 2.0);
    }

    fn square() -> Vec<Pos2> {
        vec![pos2(0.0, 0.0), pos2(10.0, 0.0), pos2(10.0, 10.0), pos2(0.0, 10.0)]
    }

    fn stroke(points: Vec<Pos2>) -> StrokeRef {
        Arc::new(Stroke::from_points(StrokeId::new(), points, Color32::WHITE, 5.0, StrokeKind::Pen))
    }

    #[test]
    fn test_squared_distance() {
        assert_eq!(squared_distance(pos2(0.0, 0.0), pos2(3.0, 4.0)), 25.0);
    }

    #[test]
    fn test_hit_threshold_pads_half_width() {
        // (10 / 2 + 5)^2
        assert_eq!(hit_threshold(10.0), 100.0);
        assert_eq!(hit_threshold(0.0), 25.0);
    }

    #[test]
    fn test_point_in_rect_is_inclusive() {
        let rect = Rect::from_min_max(pos2(0.0, 0.0), pos2(10.0, 10.0));
        assert!(point_in_rect(pos2(0.0, 0.0), &rect));
        assert!(point_in_rect(pos2(10.0, 10.0), &rect));
        assert!(point_in_rect(pos2(5.0, 10.0), &rect));
        assert!(!point_in_rect(pos2(10.1, 5.0), &rect));
    }

    #[test]
    fn test_point_in_square_polygon() {
        let polygon = square();
        assert!(point_in_polygon(pos2(5.0, 5.0), &polygon));
        assert!(!point_in_polygon(pos2(15.0, 15.0), &polygon));
        assert!(!point_in_polygon(pos2(-1.0, 5.0), &polygon));
    }

    #[test]
    fn test_degenerate_polygons_contain_nothing() {
        assert!(!point_in_polygon(pos2(0.0, 0.0), &[]));
        assert!(!point_in_polygon(pos2(5.0, 0.0), &[pos2(0.0, 0.0)]));
        assert!(!point_in_polygon(pos2(5.0, 0.0), &[pos2(0.0, 0.0), pos2(10.0, 0.0)]));
    }

    #[test]
    fn test_concave_polygon() {
        // U shape: the notch between the arms is outside
        let polygon = vec![
            pos2(0.0, 0.0),
            pos2(30.0, 0.0),
            pos2(30.0, 30.0),
            pos2(20.0, 30.0),
            pos2(20.0, 10.0),
            pos2(10.0, 10.0),
            pos2(10.0, 30.0),
            pos2(0.0, 30.0),
        ];
        assert!(point_in_polygon(pos2(5.0, 20.0), &polygon));
        assert!(point_in_polygon(pos2(25.0, 20.0), &polygon));
        assert!(!point_in_polygon(pos2(15.0, 20.0), &polygon));
    }

    #[test]
    fn test_group_bounding_box_single_stroke() {
        let s = stroke(vec![pos2(0.0, 0.0), pos2(10.0, 10.0)]);
        let rect = group_bounding_box([&s.id()], &[s.clone()]).unwrap();
        assert_eq!(rect.min, pos2(-10.0, -10.0));
        assert_eq!(rect.max, pos2(20.0, 20.0));
        assert_eq!(rect.width(), 30.0);
        assert_eq!(rect.height(), 30.0);
    }

    #[test]
    fn test_group_bounding_box_spans_members_only() {
        let a = stroke(vec![pos2(0.0, 0.0)]);
        let b = stroke(vec![pos2(100.0, 50.0)]);
        let c = stroke(vec![pos2(-500.0, -500.0)]);
        let strokes = vec![a.clone(), b.clone(), c];
        let rect = group_bounding_box([&a.id(), &b.id()], &strokes).unwrap();
        assert_eq!(rect.min, pos2(-10.0, -10.0));
        assert_eq!(rect.max, pos2(110.0, 60.0));
    }

    #[test]
    fn test_group_bounding_box_empty_cases() {
        let s = stroke(vec![pos2(1.0, 1.0)]);
        let empty = stroke(Vec::new());
        let missing = StrokeId::new();
        assert!(group_bounding_box(std::iter::empty(), &[s.clone()]).is_none());
        assert!(group_bounding_box([&missing], &[s]).is_none());
        assert!(group_bounding_box([&empty.id()], &[empty.clone()]).is_none());
    }
}
