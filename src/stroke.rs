use egui::{Color32, Pos2, Vec2};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Opaque identifier of a stroke. Assigned once at creation and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StrokeId(Uuid);

impl StrokeId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for StrokeId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for StrokeId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl fmt::Display for StrokeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How a stroke composites when the board is rasterised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrokeKind {
    /// Normal paint, drawn over whatever is below it.
    #[default]
    Pen,
    /// Destructive erase: removes coverage of earlier strokes.
    BrushEraser,
}

impl StrokeKind {
    pub fn is_eraser(self) -> bool {
        matches!(self, StrokeKind::BrushEraser)
    }
}

/// A freehand polyline with its paint metadata.
///
/// Strokes are immutable once committed; the only in-place mutation is
/// [`Stroke::push_point`], reserved for the history store while the stroke is
/// still being drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    id: StrokeId,
    points: Vec<Pos2>,
    #[serde(with = "crate::palette::hex")]
    color: Color32,
    #[serde(rename = "strokeWidth", alias = "width")]
    width: f32,
    #[serde(rename = "tool", default)]
    kind: StrokeKind,
}

// Strokes are shared between the timeline and preview lists
pub type StrokeRef = Arc<Stroke>;

impl Stroke {
    /// Start a stroke with a single point.
    pub fn new(id: StrokeId, first: Pos2, color: Color32, width: f32, kind: StrokeKind) -> Self {
        Self {
            id,
            points: vec![first],
            color,
            width,
            kind,
        }
    }

    /// Build a stroke from an existing polyline (loading, tests).
    pub fn from_points(
        id: StrokeId,
        points: Vec<Pos2>,
        color: Color32,
        width: f32,
        kind: StrokeKind,
    ) -> Self {
        Self {
            id,
            points,
            color,
            width,
            kind,
        }
    }

    pub fn new_ref(id: StrokeId, first: Pos2, color: Color32, width: f32, kind: StrokeKind) -> StrokeRef {
        Arc::new(Self::new(id, first, color, width, kind))
    }

    pub fn id(&self) -> StrokeId {
        self.id
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn kind(&self) -> StrokeKind {
        self.kind
    }

    pub fn is_eraser(&self) -> bool {
        self.kind.is_eraser()
    }

    /// A copy of this stroke (same id and metadata) with `points` shifted by `delta`.
    pub fn translated_from(&self, points: &[Pos2], delta: Vec2) -> Stroke {
        Stroke {
            id: self.id,
            points: points.iter().map(|p| *p + delta).collect(),
            color: self.color,
            width: self.width,
            kind: self.kind,
        }
    }

    pub(crate) fn push_point(&mut self, point: Pos2) {
        self.points.push(point);
    }
}
