use egui::{Color32, CursorIcon, PointerButton};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::history::StrokeStore;
use crate::stroke::StrokeKind;

/// Common lifecycle of the gesture tools driven by the editor state machine.
pub trait Tool {
    /// Return the name of the tool
    fn name(&self) -> &'static str;

    /// True while the tool owns an in-progress gesture on `store`.
    fn is_active(&self, store: &StrokeStore) -> bool;

    /// End the gesture, committing or discarding whatever it previewed.
    ///
    /// Returns true when the committed timeline changed.
    fn finish(&mut self, store: &mut StrokeStore) -> bool;
}

// Tool implementations
mod draw_stroke_tool;
pub use draw_stroke_tool::DrawStrokeTool;

mod eraser_tool;
pub use eraser_tool::StrokeEraserTool;

mod pan_tool;
pub use pan_tool::PanTool;

mod selection_tool;
pub use selection_tool::{SelectionOutcome, SelectionTool};

/// The tool picked in the toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToolKind {
    #[default]
    Pen,
    BrushEraser,
    StrokeEraser,
    Move,
    Select,
    #[serde(alias = "hand")]
    Pan,
}

impl ToolKind {
    pub const ALL: [ToolKind; 6] = [
        ToolKind::Pen,
        ToolKind::Move,
        ToolKind::Select,
        ToolKind::Pan,
        ToolKind::BrushEraser,
        ToolKind::StrokeEraser,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Pen => "Pen",
            ToolKind::BrushEraser => "Brush eraser",
            ToolKind::StrokeEraser => "Stroke eraser",
            ToolKind::Move => "Move",
            ToolKind::Select => "Select",
            ToolKind::Pan => "Pan",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            ToolKind::Pen => "✏",
            ToolKind::BrushEraser => "⌫",
            ToolKind::StrokeEraser => "✖",
            ToolKind::Move => "✋",
            ToolKind::Select => "⛶",
            ToolKind::Pan => "✥",
        }
    }

    /// Pen and brush eraser lay down new strokes.
    pub fn draws(self) -> bool {
        matches!(self, ToolKind::Pen | ToolKind::BrushEraser)
    }

    /// Tools that keep the current selection when picked.
    pub fn keeps_selection(self) -> bool {
        matches!(self, ToolKind::Select | ToolKind::Move)
    }

    /// Tools that show which stroke is under an idle pointer.
    pub fn shows_hover(self) -> bool {
        matches!(self, ToolKind::Move | ToolKind::StrokeEraser)
    }

    /// Pointer shape over the canvas while the tool is idle.
    pub fn cursor(self) -> CursorIcon {
        match self {
            ToolKind::Pan => CursorIcon::Grab,
            ToolKind::StrokeEraser | ToolKind::Select => CursorIcon::Default,
            ToolKind::Move => CursorIcon::Move,
            ToolKind::Pen | ToolKind::BrushEraser => CursorIcon::Crosshair,
        }
    }

    /// Which kind of stroke a press lays down, if any.
    ///
    /// The pen paints with the primary button and erases with the secondary
    /// one. The brush eraser only reacts to the primary button.
    pub fn stroke_kind_for(self, button: PointerButton) -> Option<StrokeKind> {
        match (self, button) {
            (ToolKind::Pen, PointerButton::Primary) => Some(StrokeKind::Pen),
            (ToolKind::Pen, PointerButton::Secondary) => Some(StrokeKind::BrushEraser),
            (ToolKind::BrushEraser, PointerButton::Primary) => Some(StrokeKind::BrushEraser),
            _ => None,
        }
    }
}

/// Color and width handed to new strokes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Brush {
    color: Color32,
    width: f32,
}

impl Brush {
    pub fn new(color: Color32, width: f32) -> EngineResult<Self> {
        validate_width(width)?;
        Ok(Self { color, width })
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn set_color(&mut self, color: Color32) {
        self.color = color;
    }

    pub fn set_width(&mut self, width: f32) -> EngineResult<()> {
        validate_width(width)?;
        self.width = width;
        Ok(())
    }
}

impl Default for Brush {
    fn default() -> Self {
        Self {
            color: Color32::WHITE,
            width: 5.0,
        }
    }
}

fn validate_width(width: f32) -> EngineResult<()> {
    if width.is_finite() && width > 0.0 {
        Ok(())
    } else {
        Err(EngineError::InvalidStrokeWidth(width))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_mapping() {
        assert_eq!(ToolKind::Pen.stroke_kind_for(PointerButton::Primary), Some(StrokeKind::Pen));
        assert_eq!(
            ToolKind::Pen.stroke_kind_for(PointerButton::Secondary),
            Some(StrokeKind::BrushEraser)
        );
        assert_eq!(
            ToolKind::BrushEraser.stroke_kind_for(PointerButton::Primary),
            Some(StrokeKind::BrushEraser)
        );
        assert_eq!(ToolKind::BrushEraser.stroke_kind_for(PointerButton::Secondary), None);
        assert_eq!(ToolKind::Move.stroke_kind_for(PointerButton::Primary), None);
    }

    #[test]
    fn test_brush_rejects_non_positive_width() {
        assert!(Brush::new(Color32::WHITE, 0.0).is_err());
        assert!(Brush::new(Color32::WHITE, f32::NAN).is_err());

        let mut brush = Brush::default();
        assert_eq!(brush.set_width(-3.0), Err(EngineError::InvalidStrokeWidth(-3.0)));
        assert_eq!(brush.width(), 5.0);
        brush.set_width(12.0).unwrap();
        assert_eq!(brush.width(), 12.0);
    }

    #[test]
    fn test_legacy_hand_name_parses_as_pan() {
        let tool: ToolKind = serde_json::from_str("\"hand\"").unwrap();
        assert_eq!(tool, ToolKind::Pan);
    }
}
