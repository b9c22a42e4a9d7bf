mod central_panel;
mod tools_panel;

pub use central_panel::central_panel;
pub use tools_panel::{pen_panel, toolbar};

use crate::tools::ToolKind;

/// Which side panels are open.
///
/// The pen panel gets out of the way while drawing and comes back on release,
/// unless the user has toggled it by hand. Picking a non-drawing tool hands
/// control back to the automatic behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelVisibility {
    pen_panel_open: bool,
    toolbar_open: bool,
    manual: bool,
}

impl Default for PanelVisibility {
    fn default() -> Self {
        Self {
            pen_panel_open: true,
            toolbar_open: true,
            manual: false,
        }
    }
}

impl PanelVisibility {
    pub fn pen_panel_open(&self) -> bool {
        self.pen_panel_open
    }

    pub fn toolbar_open(&self) -> bool {
        self.toolbar_open
    }

    pub fn is_manual(&self) -> bool {
        self.manual
    }

    pub fn toggle_pen_panel(&mut self) {
        self.manual = true;
        self.pen_panel_open = !self.pen_panel_open;
    }

    pub fn toggle_toolbar(&mut self) {
        self.toolbar_open = !self.toolbar_open;
    }

    pub fn drawing_started(&mut self) {
        if !self.manual {
            self.pen_panel_open = false;
        }
    }

    pub fn pointer_released(&mut self, tool: ToolKind) {
        if tool.draws() && !self.manual {
            self.pen_panel_open = true;
        }
    }

    pub fn tool_selected(&mut self, tool: ToolKind) {
        if !self.manual {
            self.pen_panel_open = tool.draws();
        }
        if !tool.draws() {
            self.manual = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pen_panel_hides_while_drawing() {
        let mut panels = PanelVisibility::default();
        panels.drawing_started();
        assert!(!panels.pen_panel_open());
        panels.pointer_released(ToolKind::Pen);
        assert!(panels.pen_panel_open());
    }

    #[test]
    fn test_manual_toggle_wins_until_non_drawing_tool() {
        let mut panels = PanelVisibility::default();
        panels.toggle_pen_panel();
        assert!(!panels.pen_panel_open());

        panels.drawing_started();
        panels.pointer_released(ToolKind::Pen);
        panels.tool_selected(ToolKind::BrushEraser);
        assert!(!panels.pen_panel_open());
        assert!(panels.is_manual());

        panels.tool_selected(ToolKind::Move);
        assert!(!panels.is_manual());
        panels.tool_selected(ToolKind::Pen);
        assert!(panels.pen_panel_open());
    }
}
