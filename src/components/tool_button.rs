use eframe::egui;

use crate::tools::ToolKind;

/// Square icon button for one toolbar tool.
pub struct ToolButton {
    pub tool: ToolKind,
    pub selected: bool,
}

impl ToolButton {
    pub fn new(tool: ToolKind, selected: bool) -> Self {
        Self { tool, selected }
    }

    pub fn show(&self, ui: &mut egui::Ui) -> egui::Response {
        let button_size = egui::vec2(32.0, 32.0);
        let (rect, response) = ui.allocate_exact_size(button_size, egui::Sense::click());

        if ui.is_rect_visible(rect) {
            let bg_color = if self.selected {
                egui::Color32::from_rgb(37, 99, 235) // Blue when selected
            } else if response.hovered() {
                egui::Color32::from_gray(55)
            } else {
                egui::Color32::from_gray(30)
            };

            ui.painter().rect_filled(rect, 4.0, bg_color);

            // Draw icon text centered
            ui.painter().text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                self.tool.icon(),
                egui::FontId::proportional(20.0),
                egui::Color32::WHITE,
            );

            if self.selected {
                ui.painter()
                    .rect_stroke(rect, 4.0, egui::Stroke::new(2.0, egui::Color32::from_rgb(96, 165, 250)));
            }
        }

        response.on_hover_text(self.tool.name())
    }
}

/// Round color swatch; returns the click response.
pub fn color_swatch(ui: &mut egui::Ui, color: egui::Color32, selected: bool) -> egui::Response {
    let size = egui::vec2(24.0, 24.0);
    let (rect, response) = ui.allocate_exact_size(size, egui::Sense::click());

    if ui.is_rect_visible(rect) {
        let radius = rect.width() / 2.0;
        ui.painter().circle_filled(rect.center(), radius - 2.0, color);
        let ring = if selected {
            egui::Stroke::new(2.0, egui::Color32::WHITE)
        } else if response.hovered() {
            egui::Stroke::new(1.0, egui::Color32::from_gray(160))
        } else {
            egui::Stroke::new(1.0, egui::Color32::from_gray(70))
        };
        ui.painter().circle_stroke(rect.center(), radius - 1.0, ring);
    }

    response
}
