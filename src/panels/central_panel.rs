use crate::AnnotateApp;

/// The drawing surface.
pub fn central_panel(app: &mut AnnotateApp, ctx: &egui::Context) {
    egui::CentralPanel::default()
        .frame(egui::Frame::none())
        .show(ctx, |ui| {
            let (response, painter) = ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
            let canvas_rect = response.rect;

            // Handle input
            app.handle_input(ctx, canvas_rect);

            if response.hovered() {
                ctx.set_cursor_icon(app.cursor_icon());
            }

            // Render the canvas
            app.render(&painter, canvas_rect);

            if !app.panels().toolbar_open() {
                let toggle = egui::Rect::from_center_size(
                    egui::pos2(canvas_rect.center().x, canvas_rect.max.y - 12.0),
                    egui::vec2(80.0, 20.0),
                );
                if ui.put(toggle, egui::Button::new("▲ Tools")).clicked() {
                    app.panels_mut().toggle_toolbar();
                }
            }
        });
}
