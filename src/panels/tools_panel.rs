use crate::AnnotateApp;
use crate::components::{ToolButton, color_swatch};
use crate::tools::ToolKind;

/// Left panel: pen color and width.
pub fn pen_panel(app: &mut AnnotateApp, ctx: &egui::Context) {
    if !app.panels().pen_panel_open() {
        return;
    }

    egui::SidePanel::left("pen_panel")
        .resizable(false)
        .default_width(64.0)
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.label("Pen");
                let current = app.editor().brush().color();
                for color in app.editor().config().pen_swatches() {
                    if color_swatch(ui, color, color == current).clicked() {
                        app.editor_mut().set_color(color);
                    }
                }

                ui.separator();

                let (min, max) = {
                    let config = app.editor().config();
                    (config.min_width, config.max_width)
                };
                let mut width = app.editor().brush().width();
                let slider = egui::Slider::new(&mut width, min..=max).vertical().integer();
                if ui.add(slider).changed() {
                    if let Err(err) = app.editor_mut().set_stroke_width(width) {
                        log::warn!("{}", err);
                    }
                }
            });
        });
}

/// Bottom toolbar: tools, history and background.
pub fn toolbar(app: &mut AnnotateApp, ctx: &egui::Context) {
    if !app.panels().toolbar_open() {
        return;
    }

    egui::TopBottomPanel::bottom("toolbar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            let active = app.editor().active_tool();
            for tool in ToolKind::ALL {
                if ToolButton::new(tool, tool == active).show(ui).clicked() {
                    log::info!("Tool selected from UI: {}", tool.name());
                    app.select_tool(tool);
                }
            }

            ui.separator();

            let can_undo = app.editor().can_undo();
            let can_redo = app.editor().can_redo();
            if ui.add_enabled(can_undo, egui::Button::new("↶ Undo")).clicked() {
                app.editor_mut().undo();
            }
            if ui.add_enabled(can_redo, egui::Button::new("↷ Redo")).clicked() {
                app.editor_mut().redo();
            }

            ui.separator();

            let mode = app.editor().background_mode();
            if ui.button(mode.label()).clicked() {
                app.editor_mut().cycle_background_mode();
            }

            let current = app.editor().background_color();
            for color in app.editor().config().background_swatches() {
                if color_swatch(ui, color, color == current).clicked() {
                    app.editor_mut().set_background_color(color);
                }
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let store = app.editor().store();
                ui.weak(format!("{} / {}", store.history_index() + 1, store.len()));
                if ui.small_button("Pen panel").clicked() {
                    app.panels_mut().toggle_pen_panel();
                }
            });
        });
    });
}
