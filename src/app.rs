use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use egui::{CursorIcon, Painter, Rect};
use log::{debug, info, warn};

use crate::config::BoardConfig;
use crate::document::Document;
use crate::event::{EditorEvent, EventHandler};
use crate::input::{InputEvent, InputHandler};
use crate::panels::{self, PanelVisibility};
use crate::renderer::Renderer;
use crate::state::{EditorContext, JsonFilePersistence};
use crate::tools::ToolKind;

/// Storage key for the board when eframe's own storage is used.
pub const DOCUMENT_KEY: &str = "drawing-board-data";

/// Editor events waiting for the shell to react to them.
#[derive(Debug, Clone, Default)]
struct EventInbox(Rc<RefCell<VecDeque<EditorEvent>>>);

impl EventInbox {
    fn pop(&self) -> Option<EditorEvent> {
        self.0.borrow_mut().pop_front()
    }
}

impl EventHandler for EventInbox {
    fn handle_event(&mut self, event: &EditorEvent) {
        self.0.borrow_mut().push_back(event.clone());
    }
}

pub struct AnnotateApp {
    editor: EditorContext,
    renderer: Renderer,
    input: InputHandler,
    panels: PanelVisibility,
    inbox: EventInbox,
    /// The board changed since it was last written to eframe storage.
    unsaved: bool,
}

impl std::fmt::Debug for AnnotateApp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnnotateApp")
            .field("editor", &self.editor)
            .field("panels", &self.panels)
            .field("unsaved", &self.unsaved)
            .finish()
    }
}

impl AnnotateApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        Self::with_config(cc, BoardConfig::load())
    }

    pub fn with_config(cc: &eframe::CreationContext<'_>, config: BoardConfig) -> Self {
        let editor = match config.state_dir.clone() {
            Some(dir) => {
                info!("Saving board to {}", dir.display());
                EditorContext::load(config, Box::new(JsonFilePersistence::new(dir)))
            }
            None => match cc.storage.and_then(|storage| storage.get_string(DOCUMENT_KEY)) {
                Some(json) => match Document::from_json(&json) {
                    Ok(document) => EditorContext::from_document(config, document),
                    Err(err) => {
                        warn!("Discarding unreadable saved board: {}", err);
                        EditorContext::new(config)
                    }
                },
                None => EditorContext::new(config),
            },
        };

        Self::from_editor(&cc.egui_ctx, editor)
    }

    /// Wrap an already built editor.
    pub fn from_editor(ctx: &egui::Context, editor: EditorContext) -> Self {
        let mut panels = PanelVisibility::default();
        panels.tool_selected(editor.active_tool());
        let inbox = EventInbox::default();
        editor.subscribe(Box::new(inbox.clone()));
        Self {
            editor,
            renderer: Renderer::new(ctx),
            input: InputHandler::new(Rect::NOTHING),
            panels,
            inbox,
            unsaved: false,
        }
    }

    pub fn editor(&self) -> &EditorContext {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut EditorContext {
        &mut self.editor
    }

    pub fn panels(&self) -> &PanelVisibility {
        &self.panels
    }

    pub fn panels_mut(&mut self) -> &mut PanelVisibility {
        &mut self.panels
    }

    /// Whether eframe storage is behind the board.
    pub fn has_unsaved_changes(&self) -> bool {
        self.unsaved
    }

    pub fn select_tool(&mut self, tool: ToolKind) {
        self.editor.select_tool(tool);
        self.drain_events();
        self.panels.tool_selected(tool);
    }

    /// Feed this frame's pointer and shortcut input to the editor.
    pub fn handle_input(&mut self, ctx: &egui::Context, canvas_rect: Rect) {
        self.input.set_canvas_rect(canvas_rect);
        for event in self.input.process_input(ctx) {
            self.apply(event);
        }
    }

    /// Route one input event to the editor and react to what it reports.
    pub fn apply(&mut self, event: InputEvent) {
        self.editor.handle_event(event);
        self.drain_events();
    }

    /// Keep the pen panel in step with gestures and note board changes.
    fn drain_events(&mut self) {
        while let Some(event) = self.inbox.pop() {
            match &event {
                EditorEvent::StateChanged { new, .. } if new.is_drawing() => self.panels.drawing_started(),
                EditorEvent::StateChanged { old, new } if old.is_drawing() && new.is_idle() => {
                    self.panels.pointer_released(self.editor.active_tool());
                }
                _ => {}
            }
            if event.is_persistent() {
                self.unsaved = true;
            }
        }
    }

    pub fn cursor_icon(&self) -> CursorIcon {
        if self.editor.state().is_panning() {
            CursorIcon::Grabbing
        } else {
            self.editor.active_tool().cursor()
        }
    }

    pub fn render(&mut self, painter: &Painter, rect: Rect) {
        let frame = self.editor.frame();
        self.renderer.render(painter, rect, &frame);
    }
}

impl eframe::App for AnnotateApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        if !self.editor.config().save_enabled || self.editor.config().state_dir.is_some() {
            return;
        }
        match self.editor.document().to_json() {
            Ok(json) => {
                storage.set_string(DOCUMENT_KEY, json);
                self.unsaved = false;
            }
            Err(err) => warn!("Failed to serialize board: {}", err),
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.editor.persist();
    }

    fn clear_color(&self, visuals: &egui::Visuals) -> [f32; 4] {
        if self.editor.config().transparent {
            egui::Rgba::TRANSPARENT.to_array()
        } else {
            visuals.panel_fill.to_normalized_gamma_f32()
        }
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        panels::toolbar(self, ctx);
        panels::pen_panel(self, ctx);
        panels::central_panel(self, ctx);

        // Toolbar buttons talk to the editor directly
        self.drain_events();
        if self.unsaved {
            if let Some(storage) = frame.storage_mut() {
                debug!("Writing board to eframe storage");
                self.save(storage);
                storage.flush();
            }
        }
    }
}
