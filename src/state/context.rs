/// The annotation engine: one object owning the board and interpreting pointer
/// gestures for the active tool.
///
/// The `EditorContext` is the only entry point the presentation layer needs. It
/// routes pointer events through the [`EditorState`] machine, drives the tools
/// over the [`StrokeStore`], and hands a [`RenderFrame`] back for drawing. It
/// holds no rendering knowledge itself.
///
/// # Coordinates
///
/// Pointer positions arrive in canvas-local screen space. The context subtracts
/// the pan offset to get world coordinates; everything below it works in world
/// space only.
///
/// # Example
///
/// ```rust
/// use eframe_annotate::{BoardConfig, EditorContext, InputEvent};
/// use egui::{pos2, PointerButton};
///
/// let mut editor = EditorContext::new(BoardConfig::default());
/// editor.handle_event(InputEvent::PointerDown { pos: pos2(10.0, 10.0), button: PointerButton::Primary });
/// editor.handle_event(InputEvent::PointerMove { pos: pos2(20.0, 10.0) });
/// editor.handle_event(InputEvent::PointerUp { pos: pos2(20.0, 10.0), button: PointerButton::Primary });
/// assert_eq!(editor.store().committed().len(), 1);
/// ```
use egui::{Color32, PointerButton, Pos2, Vec2};
use log::{debug, info, warn};

use super::EditorState;
use super::persistence::PersistenceAdapter;
use crate::config::BoardConfig;
use crate::document::{BackgroundMode, Document};
use crate::error::EngineResult;
use crate::event::{EditorEvent, EventBus, EventHandler, SubscriptionId};
use crate::geometry::find_stroke;
use crate::history::StrokeStore;
use crate::input::InputEvent;
use crate::palette::{self, STANDALONE_BACKGROUND};
use crate::renderer::RenderFrame;
use crate::selection::Selection;
use crate::tools::{
    Brush, DrawStrokeTool, PanTool, SelectionOutcome, SelectionTool, StrokeEraserTool, Tool, ToolKind,
};
use crate::util::time;

/// The main context for the annotation editor.
pub struct EditorContext {
    state: EditorState,
    store: StrokeStore,
    active_tool: ToolKind,
    brush: Brush,
    pan_offset: Vec2,
    background_color: Color32,
    background_mode: BackgroundMode,
    config: BoardConfig,
    draw_tool: DrawStrokeTool,
    eraser_tool: StrokeEraserTool,
    pan_tool: PanTool,
    selection_tool: SelectionTool,
    persistence: Option<Box<dyn PersistenceAdapter>>,
    event_bus: EventBus,
}

impl std::fmt::Debug for EditorContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorContext")
            .field("state", &self.state)
            .field("active_tool", &self.active_tool)
            .field("history_index", &self.store.history_index())
            .field("strokes", &self.store.len())
            .field("pan_offset", &self.pan_offset)
            .field("persistent", &self.persistence.is_some())
            .finish_non_exhaustive()
    }
}

impl EditorContext {
    /// An empty board configured by `config`.
    pub fn new(config: BoardConfig) -> Self {
        let brush = Brush::new(config.pen_color(), config.clamp_width(config.pen_width)).unwrap_or_default();

        Self {
            state: EditorState::Idle,
            store: StrokeStore::new(),
            active_tool: ToolKind::default(),
            brush,
            pan_offset: Vec2::ZERO,
            background_color: config.background_color(),
            background_mode: config.initial_background_mode(),
            config,
            draw_tool: DrawStrokeTool::new(),
            eraser_tool: StrokeEraserTool::new(),
            pan_tool: PanTool::new(),
            selection_tool: SelectionTool::new(),
            persistence: None,
            event_bus: EventBus::new(),
        }
    }

    /// Restore a saved board.
    ///
    /// The background mode is not restored in overlay mode: an overlay always
    /// starts see-through.
    pub fn from_document(config: BoardConfig, document: Document) -> Self {
        let mut editor = Self::new(config);
        editor.store = document.to_store();
        editor.pan_offset = document.pan_offset;
        editor.background_color = document.background_color;
        if !editor.config.transparent {
            editor.background_mode = document.background_mode;
        }
        info!(
            "Restored board with {} strokes at index {}",
            editor.store.len(),
            editor.store.history_index()
        );
        editor
    }

    /// Load whatever `persistence` holds and keep saving to it.
    ///
    /// An unreadable save is logged and replaced by an empty board.
    pub fn load(config: BoardConfig, persistence: Box<dyn PersistenceAdapter>) -> Self {
        let editor = match persistence.load() {
            Ok(Some(document)) => Self::from_document(config, document),
            Ok(None) => Self::new(config),
            Err(err) => {
                warn!("Failed to load saved board: {}", err);
                Self::new(config)
            }
        };
        editor.with_persistence(persistence)
    }

    pub fn with_persistence(mut self, persistence: Box<dyn PersistenceAdapter>) -> Self {
        self.persistence = Some(persistence);
        self
    }

    /// Subscribe a handler to editor events.
    pub fn subscribe(&self, handler: Box<dyn EventHandler>) -> SubscriptionId {
        self.event_bus.subscribe(handler)
    }

    /// Drop a handler added with [`Self::subscribe`].
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.event_bus.unsubscribe(id)
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn store(&self) -> &StrokeStore {
        &self.store
    }

    pub fn selection(&self) -> &Selection {
        self.selection_tool.selection()
    }

    pub fn active_tool(&self) -> ToolKind {
        self.active_tool
    }

    pub fn brush(&self) -> &Brush {
        &self.brush
    }

    pub fn pan_offset(&self) -> Vec2 {
        self.pan_offset
    }

    pub fn background_color(&self) -> Color32 {
        self.background_color
    }

    pub fn background_mode(&self) -> BackgroundMode {
        self.background_mode
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Screen to world: the pan offset is removed.
    pub fn to_world(&self, screen: Pos2) -> Pos2 {
        screen - self.pan_offset
    }

    // ---- pointer input ----

    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerDown { pos, button } => self.pointer_down(pos, button),
            InputEvent::PointerMove { pos } => self.pointer_move(pos),
            InputEvent::PointerUp { .. } => self.pointer_up(),
            InputEvent::PointerLeave => self.pointer_leave(),
            InputEvent::Undo => {
                self.undo();
            }
            InputEvent::Redo => {
                self.redo();
            }
        }
    }

    /// Start a gesture. Presses while a gesture is running are ignored.
    pub fn pointer_down(&mut self, screen: Pos2, button: PointerButton) {
        if !self.state.is_idle() {
            debug!("Ignoring {:?} press while {}", button, self.state.name());
            return;
        }

        // Panning wins over any tool-specific handling
        if button == PointerButton::Middle || (button == PointerButton::Primary && self.active_tool == ToolKind::Pan) {
            self.pan_tool.begin(screen);
            self.transition(EditorState::Panning);
            return;
        }

        let world = self.to_world(screen);
        match self.active_tool {
            ToolKind::Pen | ToolKind::BrushEraser => {
                // Brush eraser with the secondary button is deliberately inert
                if let Some(kind) = self.active_tool.stroke_kind_for(button) {
                    let stroke = self.draw_tool.begin(world, &self.brush, kind, &mut self.store);
                    self.transition(EditorState::Drawing { stroke });
                }
            }
            ToolKind::Move | ToolKind::Select if button == PointerButton::Primary => {
                let before = self.selection().ids().len();
                let outcome = self.selection_tool.begin(self.active_tool, world, &self.store);
                match outcome {
                    SelectionOutcome::Dragging => {
                        self.selection_tool.clear_highlight();
                        self.transition(EditorState::DraggingSelection);
                    }
                    SelectionOutcome::Lassoing => self.transition(EditorState::Lassoing),
                    SelectionOutcome::Idle => {}
                }
                self.emit_selection_change(before);
            }
            ToolKind::StrokeEraser if button == PointerButton::Primary => {
                self.selection_tool.clear_highlight();
                self.eraser_tool.begin(world, &mut self.store);
                self.transition(EditorState::ErasingStroke);
            }
            _ => {}
        }
    }

    pub fn pointer_move(&mut self, screen: Pos2) {
        let world = self.to_world(screen);

        match self.state {
            EditorState::Panning => {
                if let Some(delta) = self.pan_tool.drag(screen) {
                    self.pan_offset += delta;
                }
            }
            EditorState::Drawing { .. } => self.draw_tool.extend(world, &mut self.store),
            EditorState::DraggingSelection | EditorState::Lassoing => {
                self.selection_tool.update(world, &mut self.store);
            }
            EditorState::ErasingStroke => self.eraser_tool.update(world, &mut self.store),
            EditorState::Idle => {
                if self.active_tool.shows_hover() {
                    self.selection_tool.hover(world, &self.store);
                }
            }
        }
    }

    /// Commit or discard the running gesture and return to idle.
    pub fn pointer_up(&mut self) {
        let state = self.state;
        let before = self.selection().ids().len();

        let committed = match state {
            EditorState::Idle => return,
            EditorState::Drawing { .. } => self.draw_tool.finish(&mut self.store),
            EditorState::DraggingSelection | EditorState::Lassoing => self.selection_tool.finish(&mut self.store),
            EditorState::ErasingStroke => self.eraser_tool.finish(&mut self.store),
            EditorState::Panning => {
                self.pan_tool.finish(&mut self.store);
                false
            }
        };

        self.transition(EditorState::Idle);
        self.emit_selection_change(before);

        if committed {
            info!("{} committed, history index {}", state.name(), self.store.history_index());
            self.emit_timeline_change();
        }

        if state.is_panning() {
            self.emit(EditorEvent::ViewChanged {
                pan_offset: self.pan_offset,
            });
            // Re-derive tool state the same way a toolbar click would
            self.select_tool(self.active_tool);
        }
    }

    /// Pointer left the surface: finish like a release, then drop the hover.
    pub fn pointer_leave(&mut self) {
        self.pointer_up();
        self.selection_tool.clear_highlight();
    }

    // ---- tool & settings ----

    /// Switch tools.
    ///
    /// Any running gesture is finished first. The hover highlight is always
    /// cleared; the selection survives only into `select` and `move`.
    pub fn select_tool(&mut self, tool: ToolKind) {
        if !self.state.is_idle() {
            if let Some(running) = self.running_tool() {
                debug!("Finishing {} gesture before switching tools", running.name());
            }
            self.pointer_up();
        }

        let old = self.active_tool;
        self.active_tool = tool;
        self.selection_tool.clear_highlight();

        if !tool.keeps_selection() {
            let before = self.selection().ids().len();
            self.selection_tool.selection_mut().clear();
            self.emit_selection_change(before);
        }

        if old != tool {
            debug!("Tool changed from {:?} to {:?}", old, tool);
            self.event_bus.emit(EditorEvent::ToolChanged { old, new: tool });
        }
    }

    pub fn set_color(&mut self, color: Color32) {
        self.brush.set_color(color);
    }

    /// Set the pen color from `#rgb` / `#rrggbb` text.
    pub fn set_color_hex(&mut self, text: &str) -> EngineResult<()> {
        self.brush.set_color(palette::parse_hex(text)?);
        Ok(())
    }

    /// Width for new strokes. Must be a positive number.
    pub fn set_stroke_width(&mut self, width: f32) -> EngineResult<()> {
        self.brush.set_width(width)
    }

    pub fn set_background_color(&mut self, color: Color32) {
        self.background_color = color;
        self.background_changed();
    }

    pub fn cycle_background_mode(&mut self) -> BackgroundMode {
        self.background_mode = self.background_mode.next();
        self.background_changed();
        self.background_mode
    }

    fn background_changed(&mut self) {
        self.emit(EditorEvent::BackgroundChanged {
            color: self.background_color,
            mode: self.background_mode,
        });
    }

    /// What the background mode fills the surface with; `None` is see-through.
    pub fn background_fill(&self) -> Option<Color32> {
        match self.background_mode {
            BackgroundMode::Off if self.config.transparent => None,
            BackgroundMode::Off => Some(STANDALONE_BACKGROUND),
            BackgroundMode::TransparentSolid => {
                Some(palette::with_alpha(self.background_color, self.config.transparency))
            }
            BackgroundMode::OpaqueSolid => Some(self.background_color),
        }
    }

    // ---- history ----

    pub fn can_undo(&self) -> bool {
        self.store.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.store.can_redo()
    }

    /// Step back one entry. Only honoured while no gesture is running.
    pub fn undo(&mut self) -> bool {
        if !self.state.is_idle() {
            debug!("Ignoring undo while {}", self.state.name());
            return false;
        }
        let moved = self.store.undo();
        if moved {
            self.emit_timeline_change();
        }
        moved
    }

    /// Step forward one entry. Only honoured while no gesture is running.
    pub fn redo(&mut self) -> bool {
        if !self.state.is_idle() {
            debug!("Ignoring redo while {}", self.state.name());
            return false;
        }
        let moved = self.store.redo();
        if moved {
            self.emit_timeline_change();
        }
        moved
    }

    // ---- output ----

    /// Everything the render adapter needs for one frame.
    pub fn frame(&self) -> RenderFrame {
        let strokes = self.store.visible();
        let selection = self.selection();

        let show_highlight = match self.active_tool {
            ToolKind::StrokeEraser => !self.state.is_erasing(),
            ToolKind::Move => !self.state.is_dragging(),
            _ => false,
        };

        RenderFrame {
            strokes: strokes.to_vec(),
            pan_offset: self.pan_offset,
            background: self.background_fill(),
            selection_box: if selection.is_empty() {
                None
            } else {
                selection.bounding_box(strokes)
            },
            lasso_path: selection.lasso().map(<[Pos2]>::to_vec),
            // Undo can take the hovered stroke away before the pointer moves
            highlighted: selection
                .highlighted()
                .filter(|id| show_highlight && find_stroke(*id, strokes).is_some()),
        }
    }

    /// The persisted shape of the current board.
    pub fn document(&self) -> Document {
        Document {
            timeline: self.store.timeline().to_vec(),
            history_index: self.store.history_index(),
            pan_offset: self.pan_offset,
            background_color: self.background_color,
            background_mode: self.background_mode,
            saved_at: time::timestamp_secs(),
        }
    }

    /// Hand the board to the persistence adapter. Failures are logged only.
    pub fn persist(&mut self) {
        if !self.config.save_enabled {
            return;
        }
        let document = self.document();
        if let Some(persistence) = self.persistence.as_mut() {
            if let Err(err) = persistence.save(&document) {
                warn!("Failed to save board: {}", err);
            }
        }
    }

    // ---- internals ----

    fn running_tool(&self) -> Option<&dyn Tool> {
        [
            &self.draw_tool as &dyn Tool,
            &self.eraser_tool,
            &self.pan_tool,
            &self.selection_tool,
        ]
        .into_iter()
        .find(|tool| tool.is_active(&self.store))
    }

    fn transition(&mut self, new: EditorState) {
        if !self.state.can_transition_to(&new) {
            warn!("Refusing transition from {} to {}", self.state.name(), new.name());
            return;
        }
        let old = std::mem::replace(&mut self.state, new);
        if old != new {
            debug!("{} -> {}", old.name(), new.name());
            self.event_bus.emit(EditorEvent::StateChanged { old, new });
        }
    }

    /// Broadcast `event`, saving first when it changes the board.
    fn emit(&mut self, event: EditorEvent) {
        if event.is_persistent() {
            self.persist();
        }
        self.event_bus.emit(event);
    }

    fn emit_timeline_change(&mut self) {
        self.emit(EditorEvent::TimelineChanged {
            history_index: self.store.history_index(),
            len: self.store.len(),
        });
    }

    fn emit_selection_change(&self, before: usize) {
        let count = self.selection().ids().len();
        if count != before {
            self.event_bus.emit(EditorEvent::SelectionChanged { count });
        }
    }
}
