#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod components;
pub mod config;
pub mod document;
pub mod error;
pub mod event;
pub mod geometry;
pub mod history;
pub mod input;
pub mod palette;
pub mod panels;
pub mod raster;
pub mod renderer;
pub mod selection;
pub mod state;
pub mod stroke;
pub mod tools;
pub mod util;

pub use app::AnnotateApp;
pub use config::{BoardConfig, ConfigError};
pub use document::{BackgroundMode, Document};
pub use error::{EngineError, EngineResult};
pub use event::{EditorEvent, EventBus, EventHandler, SubscriptionId};
pub use history::{StrokeStore, ViewState};
pub use input::{InputEvent, InputHandler};
pub use renderer::{RenderFrame, Renderer};
pub use selection::Selection;
pub use state::{
    EditorContext, EditorState, JsonFilePersistence, MemoryPersistence, PersistenceAdapter, PersistenceError,
    PersistenceResult,
};
pub use stroke::{Stroke, StrokeId, StrokeKind, StrokeRef};
pub use tools::{Brush, Tool, ToolKind};
