mod editor_state;
pub mod context;
pub mod persistence;

pub use editor_state::EditorState;
pub use context::EditorContext;
pub use persistence::{
    JsonFilePersistence,
    MemoryPersistence,
    PersistenceAdapter,
    PersistenceError,
    PersistenceResult,
};
