use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use log::{debug, info};
use thiserror::Error;

use crate::document::Document;

/// File name of the saved board inside the state directory.
pub const DOCUMENT_FILE: &str = "drawing-board-data.json";

/// Errors that can occur during state persistence operations
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Failed to serialize state: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Failed to write state: {0}")]
    WriteError(#[from] std::io::Error),

    #[error("Failed to read state file: {0}")]
    ReadError(String),
}

/// Result type for persistence operations
pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Where the board document is kept between runs.
pub trait PersistenceAdapter {
    /// The saved document, or `None` when nothing was saved yet.
    fn load(&self) -> PersistenceResult<Option<Document>>;

    fn save(&mut self, document: &Document) -> PersistenceResult<()>;
}

/// One JSON file in a state directory.
#[derive(Debug, Clone)]
pub struct JsonFilePersistence {
    state_dir: PathBuf,
}

impl JsonFilePersistence {
    pub fn new(state_dir: impl Into<PathBuf>) -> Self {
        Self {
            state_dir: state_dir.into(),
        }
    }

    pub fn path(&self) -> PathBuf {
        self.state_dir.join(DOCUMENT_FILE)
    }

    pub fn state_dir(&self) -> &Path {
        &self.state_dir
    }
}

impl PersistenceAdapter for JsonFilePersistence {
    fn load(&self) -> PersistenceResult<Option<Document>> {
        let path = self.path();
        if !path.exists() {
            debug!("No saved board at {}", path.display());
            return Ok(None);
        }

        let json = fs::read_to_string(&path).map_err(|e| PersistenceError::ReadError(e.to_string()))?;
        let document = Document::from_json(&json)?;
        info!("Loaded {} strokes from {}", document.timeline.len(), path.display());
        Ok(Some(document))
    }

    fn save(&mut self, document: &Document) -> PersistenceResult<()> {
        // Create state directory if it doesn't exist
        fs::create_dir_all(&self.state_dir)?;

        let json = document.to_json()?;
        let path = self.path();
        // Write next to the target first so a crash never leaves half a file
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &path)?;

        debug!("Saved board to {}", path.display());
        Ok(())
    }
}

/// Keeps the last saved document in memory. Clones share the same slot, so a
/// test can hand one clone to the editor and inspect the other.
#[derive(Debug, Clone, Default)]
pub struct MemoryPersistence {
    slot: Rc<RefCell<Option<Document>>>,
    saves: Rc<RefCell<usize>>,
}

impl MemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(document: Document) -> Self {
        let persistence = Self::default();
        *persistence.slot.borrow_mut() = Some(document);
        persistence
    }

    pub fn document(&self) -> Option<Document> {
        self.slot.borrow().clone()
    }

    /// How many times `save` was called.
    pub fn save_count(&self) -> usize {
        *self.saves.borrow()
    }
}

impl PersistenceAdapter for MemoryPersistence {
    fn load(&self) -> PersistenceResult<Option<Document>> {
        Ok(self.slot.borrow().clone())
    }

    fn save(&mut self, document: &Document) -> PersistenceResult<()> {
        *self.slot.borrow_mut() = Some(document.clone());
        *self.saves.borrow_mut() += 1;
        Ok(())
    }
}
