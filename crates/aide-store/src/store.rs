use std::cell::RefCell;
use std::path::{Path, PathBuf};

use tracing::debug;

use aide_core::{AideResult, AssistantState, StateStore};

pub const DATA_FILE_NAME: &str = "assistant_data.json";

/// Platform data dir, or the working directory when no home resolves.
pub fn default_data_path() -> PathBuf {
    directories::ProjectDirs::from("dev", "aide", "aide")
        .map(|dirs| dirs.data_dir().join(DATA_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(DATA_FILE_NAME))
}

// ---------------------------------------------------------------------------
// JSON file
// ---------------------------------------------------------------------------

/// The whole state as one pretty-printed JSON document, rewritten in full on
/// every save.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StateStore for JsonFileStore {
    fn load(&self) -> AideResult<AssistantState> {
        if !self.path.exists() {
            debug!("no state file at {}, starting empty", self.path.display());
            return Ok(AssistantState::default());
        }
        let content = std::fs::read_to_string(&self.path)?;
        let state = serde_json::from_str(&content)?;
        Ok(state)
    }

    fn save(&self, state: &AssistantState) -> AideResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(state)?;
        std::fs::write(&self.path, json)?;
        debug!(
            tasks = state.tasks.len(),
            notes = state.notes.len(),
            "saved state to {}",
            self.path.display()
        );
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// In-memory
// ---------------------------------------------------------------------------

/// Keeps the serialized document in memory. Goes through the same JSON
/// encoding as [`JsonFileStore`], so round-trip behavior matches.
#[derive(Default)]
pub struct MemoryStore {
    document: RefCell<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with a raw document, as if it had been read from disk.
    pub fn with_document(document: impl Into<String>) -> Self {
        Self {
            document: RefCell::new(Some(document.into())),
        }
    }

    pub fn document(&self) -> Option<String> {
        self.document.borrow().clone()
    }
}

impl StateStore for MemoryStore {
    fn load(&self) -> AideResult<AssistantState> {
        match self.document.borrow().as_deref() {
            Some(doc) => Ok(serde_json::from_str(doc)?),
            None => Ok(AssistantState::default()),
        }
    }

    fn save(&self, state: &AssistantState) -> AideResult<()> {
        let json = serde_json::to_string_pretty(state)?;
        *self.document.borrow_mut() = Some(json);
        Ok(())
    }
}
