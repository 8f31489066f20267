use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::io::storage::atomic_write;

const STATE_FILE: &str = ".state.json";

/// Persisted TUI selections (written to .state.json).
/// These belong to the presentation layer; the core never reads them.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct UiState {
    /// Active filter mode ("all", "pending", "completed", "high", ...)
    #[serde(default)]
    pub filter: String,
    /// Active sort key ("created", "priority", "title", "completed")
    #[serde(default)]
    pub sort: String,
    /// Last search pattern
    #[serde(default)]
    pub last_search: Option<String>,
    /// Cursor position in the list view
    #[serde(default)]
    pub cursor: usize,
}

/// Read .state.json from the app directory.
/// Missing or malformed state is simply absent.
pub fn read_ui_state(dir: &Path) -> Option<UiState> {
    let path = dir.join(STATE_FILE);
    let content = fs::read_to_string(&path).ok()?;
    serde_json::from_str(&content).ok()
}

/// Write .state.json to the app directory.
pub fn write_ui_state(dir: &Path, state: &UiState) -> Result<(), std::io::Error> {
    let path = dir.join(STATE_FILE);
    let content = serde_json::to_string_pretty(state)?;
    atomic_write(&path, content.as_bytes())
}
