use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tempfile::NamedTempFile;

use crate::model::Task;

/// The key-value store file inside the app directory.
const STORE_FILE: &str = "store.json";

/// The single key holding the serialized task list.
const TASKS_KEY: &str = "tasks";

/// Error type for storage writes. Reads never fail; missing or corrupt
/// data degrades to an empty list.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("could not write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not encode task list: {0}")]
    EncodeError(#[from] serde_json::Error),
}

/// The persistent key-value mirror of the task list.
///
/// `store.json` holds a JSON object; the task list lives under the
/// `"tasks"` key. Other keys are preserved across writes.
#[derive(Debug, Clone)]
pub struct Storage {
    path: PathBuf,
}

impl Storage {
    pub fn new(dir: &Path) -> Storage {
        Storage {
            path: dir.join(STORE_FILE),
        }
    }

    /// Read the persisted task list. A missing file, unreadable file,
    /// corrupt JSON, or absent key all yield an empty list.
    pub fn read_tasks(&self) -> Vec<Task> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(_) => return Vec::new(),
        };
        let root: Value = match serde_json::from_str(&content) {
            Ok(value) => value,
            Err(_) => return Vec::new(),
        };
        match root.get(TASKS_KEY) {
            Some(value) => serde_json::from_value(value.clone()).unwrap_or_default(),
            None => Vec::new(),
        }
    }

    /// Write the task list under the `"tasks"` key, keeping any other keys
    /// already in the store object. The write is atomic (temp + rename).
    pub fn write_tasks(&self, tasks: &[Task]) -> Result<(), StorageError> {
        let mut root: Map<String, Value> = fs::read_to_string(&self.path)
            .ok()
            .and_then(|content| serde_json::from_str::<Value>(&content).ok())
            .and_then(|value| value.as_object().cloned())
            .unwrap_or_default();

        root.insert(TASKS_KEY.to_string(), serde_json::to_value(tasks)?);
        let content = serde_json::to_string_pretty(&Value::Object(root))?;

        atomic_write(&self.path, content.as_bytes()).map_err(|e| StorageError::WriteError {
            path: self.path.clone(),
            source: e,
        })
    }
}

/// Write `content` to `path` atomically using a temp file + rename.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
