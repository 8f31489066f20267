use std::fs;
use std::path::{Path, PathBuf};

use crate::io::storage::atomic_write;
use crate::model::AppConfig;

const CONFIG_FILE: &str = "config.toml";

/// Error type for config edits. Plain reads never fail; a missing or
/// unparseable config falls back to defaults.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml_edit::TomlError,
    },
}

pub fn config_path(dir: &Path) -> PathBuf {
    dir.join(CONFIG_FILE)
}

/// Read config.toml from the app directory, falling back to defaults when
/// the file is missing or does not parse.
pub fn read_config(dir: &Path) -> AppConfig {
    let path = config_path(dir);
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(_) => return AppConfig::default(),
    };
    toml::from_str(&content).unwrap_or_default()
}

/// Persist a theme choice, editing config.toml in place so user formatting
/// and comments survive. Creates the file if it does not exist.
pub fn update_theme(dir: &Path, theme: &str) -> Result<(), ConfigError> {
    let path = config_path(dir);
    let mut doc = match fs::read_to_string(&path) {
        Ok(content) => content
            .parse::<toml_edit::DocumentMut>()
            .map_err(|e| ConfigError::ParseError {
                path: path.clone(),
                source: e,
            })?,
        Err(_) => toml_edit::DocumentMut::new(),
    };

    if !doc.contains_key("ui") {
        doc["ui"] = toml_edit::Item::Table(toml_edit::Table::new());
    }
    doc["ui"]["theme"] = toml_edit::value(theme);

    atomic_write(&path, doc.to_string().as_bytes()).map_err(|e| ConfigError::WriteError {
        path,
        source: e,
    })
}
