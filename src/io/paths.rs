use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Resolve the focal app directory.
///
/// `$FOCAL_DIR` wins (also what `--dir` sets for subprocesses), then
/// `$XDG_DATA_HOME/focal`, then `~/.local/share/focal`.
pub fn app_dir() -> PathBuf {
    if let Some(dir) = env::var_os("FOCAL_DIR") {
        return PathBuf::from(dir);
    }
    let data_home = env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| dirs_home().join(".local").join("share"));
    data_home.join("focal")
}

/// Get the user's home directory
fn dirs_home() -> PathBuf {
    env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/"))
}

/// Create the app directory if it does not exist yet.
pub fn ensure_dir(dir: &Path) -> io::Result<()> {
    fs::create_dir_all(dir)
}
