//! JSON file helpers.
//!
//! Writes go to a temporary file in the target's directory which is then
//! renamed over the target, so readers never observe a half-written file.

use std::fs;
use std::io::Write;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tempfile::NamedTempFile;

use crate::errors::ProjectError;

/// Read and parse a JSON file.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ProjectError> {
    let text = fs::read_to_string(path).map_err(|e| ProjectError::io(path, e))?;
    serde_json::from_str(&text).map_err(|e| ProjectError::json(path, e))
}

/// Read a JSON file if it exists.
pub fn read_json_opt<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, ProjectError> {
    if !path.exists() {
        return Ok(None);
    }
    read_json(path).map(Some)
}

/// Serialize `value` (pretty) and atomically replace `path`.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), ProjectError> {
    let mut text = serde_json::to_string_pretty(value).map_err(|e| ProjectError::json(path, e))?;
    text.push('\n');
    write_atomic(path, text.as_bytes())
}

/// Atomically replace `path` with `bytes`, creating parent directories.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), ProjectError> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(|e| ProjectError::io(dir, e))?;

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| ProjectError::io(dir, e))?;
    tmp.write_all(bytes).map_err(|e| ProjectError::io(tmp.path(), e))?;
    tmp.as_file()
        .sync_all()
        .map_err(|e| ProjectError::io(tmp.path(), e))?;
    tmp.persist(path)
        .map_err(|e| ProjectError::io(path, e.error))?;
    Ok(())
}
