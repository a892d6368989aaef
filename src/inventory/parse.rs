use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

/// Typed error for a dump that cannot be used, so strict mode can report
/// the offending file instead of a bare serde message.
#[derive(Debug)]
pub struct InputError {
    pub path: PathBuf,
    pub reason: String,
}

impl InputError {
    pub fn new(path: &Path, reason: impl std::fmt::Display) -> Self {
        Self {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }
}

impl std::fmt::Display for InputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.reason)
    }
}

impl std::error::Error for InputError {}

/// Read and decode one JSON dump
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, InputError> {
    let content = std::fs::read_to_string(path).map_err(|e| InputError::new(path, e))?;
    serde_json::from_str(&content).map_err(|e| InputError::new(path, e))
}
