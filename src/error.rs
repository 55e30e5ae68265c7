// src/error.rs
use std::{io, path::PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum SortError {
    #[error("path not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("invalid JSON in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("JSON serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl SortError {
    /// Missing inputs are usage errors rather than processing failures.
    pub fn is_usage(&self) -> bool {
        matches!(self, SortError::NotFound(_) | SortError::NotADirectory(_))
    }
}
