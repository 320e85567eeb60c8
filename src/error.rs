//! Patch error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while patching a template
#[derive(Debug, Error)]
pub enum PatchError {
    #[error("Cannot access file: {path}")]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Template is not valid JSON: {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Could not find {key} in template {section}")]
    KeyNotFound { section: String, key: String },

    #[error("Failed to serialize template: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl PatchError {
    pub(crate) fn file_access(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileAccess {
            path: path.into(),
            source,
        }
    }

    /// True for the one failure the CLI reports without a diagnostic trace
    pub fn is_key_not_found(&self) -> bool {
        matches!(self, Self::KeyNotFound { .. })
    }
}
