//! JSON template document: load, patch one nested key, write

use log::{debug, info};
use serde::Serialize;
use serde_json::Value;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::PatchError;

/// Nested location of the value to replace: `document[section][key]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetKey {
    pub section: String,
    pub key: String,
}

impl TargetKey {
    pub fn new(section: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            section: section.into(),
            key: key.into(),
        }
    }
}

impl Default for TargetKey {
    fn default() -> Self {
        Self::new(crate::DEFAULT_SECTION, crate::DEFAULT_KEY)
    }
}

impl fmt::Display for TargetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.section, self.key)
    }
}

/// A parsed template document
#[derive(Debug, Clone)]
pub struct Template {
    root: Value,
}

impl Template {
    /// Read and parse a template file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PatchError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| PatchError::file_access(path, e))?;
        Self::parse(&content, path)
    }

    /// Parse template text; `path` is only used for error reporting
    pub fn parse(content: &str, path: impl AsRef<Path>) -> Result<Self, PatchError> {
        let path = path.as_ref();
        let root = serde_json::from_str(content).map_err(|source| PatchError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Parsed template {}", path.display());
        Ok(Self { root })
    }

    pub fn value(&self) -> &Value {
        &self.root
    }

    /// Replace `target` with a string value and return what was there before.
    ///
    /// The document is left untouched when the section is missing, is not an
    /// object, or lacks the key. Any prior value type is overwritten.
    pub fn apply_update(&mut self, target: &TargetKey, value: &str) -> Result<Value, PatchError> {
        let slot = self
            .root
            .get_mut(&target.section)
            .and_then(Value::as_object_mut)
            .and_then(|section| section.get_mut(&target.key))
            .ok_or_else(|| PatchError::KeyNotFound {
                section: target.section.clone(),
                key: target.key.clone(),
            })?;

        if !slot.is_string() {
            debug!("Overwriting non-string value at {}: {}", target, slot);
        }

        let previous = std::mem::replace(slot, Value::String(value.to_string()));
        info!("Updated {} ({} bytes)", target, value.len());
        Ok(previous)
    }

    /// Serialize with `indent` spaces per level; non-ASCII stays literal
    pub fn to_pretty_bytes(&self, indent: usize) -> Result<Vec<u8>, PatchError> {
        let indent = " ".repeat(indent);
        let mut buf = Vec::new();
        let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(indent.as_bytes()));
        self.root.serialize(&mut ser)?;
        Ok(buf)
    }

    /// Serialize and overwrite `path`
    pub fn write(&self, path: impl AsRef<Path>, indent: usize) -> Result<usize, PatchError> {
        let path = path.as_ref();
        let bytes = self.to_pretty_bytes(indent)?;
        fs::write(path, &bytes).map_err(|e| PatchError::file_access(path, e))?;
        info!("Wrote template {} ({} bytes)", path.display(), bytes.len());
        Ok(bytes.len())
    }
}
