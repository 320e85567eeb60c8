//! Script body loading and JSON string escaping

use log::debug;
use std::fs;
use std::path::Path;

use crate::PatchError;

/// Read the whole script file as UTF-8, keeping line endings as they are
pub fn load_script(path: impl AsRef<Path>) -> Result<String, PatchError> {
    let path = path.as_ref();
    let body = fs::read_to_string(path).map_err(|e| PatchError::file_access(path, e))?;
    debug!("Loaded script {} ({} bytes)", path.display(), body.len());
    Ok(body)
}

/// Escape text as the contents of a JSON string literal, without the quotes
pub fn escape_for_json(text: &str) -> Result<String, PatchError> {
    let quoted = serde_json::to_string(text)?;
    // to_string on a str always yields `"..."`
    Ok(quoted[1..quoted.len() - 1].to_string())
}
