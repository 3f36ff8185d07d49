//! Load and save the registry document.

use anyhow::{Context, Result};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Error;

/// Sibling file written before the atomic rename: `registry.json` → `registry.json.part`.
pub fn temp_path(path: &Path) -> PathBuf {
    let mut o = path.as_os_str().to_owned();
    o.push(".part");
    PathBuf::from(o)
}

/// Reads and parses the document. Unparseable JSON is [`Error::InvalidRegistry`].
pub fn load_registry(path: &Path) -> Result<Value> {
    let data = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let doc = serde_json::from_str(&data).map_err(|e| Error::InvalidRegistry {
        reason: format!("{} is not valid JSON: {}", path.display(), e),
    })?;
    Ok(doc)
}

/// Writes the document as 2-space indented JSON with a trailing newline.
///
/// The text goes to [`temp_path`] first and is renamed over `path`, so readers
/// see either the old or the new document.
pub fn write_registry(path: &Path, doc: &Value) -> Result<()> {
    let mut text = serde_json::to_string_pretty(doc).context("serialize registry")?;
    text.push('\n');

    let tmp = temp_path(path);
    fs::write(&tmp, text).with_context(|| format!("write {}", tmp.display()))?;
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(e).with_context(|| format!("rename {} -> {}", tmp.display(), path.display()));
    }
    Ok(())
}
