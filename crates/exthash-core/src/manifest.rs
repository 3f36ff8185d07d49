//! Extension manifest (`manifest.json`) read straight out of the release archive.
//!
//! Manifest data is optional metadata: every failure here degrades to `None`
//! and the run carries on with the checksum it already has.

use anyhow::Result;
use serde_json::Value;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Archive entry holding the extension manifest.
pub const MANIFEST_ENTRY: &str = "manifest.json";

/// Entries larger than this (after decompression) are treated as unreadable.
pub const MAX_ENTRY_BYTES: u64 = 1 << 20;

/// Reads a single named entry from an archive without extracting anything else.
pub trait ArchiveReader {
    /// Bytes of `entry`, or `None` if the archive or entry cannot be read.
    fn read_entry(&self, archive: &Path, entry: &str) -> Option<Vec<u8>>;
}

/// [`ArchiveReader`] for zip archives, backed by the `zip` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZipArchiveReader;

impl ArchiveReader for ZipArchiveReader {
    fn read_entry(&self, archive: &Path, entry: &str) -> Option<Vec<u8>> {
        match read_zip_entry(archive, entry) {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                tracing::debug!("no {} in {}: {:#}", entry, archive.display(), e);
                None
            }
        }
    }
}

fn read_zip_entry(archive: &Path, entry: &str) -> Result<Vec<u8>> {
    let file = File::open(archive)?;
    let mut zip = zip::ZipArchive::new(BufReader::new(file))?;
    let member = zip.by_name(entry)?;
    let mut bytes = Vec::with_capacity(member.size().min(MAX_ENTRY_BYTES) as usize);
    member.take(MAX_ENTRY_BYTES + 1).read_to_end(&mut bytes)?;
    if bytes.len() as u64 > MAX_ENTRY_BYTES {
        anyhow::bail!("{} exceeds {} bytes", entry, MAX_ENTRY_BYTES);
    }
    Ok(bytes)
}

/// Identity fields of an extension manifest. Any of them may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManifestInfo {
    pub id: Option<String>,
    pub name: Option<String>,
    pub version: Option<String>,
}

impl ManifestInfo {
    pub fn id(&self) -> &str {
        self.id.as_deref().unwrap_or("")
    }

    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    pub fn version(&self) -> &str {
        self.version.as_deref().unwrap_or("")
    }

    /// True when none of id, name, or version is set.
    pub fn is_empty(&self) -> bool {
        self.id().is_empty() && self.name().is_empty() && self.version().is_empty()
    }
}

/// Parses manifest bytes. Returns `None` for empty, non-UTF-8, malformed, or non-object JSON.
/// Non-string or empty field values count as absent.
pub fn parse_manifest(bytes: &[u8]) -> Option<ManifestInfo> {
    let text = std::str::from_utf8(bytes).ok()?.trim();
    if text.is_empty() {
        return None;
    }
    let value: Value = match serde_json::from_str(text) {
        Ok(v) => v,
        Err(e) => {
            tracing::debug!("malformed {}: {}", MANIFEST_ENTRY, e);
            return None;
        }
    };
    let obj = value.as_object()?;
    let field = |key: &str| {
        obj.get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };
    Some(ManifestInfo {
        id: field("id"),
        name: field("name"),
        version: field("version"),
    })
}

/// Reads and parses `manifest.json` from `archive` via `reader`.
pub fn read_manifest(reader: &dyn ArchiveReader, archive: &Path) -> Option<ManifestInfo> {
    let bytes = reader.read_entry(archive, MANIFEST_ENTRY)?;
    parse_manifest(&bytes)
}
