//! Record a verified version in the registry document.

use anyhow::Result;
use serde_json::{Map, Value};
use std::path::Path;

use super::model::{parse_categories, RegistryEntry, RegistryUpdate, UpdateOutcome, CATEGORY_PROMPT};
use super::persist::{load_registry, write_registry};
use super::format_registry_timestamp;
use crate::error::Error;
use crate::prompt::Prompter;

fn invalid(reason: &str) -> Error {
    Error::InvalidRegistry {
        reason: reason.to_string(),
    }
}

fn str_field<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value.get(key).and_then(Value::as_str)
}

/// Index of the entry for `id` (when non-empty), else of the entry whose `repository` matches.
fn find_entry(extensions: &[Value], id: &str, repository_url: &str) -> Option<usize> {
    let by_id = if id.is_empty() {
        None
    } else {
        extensions.iter().position(|e| str_field(e, "id") == Some(id))
    };
    by_id.or_else(|| {
        extensions
            .iter()
            .position(|e| str_field(e, "repository") == Some(repository_url))
    })
}

/// Drops records for `version` and puts `record` first. Returns whether a record was dropped.
fn prepend_version(entry: &mut Map<String, Value>, record: Value, version: &str) -> bool {
    let existing = entry
        .get("verifiedVersions")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    let before = existing.len();
    let mut versions: Vec<Value> = existing
        .into_iter()
        .filter(|r| str_field(r, "version") != Some(version))
        .collect();
    let replaced = versions.len() != before;
    versions.insert(0, record);
    entry.insert("verifiedVersions".to_string(), Value::Array(versions));
    replaced
}

/// Applies `update` to an in-memory document.
///
/// Locates the entry by id, then by repository URL. When neither matches, a new
/// entry is created: this needs a non-empty id ([`Error::MissingId`]) and a
/// category answer from `prompter` within the allowed vocabulary
/// ([`Error::InvalidCategory`]). On error the document is left unchanged.
pub fn apply_update(
    doc: &mut Value,
    update: &RegistryUpdate,
    prompter: &dyn Prompter,
) -> Result<UpdateOutcome> {
    let record = serde_json::to_value(update.record())?;
    let root = doc
        .as_object_mut()
        .ok_or_else(|| invalid("top-level value is not an object"))?;
    let extensions = root
        .get_mut("extensions")
        .and_then(Value::as_array_mut)
        .ok_or_else(|| invalid("registry.json missing extensions array"))?;

    let (index, created_entry) = match find_entry(extensions, &update.id, &update.repository_url) {
        Some(i) => (i, false),
        None => {
            if update.id.is_empty() {
                return Err(Error::MissingId.into());
            }
            let answer = prompter.input(CATEGORY_PROMPT)?;
            let categories = parse_categories(&answer)?;
            let entry = RegistryEntry::new(&update.id, &update.repository_url, categories);
            extensions.push(serde_json::to_value(entry)?);
            tracing::info!("adding new registry entry {}", update.id);
            (extensions.len() - 1, true)
        }
    };

    let entry = extensions[index]
        .as_object_mut()
        .ok_or_else(|| invalid("extension entry is not an object"))?;
    let entry_id = entry
        .get("id")
        .and_then(Value::as_str)
        .unwrap_or(update.id.as_str())
        .to_string();
    let replaced_version = prepend_version(entry, record, &update.version);

    root.insert(
        "lastUpdated".to_string(),
        Value::String(format_registry_timestamp(update.updated_at)),
    );

    Ok(UpdateOutcome {
        entry_id,
        created_entry,
        replaced_version,
    })
}

/// Loads the registry at `path`, applies `update`, and writes it back.
///
/// Every failure happens before the write, so a failed update leaves the file as it was.
pub fn update_registry(
    path: &Path,
    update: &RegistryUpdate,
    prompter: &dyn Prompter,
) -> Result<UpdateOutcome> {
    let mut doc = load_registry(path)?;
    let outcome = apply_update(&mut doc, update, prompter)?;
    write_registry(path, &doc)?;
    tracing::info!(
        "recorded {} sha256={} for {} in {} (new entry: {}, replaced: {})",
        update.version,
        update.sha256,
        outcome.entry_id,
        path.display(),
        outcome.created_entry,
        outcome.replaced_version
    );
    Ok(outcome)
}
