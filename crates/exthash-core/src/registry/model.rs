//! Typed pieces of the registry document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::Error;

/// Question asked when a new entry needs categories.
pub const CATEGORY_PROMPT: &str = "Extension not found. Enter categories (comma-separated) [utility]";

/// Allowed values of an entry's `categories`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    AiProvider,
    Tool,
    Theme,
    Utility,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::AiProvider,
        Category::Tool,
        Category::Theme,
        Category::Utility,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::AiProvider => "ai-provider",
            Category::Tool => "tool",
            Category::Theme => "theme",
            Category::Utility => "utility",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == s)
    }

    /// Comma-separated vocabulary, for error messages.
    pub fn allowed_list() -> String {
        Self::ALL.map(Category::as_str).join(", ")
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses a comma-separated category answer.
///
/// A blank answer means `[utility]`. Duplicates collapse to their first
/// occurrence. Any unknown value rejects the whole answer.
pub fn parse_categories(raw: &str) -> Result<Vec<Category>, Error> {
    let items: Vec<&str> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    if items.is_empty() {
        return Ok(vec![Category::Utility]);
    }

    let invalid: Vec<String> = items
        .iter()
        .filter(|s| Category::parse(s).is_none())
        .map(|s| s.to_string())
        .collect();
    if !invalid.is_empty() {
        return Err(Error::InvalidCategory { invalid });
    }

    let mut categories = Vec::with_capacity(items.len());
    for c in items.into_iter().filter_map(Category::parse) {
        if !categories.contains(&c) {
            categories.push(c);
        }
    }
    Ok(categories)
}

/// One checksum confirmed by an operator for one version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifiedVersionRecord {
    pub version: String,
    pub sha256: String,
    pub verified_at: String,
}

/// A registry entry as created by this tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryEntry {
    pub id: String,
    pub repository: String,
    pub categories: Vec<Category>,
    pub verified: bool,
    pub blocked: bool,
    pub featured: bool,
    pub verified_versions: Vec<VerifiedVersionRecord>,
}

impl RegistryEntry {
    /// New entry with all flags off and no verified versions.
    pub fn new(id: &str, repository: &str, categories: Vec<Category>) -> Self {
        Self {
            id: id.to_string(),
            repository: repository.to_string(),
            categories,
            verified: false,
            blocked: false,
            featured: false,
            verified_versions: Vec::new(),
        }
    }
}

/// Inputs for recording one verified version.
#[derive(Debug, Clone)]
pub struct RegistryUpdate {
    /// Extension id; may be empty when only a repository match is possible.
    pub id: String,
    pub repository_url: String,
    pub version: String,
    pub sha256: String,
    /// `verifiedAt` value, already formatted (`YYYY-MM-DD`).
    pub verified_at: String,
    /// Becomes the document's `lastUpdated`.
    pub updated_at: DateTime<Utc>,
}

impl RegistryUpdate {
    pub fn record(&self) -> VerifiedVersionRecord {
        VerifiedVersionRecord {
            version: self.version.clone(),
            sha256: self.sha256.clone(),
            verified_at: self.verified_at.clone(),
        }
    }
}

/// What an update did to the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateOutcome {
    /// Id of the entry that received the record.
    pub entry_id: String,
    /// A new entry was appended.
    pub created_entry: bool,
    /// An existing record for the same version was replaced.
    pub replaced_version: bool,
}
