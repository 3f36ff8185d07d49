//! `registry.json`: the document tracking known extensions and their verified checksums.
//!
//! The document is edited as a generic JSON value (key order preserved) so
//! fields this tool does not model round-trip untouched. The typed structs in
//! [`model`] are only used to build the pieces that get inserted.
//!
//! There is no inter-process locking: two runs updating the same file race and
//! the last rename wins.

mod model;
mod persist;
mod update;

pub use model::{
    parse_categories, Category, RegistryEntry, RegistryUpdate, UpdateOutcome,
    VerifiedVersionRecord, CATEGORY_PROMPT,
};
pub use persist::{load_registry, temp_path, write_registry};
pub use update::{apply_update, update_registry};

use chrono::{DateTime, SecondsFormat, Utc};

/// `verifiedAt` format: calendar date, e.g. `2024-02-02`.
pub fn format_verified_date(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d").to_string()
}

/// `lastUpdated` format: UTC timestamp with second precision, e.g. `2024-02-02T10:20:30Z`.
pub fn format_registry_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}
