//! Fatal error taxonomy for a verification run.
//!
//! Pipeline functions return `anyhow::Result` and carry one of these variants
//! when the failure is a domain condition rather than plain I/O, so callers can
//! `downcast_ref::<Error>()` to tell them apart.

use crate::registry::Category;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Release endpoint answered not-found, a non-2xx status, or an unusable body.
    #[error("release not found for {repo}: {reason}")]
    ReleaseNotFound { repo: String, reason: String },

    /// The release has no asset whose download URL ends in `.zip`.
    #[error("no .zip assets found in release")]
    NoAssetFound,

    /// Asset transfer failed (transport error, non-2xx status, or empty body).
    #[error("failed to download {url}: {reason}")]
    DownloadFailed { url: String, reason: String },

    /// Registry document is not JSON or lacks an `extensions` array.
    #[error("invalid registry: {reason}")]
    InvalidRegistry { reason: String },

    /// Category input contained values outside the allowed vocabulary.
    #[error(
        "invalid categories: {}. Allowed: {}",
        .invalid.join(", "),
        Category::allowed_list()
    )]
    InvalidCategory { invalid: Vec<String> },

    /// A new registry entry cannot be created without an extension id.
    #[error("missing extension id for new registry entry")]
    MissingId,
}
