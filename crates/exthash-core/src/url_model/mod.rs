//! URL helpers: local filenames for release assets and repository URLs.

mod sanitize;

pub use sanitize::sanitize_filename;

/// Filename used when an asset URL has no usable last path segment.
const DEFAULT_ASSET_FILENAME: &str = "asset.zip";

/// Derives the local filename for a downloaded asset from its URL.
///
/// Uses the last path segment (query and fragment ignored), sanitized so it
/// cannot escape the scratch directory.
///
/// - `asset_filename("https://github.com/o/r/releases/download/v1/ext.zip")` → `"ext.zip"`
/// - `asset_filename("https://example.com/")` → `"asset.zip"`
pub fn asset_filename(url: &str) -> String {
    let sanitized = last_path_segment(url)
        .map(|raw| sanitize_filename(&raw))
        .unwrap_or_default();
    if sanitized.is_empty() || sanitized == "." || sanitized == ".." {
        DEFAULT_ASSET_FILENAME.to_string()
    } else {
        sanitized
    }
}

/// Last non-empty segment of the URL path, if the URL parses and has one.
fn last_path_segment(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    parsed
        .path_segments()?
        .filter(|s| !s.is_empty())
        .last()
        .map(str::to_string)
}

/// Public web URL of a GitHub repository, as stored in the registry's `repository` field.
pub fn repository_url(repo: &str) -> String {
    format!("https://github.com/{}", repo.trim_matches('/'))
}
