//! Release resolution against the GitHub REST API.
//!
//! Fetches either the latest release or the release for a given tag and reduces
//! the response to the tag name and the asset download URLs.

mod parse;
mod select;

pub use parse::parse_release;
pub use select::{select_asset, AssetSelection, MAX_LISTED_CANDIDATES};

use anyhow::Result;

use crate::error::Error;
use crate::http::{self, HttpOptions, GITHUB_JSON};

/// Release metadata needed by the rest of the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseInfo {
    pub tag_name: String,
    pub assets: Vec<AssetInfo>,
}

/// A downloadable file attached to a release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetInfo {
    pub download_url: String,
    /// Local filename derived from the download URL.
    pub filename: String,
}

impl AssetInfo {
    pub fn from_url(download_url: &str) -> Self {
        Self {
            download_url: download_url.to_string(),
            filename: crate::url_model::asset_filename(download_url),
        }
    }
}

/// API endpoint for `repo` (`owner/name`): the tagged release when `tag` is given, else the latest.
pub fn release_url(api_base_url: &str, repo: &str, tag: Option<&str>) -> String {
    let base = api_base_url.trim_end_matches('/');
    match tag {
        Some(tag) => format!("{}/repos/{}/releases/tag/{}", base, repo, tag),
        None => format!("{}/repos/{}/releases/latest", base, repo),
    }
}

/// Fetches release metadata. Any failure, transport included, is reported as
/// [`Error::ReleaseNotFound`].
pub fn fetch_release(
    api_base_url: &str,
    repo: &str,
    tag: Option<&str>,
    opts: &HttpOptions,
) -> Result<ReleaseInfo> {
    let url = release_url(api_base_url, repo, tag);
    tracing::info!("fetching release metadata from {}", url);
    let response = http::get(&url, opts, Some(GITHUB_JSON)).map_err(|e| Error::ReleaseNotFound {
        repo: repo.to_string(),
        reason: format!("{:#}", e),
    })?;
    let release = parse_release(repo, response.status, &response.body)?;
    tracing::info!(
        "release {} of {} has {} asset(s)",
        release.tag_name,
        repo,
        release.assets.len()
    );
    Ok(release)
}
