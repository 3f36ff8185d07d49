//! Parse a release API response into ReleaseInfo.

use serde::Deserialize;

use super::{AssetInfo, ReleaseInfo};
use crate::error::Error;

/// The API reports missing repos and tags with this message, sometimes under a 2xx status.
const NOT_FOUND_MESSAGE: &str = "Not Found";

#[derive(Debug, Deserialize)]
struct ApiRelease {
    tag_name: Option<String>,
    assets: Option<Vec<ApiAsset>>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiAsset {
    browser_download_url: Option<String>,
}

/// Turns `(status, body)` of a release request into [`ReleaseInfo`].
///
/// Assets without a `browser_download_url` are dropped; asset order is preserved.
pub fn parse_release(repo: &str, status: u32, body: &[u8]) -> Result<ReleaseInfo, Error> {
    let not_found = |reason: String| Error::ReleaseNotFound {
        repo: repo.to_string(),
        reason,
    };
    let parsed = serde_json::from_slice::<ApiRelease>(body);

    if !(200..300).contains(&status) {
        let reason = parsed
            .ok()
            .and_then(|r| r.message)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| format!("HTTP {}", status));
        return Err(not_found(reason));
    }

    let release = parsed.map_err(|e| not_found(format!("invalid release JSON: {}", e)))?;
    if release.message.as_deref() == Some(NOT_FOUND_MESSAGE) {
        return Err(not_found(NOT_FOUND_MESSAGE.to_string()));
    }
    let tag_name = release
        .tag_name
        .filter(|t| !t.is_empty())
        .ok_or_else(|| not_found("response has no tag_name".to_string()))?;

    let assets = release
        .assets
        .unwrap_or_default()
        .into_iter()
        .filter_map(|a| a.browser_download_url)
        .filter(|u| !u.is_empty())
        .map(|u| AssetInfo::from_url(&u))
        .collect();

    Ok(ReleaseInfo { tag_name, assets })
}
