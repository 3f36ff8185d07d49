//! Pick the archive asset to verify.

use super::AssetInfo;
use crate::error::Error;

/// Archive suffix an asset download URL must end with.
const ARCHIVE_SUFFIX: &str = ".zip";

/// At most this many candidates are listed when the choice is ambiguous.
pub const MAX_LISTED_CANDIDATES: usize = 5;

/// The chosen asset, plus the candidates to warn about when more than one matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetSelection {
    pub asset: AssetInfo,
    /// Number of `.zip` assets in the release.
    pub matching: usize,
    /// First [`MAX_LISTED_CANDIDATES`] matches when `matching > 1`, empty otherwise.
    pub candidates: Vec<AssetInfo>,
}

impl AssetSelection {
    pub fn is_ambiguous(&self) -> bool {
        self.matching > 1
    }
}

/// Selects the first asset whose download URL ends in `.zip`, in release order.
///
/// Several matches are not an error: the first wins and a warning is logged
/// naming up to [`MAX_LISTED_CANDIDATES`] of them.
pub fn select_asset(assets: &[AssetInfo]) -> Result<AssetSelection, Error> {
    let zips: Vec<&AssetInfo> = assets
        .iter()
        .filter(|a| a.download_url.ends_with(ARCHIVE_SUFFIX))
        .collect();

    let first = *zips.first().ok_or(Error::NoAssetFound)?;
    let candidates: Vec<AssetInfo> = if zips.len() > 1 {
        zips.iter()
            .take(MAX_LISTED_CANDIDATES)
            .map(|a| (*a).clone())
            .collect()
    } else {
        Vec::new()
    };

    if !candidates.is_empty() {
        let urls: Vec<&str> = candidates.iter().map(|a| a.download_url.as_str()).collect();
        tracing::warn!(
            "multiple zip assets found ({}), using first one: {}",
            zips.len(),
            urls.join(", ")
        );
    }

    Ok(AssetSelection {
        asset: first.clone(),
        matching: zips.len(),
        candidates,
    })
}
