//! The verification run: resolve release → select asset → download → hash → manifest.

use anyhow::Result;
use chrono::Utc;

use crate::checksum;
use crate::context::RunContext;
use crate::downloader;
use crate::manifest::{read_manifest, ArchiveReader, ManifestInfo, MANIFEST_ENTRY};
use crate::registry::format_verified_date;
use crate::release::{self, AssetSelection};

/// Everything learned about a release asset, ready to report or record.
#[derive(Debug, Clone)]
pub struct Verification {
    pub tag_name: String,
    pub selection: AssetSelection,
    /// Lowercase hex SHA-256 of the downloaded asset.
    pub sha256: String,
    pub size: u64,
    pub manifest: Option<ManifestInfo>,
    /// Version to record: manifest version, else the tag without a leading `v`.
    pub registry_version: String,
    /// Date of verification, `YYYY-MM-DD`.
    pub verified_at: String,
}

impl Verification {
    /// Manifest id, or `""` when the archive had none.
    pub fn manifest_id(&self) -> &str {
        self.manifest.as_ref().map(ManifestInfo::id).unwrap_or("")
    }
}

/// Version string stored in the registry for this release.
pub fn registry_version(manifest: Option<&ManifestInfo>, tag_name: &str) -> String {
    match manifest.map(ManifestInfo::version).filter(|v| !v.is_empty()) {
        Some(v) => v.to_string(),
        None => tag_name.strip_prefix('v').unwrap_or(tag_name).to_string(),
    }
}

/// Runs the verification steps for `repo` (`owner/name`) at `tag` (latest when `None`).
///
/// The asset is downloaded into the context's scratch directory. Release, asset
/// and download failures are fatal; a missing or unreadable manifest is not.
pub fn verify_release(
    ctx: &RunContext,
    repo: &str,
    tag: Option<&str>,
    archive_reader: &dyn ArchiveReader,
) -> Result<Verification> {
    let release = release::fetch_release(&ctx.config().api_base_url, repo, tag, ctx.http())?;
    let selection = release::select_asset(&release.assets)?;

    let archive = ctx.scratch_dir().join(&selection.asset.filename);
    let size = downloader::download_to_file(&selection.asset.download_url, &archive, ctx.http())?;

    let sha256 = checksum::sha256_path(&archive)?;
    tracing::info!("sha256 of {}: {}", selection.asset.filename, sha256);

    let manifest = read_manifest(archive_reader, &archive);
    if manifest.is_none() {
        tracing::info!("no usable {} in {}", MANIFEST_ENTRY, selection.asset.filename);
    }

    let registry_version = registry_version(manifest.as_ref(), &release.tag_name);
    Ok(Verification {
        tag_name: release.tag_name,
        selection,
        sha256,
        size,
        manifest,
        registry_version,
        verified_at: format_verified_date(Utc::now()),
    })
}
