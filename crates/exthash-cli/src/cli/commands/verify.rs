//! `exthash <owner/repo> [version]` – verify a release asset and print its checksum.

use anyhow::Result;
use exthash_core::context::RunContext;
use exthash_core::manifest::ZipArchiveReader;
use exthash_core::pipeline::{verify_release, Verification};
use exthash_core::prompt::Prompter;

use super::run_record;

const DIVIDER: &str = "=======================================================";
pub(super) const UPDATE_PROMPT: &str = "Update registry.json with this verified version?";

pub fn run_verify(
    ctx: &RunContext,
    repo: &str,
    version: Option<&str>,
    prompter: &dyn Prompter,
) -> Result<()> {
    println!("Repository: {}", repo);
    println!("Fetching {} release...", version.unwrap_or("latest"));

    let verification = verify_release(ctx, repo, version, &ZipArchiveReader)?;
    print_report(&verification);
    confirm_and_record(ctx, repo, &verification, prompter)
}

/// Records the verification only if the operator says yes; declining leaves the registry alone.
pub(super) fn confirm_and_record(
    ctx: &RunContext,
    repo: &str,
    verification: &Verification,
    prompter: &dyn Prompter,
) -> Result<()> {
    if !prompter.confirm(UPDATE_PROMPT)? {
        tracing::info!("registry update declined for {}", repo);
        return Ok(());
    }
    run_record(ctx, repo, verification, prompter)
}

fn section(title: &str) {
    println!();
    println!("{}", DIVIDER);
    println!("{}", title);
    println!("{}", DIVIDER);
}

fn print_report(v: &Verification) {
    println!("Version: {}", v.tag_name);
    if v.selection.is_ambiguous() {
        println!("Warning: Multiple zip files found, using first one:");
        for asset in &v.selection.candidates {
            println!("{}", asset.download_url);
        }
    }
    println!("Asset: {} ({} bytes)", v.selection.asset.filename, v.size);

    if let Some(m) = v.manifest.as_ref().filter(|m| !m.is_empty()) {
        section("Extension Info (from manifest.json)");
        if !m.id().is_empty() {
            println!("  ID:      {}", m.id());
        }
        if !m.name().is_empty() {
            println!("  Name:    {}", m.name());
        }
        if !m.version().is_empty() {
            println!("  Version: {}", m.version());
        }
    }

    section("Hash Information");
    println!("  Tag:     {}", v.tag_name);
    println!("  SHA256:  {}", v.sha256);

    section("Copy this to registry.json verifiedVersions:");
    println!();
    println!("{}", snippet(v));
    println!();
}

/// Copy-ready `verifiedVersions` record.
fn snippet(v: &Verification) -> String {
    let record = serde_json::json!({
        "version": v.registry_version,
        "sha256": v.sha256,
        "verifiedAt": v.verified_at,
    });
    serde_json::to_string_pretty(&record).unwrap_or_else(|_| record.to_string())
}
