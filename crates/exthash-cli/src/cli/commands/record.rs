//! Record a verified version in registry.json after the operator confirmed it.

use anyhow::Result;
use chrono::Utc;
use exthash_core::context::RunContext;
use exthash_core::pipeline::Verification;
use exthash_core::prompt::Prompter;
use exthash_core::registry::{self, RegistryUpdate};
use exthash_core::url_model::repository_url;

pub(super) const ID_PROMPT: &str = "Enter extension id for registry.json";

pub fn run_record(
    ctx: &RunContext,
    repo: &str,
    verification: &Verification,
    prompter: &dyn Prompter,
) -> Result<()> {
    let mut id = verification.manifest_id().to_string();
    if id.is_empty() {
        id = prompter.input(ID_PROMPT)?;
    }

    let update = RegistryUpdate {
        id,
        repository_url: repository_url(repo),
        version: verification.registry_version.clone(),
        sha256: verification.sha256.clone(),
        verified_at: verification.verified_at.clone(),
        updated_at: Utc::now(),
    };
    let path = ctx.registry_path();
    let outcome = registry::update_registry(path, &update, prompter)?;

    if outcome.created_entry {
        println!("Added new entry {} to {}", outcome.entry_id, path.display());
    }
    if outcome.replaced_version {
        println!("Replaced existing record for version {}", update.version);
    }
    println!("Updated {}", path.display());
    Ok(())
}
