//! CLI for exthash: verify an extension release and optionally record it in registry.json.

mod commands;
mod prompt;

use anyhow::Result;
use clap::error::ErrorKind;
use clap::Parser;
use exthash_core::config;
use exthash_core::context::RunContext;
use std::path::PathBuf;

use commands::run_verify;
use prompt::TerminalPrompter;

const EXAMPLES: &str = "\
Examples:
  exthash einord/stina-ext-ollama
  exthash einord/stina-ext-ollama v1.0.1";

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "exthash", version)]
#[command(
    about = "Verify an extension's GitHub release asset and record its SHA-256 in registry.json",
    long_about = None,
    after_help = EXAMPLES
)]
pub struct Cli {
    /// GitHub repository as owner/repo.
    #[arg(value_parser = parse_repo)]
    pub repo: String,

    /// Release tag to verify (default: latest release).
    #[arg(value_name = "VERSION")]
    pub tag: Option<String>,

    /// Registry file to update (default: `registry_file` from config, usually ./registry.json).
    #[arg(long, value_name = "PATH")]
    pub registry: Option<PathBuf>,
}

fn parse_repo(s: &str) -> Result<String, String> {
    let s = s.trim().trim_matches('/');
    match s.split_once('/') {
        Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {
            Ok(s.to_string())
        }
        _ => Err(format!("expected owner/repo, got {:?}", s)),
    }
}

impl Cli {
    /// Parses process arguments. Usage errors exit with status 1; `--help`/`--version` with 0.
    pub fn parse_or_exit() -> Self {
        match Cli::try_parse() {
            Ok(cli) => cli,
            Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
            Err(e) => {
                let _ = e.print();
                std::process::exit(1);
            }
        }
    }

    pub fn run(self) -> Result<()> {
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);
        let ctx = RunContext::new(cfg, self.registry)?;
        let prompter = TerminalPrompter::detect();
        run_verify(&ctx, &self.repo, self.tag.as_deref(), &prompter)
    }
}
