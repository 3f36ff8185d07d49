//! tracing setup: an append-only log file in the XDG state dir, stderr as fallback.
//!
//! `RUST_LOG` overrides the default filters in both modes.

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Filter for the log file: verbose for this tool, `info` for dependencies.
const FILE_FILTER: &str = "info,exthash=debug,exthash_core=debug";

/// Filter for stderr, which the operator-facing report shares.
const STDERR_FILTER: &str = "warn";

fn filter_or(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// `$XDG_STATE_HOME/exthash/exthash.log`, creating the directory if needed.
pub fn log_file_path() -> Result<PathBuf> {
    let dirs = xdg::BaseDirectories::with_prefix("exthash")?;
    let path = dirs
        .place_state_file("exthash.log")
        .context("create exthash state directory")?;
    Ok(path)
}

/// Sends log events to [`log_file_path`]. Errors (unwritable state dir, a
/// subscriber already installed) are returned so `main` can fall back to
/// [`init_logging_stderr`].
pub fn init_logging() -> Result<()> {
    let path = log_file_path()?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter_or(FILE_FILTER))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("install log subscriber: {}", e))?;

    tracing::info!("exthash {} logging to {}", env!("CARGO_PKG_VERSION"), path.display());
    Ok(())
}

/// Warnings and errors to stderr. Never fails; a second install is ignored.
pub fn init_logging_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter_or(STDERR_FILTER))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init();
}
