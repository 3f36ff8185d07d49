//! Per-run state, built once in `main` and passed down explicitly.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::config::ExtHashConfig;
use crate::http::HttpOptions;

/// Prefix of the per-run scratch directory under the system temp dir.
pub const SCRATCH_PREFIX: &str = "exthash-";

/// Configuration, HTTP settings, registry location, and the scratch directory of one run.
///
/// The scratch directory is removed when the context is dropped, on success and error alike.
pub struct RunContext {
    config: ExtHashConfig,
    http: HttpOptions,
    registry_path: PathBuf,
    scratch: TempDir,
}

impl RunContext {
    /// `registry_override` wins over `config.registry_file`.
    pub fn new(config: ExtHashConfig, registry_override: Option<PathBuf>) -> Result<Self> {
        let scratch = tempfile::Builder::new()
            .prefix(SCRATCH_PREFIX)
            .tempdir()
            .context("create scratch directory")?;
        let registry_path = registry_override.unwrap_or_else(|| config.registry_file.clone());
        let http = HttpOptions::from_config(&config);
        tracing::debug!(
            "run context: scratch={} registry={}",
            scratch.path().display(),
            registry_path.display()
        );
        Ok(Self {
            config,
            http,
            registry_path,
            scratch,
        })
    }

    pub fn config(&self) -> &ExtHashConfig {
        &self.config
    }

    pub fn http(&self) -> &HttpOptions {
        &self.http
    }

    pub fn registry_path(&self) -> &Path {
        &self.registry_path
    }

    pub fn scratch_dir(&self) -> &Path {
        self.scratch.path()
    }
}
