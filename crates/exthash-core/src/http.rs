//! Blocking HTTP on top of libcurl easy handles.
//!
//! One request at a time; callers own the handle for the duration of a transfer.

use anyhow::{Context, Result};
use std::time::Duration;

use crate::config::ExtHashConfig;

/// Accept header for the GitHub REST API.
pub const GITHUB_JSON: &str = "application/vnd.github+json";

/// Settings shared by every request of a run.
#[derive(Debug, Clone)]
pub struct HttpOptions {
    pub user_agent: String,
    /// Sent as `Authorization: Bearer <token>` when present.
    pub bearer_token: Option<String>,
    pub connect_timeout: Duration,
}

impl HttpOptions {
    pub fn from_config(cfg: &ExtHashConfig) -> Self {
        Self {
            user_agent: cfg.user_agent.clone(),
            bearer_token: cfg.github_token.clone().filter(|t| !t.trim().is_empty()),
            connect_timeout: Duration::from_secs(cfg.connect_timeout_secs),
        }
    }
}

/// Status and full body of a buffered GET.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u32,
    pub body: Vec<u8>,
}

/// Builds an easy handle for a GET of `url`: follows redirects, sets the user agent,
/// timeouts, and `Accept`/`Authorization` headers.
pub(crate) fn easy_get(url: &str, opts: &HttpOptions, accept: Option<&str>) -> Result<curl::easy::Easy> {
    let mut easy = curl::easy::Easy::new();
    easy.url(url).context("invalid URL")?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    easy.useragent(&opts.user_agent)?;
    easy.connect_timeout(opts.connect_timeout)?;
    easy.low_speed_limit(1024)
        .map_err(|e| anyhow::anyhow!("curl: {}", e))?;
    easy.low_speed_time(Duration::from_secs(60))?;

    let mut list = curl::easy::List::new();
    if let Some(accept) = accept {
        list.append(&format!("Accept: {}", accept))?;
    }
    if let Some(token) = &opts.bearer_token {
        list.append(&format!("Authorization: Bearer {}", token.trim()))?;
    }
    easy.http_headers(list)?;
    Ok(easy)
}

/// Performs a GET and buffers the body. Non-2xx statuses are returned, not treated as errors;
/// only transport failures are.
pub fn get(url: &str, opts: &HttpOptions, accept: Option<&str>) -> Result<Response> {
    let mut body = Vec::new();
    let mut easy = easy_get(url, opts, accept)?;
    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer
            .perform()
            .with_context(|| format!("GET {} failed", url))?;
    }
    let status = easy.response_code().context("no response code")?;
    tracing::debug!("GET {} -> HTTP {} ({} bytes)", url, status, body.len());
    Ok(Response { status, body })
}
