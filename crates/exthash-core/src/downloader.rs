//! Single-stream HTTP GET of a release asset into a local file.
//!
//! The body goes straight from the curl write callback into a buffered file
//! writer, so the payload is never held in memory as a whole.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::error::Error;
use crate::http::{self, HttpOptions};

const BUF_SIZE: usize = 64 * 1024;

/// Downloads `url` into `dest` (created or truncated). Follows redirects.
/// Returns the number of bytes written.
///
/// Fails with [`Error::DownloadFailed`] on transport errors, non-2xx status,
/// or an empty body. Local write errors abort the transfer and are returned
/// with the destination path as context.
pub fn download_to_file(url: &str, dest: &Path, opts: &HttpOptions) -> Result<u64> {
    let failed = |reason: String| Error::DownloadFailed {
        url: url.to_string(),
        reason,
    };

    let file = File::create(dest).with_context(|| format!("create {}", dest.display()))?;
    let mut out = BufWriter::with_capacity(BUF_SIZE, file);
    let mut written: u64 = 0;
    let mut write_err: Option<io::Error> = None;

    let mut easy = http::easy_get(url, opts, None)?;
    let performed = {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| match out.write_all(data) {
            Ok(()) => {
                written += data.len() as u64;
                Ok(data.len())
            }
            Err(e) => {
                tracing::warn!("asset write failed: {}", e);
                write_err = Some(e);
                Ok(0) // abort transfer
            }
        })?;
        transfer.perform()
    };

    if let Some(e) = write_err {
        return Err(anyhow::Error::new(e).context(format!("write {}", dest.display())));
    }
    performed.map_err(|e| failed(e.to_string()))?;

    let code = easy.response_code().context("no response code")?;
    if !(200..300).contains(&code) {
        return Err(failed(format!("HTTP {}", code)).into());
    }
    if written == 0 {
        return Err(failed("response carried no body".to_string()).into());
    }

    let file = out
        .into_inner()
        .map_err(|e| e.into_error())
        .with_context(|| format!("flush {}", dest.display()))?;
    file.sync_all()
        .with_context(|| format!("sync {}", dest.display()))?;

    tracing::info!("downloaded {} bytes from {} to {}", written, url, dest.display());
    Ok(written)
}
