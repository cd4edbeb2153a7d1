//! Target normalization: raw URL-ish input to an absolute URL plus a
//! resolved output location.

use crate::config::CaptureConfig;
use crate::error::CaptureError;
use crate::options::OutputFormat;
use chrono::Local;
use std::path::{Path, PathBuf};
use url::Url;

/// Second-resolution, filesystem-safe, lexically sortable.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Make a raw target string navigable.
///
/// Explicit http/https schemes pass through unchanged; anything else gets an
/// https prefix. Malformed hosts are left for navigation to reject.
pub fn normalize_url(raw: &str) -> String {
    // URL schemes are case-insensitive.
    let lower = raw.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        raw.to_string()
    } else {
        format!("https://{raw}")
    }
}

/// Derive the default filename for a capture of `url` taken now.
pub fn default_filename(url: &str, format: OutputFormat) -> String {
    derive_filename(url, format, &Local::now().format(TIMESTAMP_FORMAT).to_string())
}

/// Filename derivation never fails a capture: an unparseable URL falls back
/// to a generic `screenshot_` stem.
fn derive_filename(url: &str, format: OutputFormat, stamp: &str) -> String {
    let host = Url::parse(url)
        .ok()
        .and_then(|parsed| parsed.host_str().map(str::to_string));

    let stem = match host {
        Some(host) => host.strip_prefix("www.").unwrap_or(host.as_str()).to_string(),
        None => "screenshot".to_string(),
    };

    format!("{stem}_{stamp}.{}", format.extension())
}

/// Resolve where the screenshot lands on disk.
///
/// An explicit absolute path is used as-is; a relative one is joined onto the
/// configured output directory; no path at all derives a host+timestamp name
/// in that directory.
pub fn resolve_output_path(
    explicit: Option<&Path>,
    url: &str,
    format: OutputFormat,
    config: &CaptureConfig,
) -> PathBuf {
    match explicit {
        Some(path) if path.is_absolute() => path.to_path_buf(),
        Some(path) => config.output_dir.join(path),
        None => config.output_dir.join(default_filename(url, format)),
    }
}

/// Create the directory the output path lands in, parents included.
///
/// Runs before the browser launches so a guaranteed-failing write never
/// costs a browser launch.
pub fn ensure_output_dir(output_path: &Path) -> Result<(), CaptureError> {
    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            CaptureError::PersistFailed(format!(
                "could not create output directory {}: {e}",
                parent.display()
            ))
        })?;
    }
    Ok(())
}
