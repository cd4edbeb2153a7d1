//! Capture configuration and Chrome launch settings.
//!
//! Defaults that the rest of the crate would otherwise hard-code (output
//! directory, user agent, navigation timeout) live in [`CaptureConfig`] so
//! tests can inject overrides.

use crate::error::CaptureError;
use crate::session::CaptureRequest;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Fixed desktop user agent applied to every page, to keep rendering
/// consistent across sites with user-agent-based bot detection.
const DESKTOP_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Process-level settings for one capture invocation.
///
/// Loaded from a JSON file with `--config`, otherwise [`Default`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// Directory that relative and derived output paths resolve against.
    pub output_dir: PathBuf,

    /// User agent string set on the page before navigation.
    pub user_agent: String,

    /// Overall budget for navigation, including the network-quiet wait.
    pub navigation_timeout: Duration,

    /// Path to a Chrome/Chromium executable. `None` auto-detects.
    pub chrome_path: Option<String>,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        Self {
            output_dir: home.join("Screenshots"),
            user_agent: DESKTOP_USER_AGENT.to_string(),
            navigation_timeout: Duration::from_secs(30),
            chrome_path: None,
        }
    }
}

impl CaptureConfig {
    /// Load from a JSON file, or fall back to defaults when no path is given.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => {
                let content = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read config file {}", path.display()))?;
                serde_json::from_str(&content)
                    .with_context(|| format!("invalid config file {}", path.display()))
            }
            None => Ok(Self::default()),
        }
    }
}

/// Chrome command-line arguments for a single capture.
///
/// Sandboxing is relaxed for portability across containers and CI hosts.
pub fn chrome_args(request: &CaptureRequest) -> Vec<String> {
    let mut args = vec![
        "--no-sandbox".to_string(),
        "--disable-dev-shm-usage".to_string(),
        "--disable-gpu".to_string(),
        "--disable-extensions".to_string(),
        "--disable-default-apps".to_string(),
        "--disable-sync".to_string(),
        "--no-first-run".to_string(),
        "--hide-scrollbars".to_string(),
        format!(
            "--window-size={},{}",
            request.viewport.width, request.viewport.height
        ),
    ];

    if request.headless {
        args.push("--headless".to_string());
    }

    args
}

/// Build the chromiumoxide launch configuration for one request.
pub fn create_browser_config(
    config: &CaptureConfig,
    request: &CaptureRequest,
) -> Result<chromiumoxide::browser::BrowserConfig, CaptureError> {
    use chromiumoxide::browser::BrowserConfig;

    let mut builder = BrowserConfig::builder()
        .window_size(request.viewport.width, request.viewport.height)
        .args(chrome_args(request));

    if !request.headless {
        builder = builder.with_head();
    }

    if let Some(chrome_path) = &config.chrome_path {
        builder = builder.chrome_executable(chrome_path);
    }

    builder.build().map_err(CaptureError::LaunchFailed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{OutputFormat, ViewportSpec};

    fn request(headless: bool) -> CaptureRequest {
        CaptureRequest {
            url: "https://example.com".to_string(),
            viewport: ViewportSpec {
                width: 1440,
                height: 900,
                scale_factor: 1,
            },
            delay: Duration::ZERO,
            output_path: PathBuf::from("/tmp/out.png"),
            format: OutputFormat::Png,
            quality: 90,
            headless,
        }
    }

    #[test]
    fn test_config_defaults() {
        let config = CaptureConfig::default();
        assert!(config.output_dir.ends_with("Screenshots"));
        assert_eq!(config.navigation_timeout, Duration::from_secs(30));
        assert!(config.chrome_path.is_none());
        assert!(config.user_agent.contains("Chrome"));
    }

    #[test]
    fn test_chrome_args_headless() {
        let args = chrome_args(&request(true));
        assert!(args.contains(&"--headless".to_string()));
        assert!(args.contains(&"--no-sandbox".to_string()));
        assert!(args.contains(&"--window-size=1440,900".to_string()));
    }

    #[test]
    fn test_chrome_args_headful() {
        let args = chrome_args(&request(false));
        assert!(!args.contains(&"--headless".to_string()));
    }

    #[test]
    fn test_config_json_round_trip() {
        let config = CaptureConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let loaded: CaptureConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded.output_dir, config.output_dir);
        assert_eq!(loaded.navigation_timeout, config.navigation_timeout);
    }
}
