//! One browser lifecycle per capture: launch, configure, navigate, settle,
//! capture, persist, and always tear down.

use crate::config::{create_browser_config, CaptureConfig};
use crate::error::CaptureError;
use crate::options::{OutputFormat, ViewportSpec};
use chromiumoxide::browser::Browser;
use chromiumoxide::cdp::browser_protocol::emulation::SetDeviceMetricsOverrideParams;
use chromiumoxide::cdp::browser_protocol::page::CaptureScreenshotFormat;
use chromiumoxide::page::ScreenshotParams;
use futures::StreamExt;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tokio::time::{sleep, timeout};
use tracing::{debug, info};

/// Everything a capture session needs, resolved up front.
///
/// Immutable once constructed; owned by exactly one session.
#[derive(Debug, Clone)]
pub struct CaptureRequest {
    pub url: String,
    pub viewport: ViewportSpec,
    pub delay: Duration,
    pub output_path: PathBuf,
    pub format: OutputFormat,
    pub quality: u32,
    pub headless: bool,
}

/// Successful capture: where the file is and how big it turned out.
#[derive(Debug, Clone)]
pub struct CaptureOutcome {
    pub output_path: PathBuf,
    pub byte_size: u64,
    pub duration: Duration,
}

/// Drives exactly one full pass through the capture pipeline. No step is
/// retried; the browser is exclusively owned for the session's lifetime.
pub struct CaptureSession {
    config: CaptureConfig,
}

impl CaptureSession {
    pub fn new(config: CaptureConfig) -> Self {
        Self { config }
    }

    /// Run one capture. The browser is closed exactly once before this
    /// returns, on success and on every failure path.
    pub async fn run(&self, request: &CaptureRequest) -> Result<CaptureOutcome, CaptureError> {
        let started = Instant::now();

        let browser_config = create_browser_config(&self.config, request)?;
        debug!(
            "launching browser (headless={}, viewport={}x{}@{}x)",
            request.headless,
            request.viewport.width,
            request.viewport.height,
            request.viewport.scale_factor
        );
        let (mut browser, mut handler) = Browser::launch(browser_config)
            .await
            .map_err(|e| CaptureError::LaunchFailed(e.to_string()))?;

        // The handler stream must be polled for the whole session or CDP
        // commands never complete.
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    debug!("cdp handler error: {e}");
                    break;
                }
            }
        });

        let result = self.drive(&browser, request).await;

        // Teardown runs regardless of which step failed.
        let _ = browser.close().await;
        let _ = browser.wait().await;
        handler_task.abort();

        result.map(|byte_size| CaptureOutcome {
            output_path: request.output_path.clone(),
            byte_size,
            duration: started.elapsed(),
        })
    }

    /// Configure through persist. Errors propagate to `run`, which owns
    /// teardown.
    async fn drive(&self, browser: &Browser, request: &CaptureRequest) -> Result<u64, CaptureError> {
        // Configure: the page must be usable before navigation, so failures
        // here count against the launch.
        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| CaptureError::LaunchFailed(e.to_string()))?;

        let metrics = SetDeviceMetricsOverrideParams::builder()
            .width(request.viewport.width)
            .height(request.viewport.height)
            .device_scale_factor(request.viewport.scale_factor as f64)
            .mobile(false)
            .build()
            .map_err(CaptureError::LaunchFailed)?;
        page.execute(metrics)
            .await
            .map_err(|e| CaptureError::LaunchFailed(e.to_string()))?;
        page.set_user_agent(self.config.user_agent.as_str())
            .await
            .map_err(|e| CaptureError::LaunchFailed(e.to_string()))?;

        // Navigate, bounded by the overall timeout.
        info!("navigating to {}", request.url);
        let navigation = async {
            page.goto(request.url.as_str()).await?;
            page.wait_for_navigation().await?;
            Ok::<_, chromiumoxide::error::CdpError>(())
        };
        match timeout(self.config.navigation_timeout, navigation).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => return Err(CaptureError::NavigationFailed(e.to_string())),
            Err(_) => {
                return Err(CaptureError::NavigationFailed(format!(
                    "timed out after {:?}",
                    self.config.navigation_timeout
                )))
            }
        }

        // Settle: a plain timer, not tied to any DOM signal.
        if !request.delay.is_zero() {
            debug!("settling for {:?}", request.delay);
            sleep(request.delay).await;
        }

        // Capture the visible viewport only.
        let mut params = ScreenshotParams::builder()
            .format(match request.format {
                OutputFormat::Png => CaptureScreenshotFormat::Png,
                OutputFormat::Jpeg => CaptureScreenshotFormat::Jpeg,
            })
            .full_page(false);
        if request.format == OutputFormat::Jpeg {
            params = params.quality(request.quality as i64);
        }
        let data = page
            .screenshot(params.build())
            .await
            .map_err(|e| CaptureError::CaptureFailed(e.to_string()))?;

        // Persist and stat; a zero-byte file is a failure, not a success.
        tokio::fs::write(&request.output_path, &data)
            .await
            .map_err(|e| {
                CaptureError::PersistFailed(format!(
                    "{}: {e}",
                    request.output_path.display()
                ))
            })?;
        let metadata = tokio::fs::metadata(&request.output_path)
            .await
            .map_err(|e| {
                CaptureError::PersistFailed(format!(
                    "{}: {e}",
                    request.output_path.display()
                ))
            })?;
        if metadata.len() == 0 {
            return Err(CaptureError::PersistFailed(format!(
                "{}: wrote an empty file",
                request.output_path.display()
            )));
        }

        Ok(metadata.len())
    }
}
