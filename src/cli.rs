use crate::config::CaptureConfig;
use crate::error::CaptureError;
use crate::options::{self, RawOptions, DEFAULT_QUALITY, DEFAULT_RATIO};
use crate::session::CaptureRequest;
use crate::target;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "pagesnap")]
#[command(about = "Capture a screenshot of a rendered web page")]
#[command(version)]
pub struct Cli {
    /// Target URL or bare host (https:// is assumed when no scheme is given)
    pub target: String,

    /// Viewport width in pixels; requires --height
    #[arg(long, requires = "height")]
    pub width: Option<u32>,

    /// Viewport height in pixels; requires --width
    #[arg(long, requires = "width")]
    pub height: Option<u32>,

    /// Ratio preset used when width/height are not given
    #[arg(long, default_value = DEFAULT_RATIO)]
    pub ratio: String,

    /// Viewport multiplier simulating higher pixel density (1, 2, or 3)
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub scale: u32,

    /// Milliseconds to wait after navigation before capturing
    #[arg(long, default_value_t = 3000)]
    pub delay: u64,

    /// Output file, absolute or relative to the output directory
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format (png, jpeg)
    #[arg(long, default_value = "png")]
    pub format: String,

    /// Jpeg quality, 1-100; ignored for png
    #[arg(long, default_value_t = DEFAULT_QUALITY)]
    pub quality: u32,

    /// Run the browser without a visible window (default)
    #[arg(long, overrides_with = "no_headless")]
    pub headless: bool,

    /// Show the browser window during capture
    #[arg(long, overrides_with = "headless")]
    pub no_headless: bool,

    /// Configuration file path (JSON)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long)]
    pub verbose: bool,

    /// Chrome executable path
    #[arg(long)]
    pub chrome_path: Option<String>,
}

impl Cli {
    pub fn headless(&self) -> bool {
        !self.no_headless
    }
}

/// Validate the flags and assemble the immutable capture request. Creates
/// the output directory; everything else is pure.
pub fn build_request(args: &Cli, config: &CaptureConfig) -> Result<CaptureRequest, CaptureError> {
    let resolved = options::resolve(&RawOptions {
        width: args.width,
        height: args.height,
        ratio: Some(args.ratio.clone()),
        scale: Some(args.scale),
        format: Some(args.format.clone()),
        quality: Some(args.quality),
    })?;

    let url = target::normalize_url(&args.target);
    let output_path =
        target::resolve_output_path(args.output.as_deref(), &url, resolved.format, config);
    target::ensure_output_dir(&output_path)?;

    Ok(CaptureRequest {
        url,
        viewport: resolved.viewport,
        delay: Duration::from_millis(args.delay),
        output_path,
        format: resolved.format,
        quality: resolved.quality,
        headless: args.headless(),
    })
}

pub fn setup_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .init();
}
