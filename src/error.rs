use thiserror::Error;

/// Every way a single capture can fail.
///
/// The validation variants come first, all detectable before any browser
/// activity. The rest occur inside a capture session and always
/// trigger browser teardown before they propagate. Engine messages are
/// carried through unmodified to preserve diagnostic detail.
#[derive(Debug, Clone, Error)]
pub enum CaptureError {
    #[error("unknown ratio preset '{key}', valid presets: {valid}")]
    InvalidPreset { key: String, valid: String },

    #[error("unsupported format '{0}', expected png or jpeg")]
    InvalidFormat(String),

    #[error("jpeg quality must be between 1 and 100, got {0}")]
    InvalidQuality(u32),

    #[error("scale factor must be a positive integer, got {0}")]
    InvalidScale(u32),

    #[error("viewport {width}x{height} does not fit at scale {scale}")]
    ViewportOverflow { width: u32, height: u32, scale: u32 },

    #[error("browser launch failed: {0}")]
    LaunchFailed(String),

    #[error("navigation failed: {0}")]
    NavigationFailed(String),

    #[error("screenshot capture failed: {0}")]
    CaptureFailed(String),

    #[error("failed to persist screenshot: {0}")]
    PersistFailed(String),
}

impl CaptureError {
    /// True for errors raised before the browser is launched.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            CaptureError::InvalidPreset { .. }
                | CaptureError::InvalidFormat(_)
                | CaptureError::InvalidQuality(_)
                | CaptureError::InvalidScale(_)
                | CaptureError::ViewportOverflow { .. }
        )
    }
}

impl From<std::io::Error> for CaptureError {
    fn from(err: std::io::Error) -> Self {
        CaptureError::PersistFailed(err.to_string())
    }
}
