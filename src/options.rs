//! Option resolution: raw user inputs to a validated capture plan.
//!
//! Everything in this module is pure and synchronous. No filesystem or
//! network access happens before the plan is fully resolved.

use crate::error::CaptureError;
use serde::{Deserialize, Serialize};

/// Default ratio preset applied when neither explicit dimensions nor a
/// preset key are supplied.
pub const DEFAULT_RATIO: &str = "16:10";

/// Default jpeg quality. Ignored for png output.
pub const DEFAULT_QUALITY: u32 = 90;

/// Named width/height pairs selectable in place of explicit dimensions.
/// Static and read-only for the lifetime of the process.
const RATIO_PRESETS: &[(&str, (u32, u32))] = &[
    ("16:9", (1920, 1080)),
    ("16:10", (1440, 900)),
    ("4:3", (1024, 768)),
    ("square", (1200, 1200)),
    ("mobile", (375, 667)),
    ("tablet", (768, 1024)),
];

/// Fully resolved browser viewport. Dimensions are final before the
/// session starts; there is no runtime resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewportSpec {
    pub width: u32,
    pub height: u32,
    pub scale_factor: u32,
}

/// Supported output image formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Png,
    Jpeg,
}

impl OutputFormat {
    pub fn parse(raw: &str) -> Result<Self, CaptureError> {
        match raw.to_ascii_lowercase().as_str() {
            "png" => Ok(OutputFormat::Png),
            "jpeg" | "jpg" => Ok(OutputFormat::Jpeg),
            _ => Err(CaptureError::InvalidFormat(raw.to_string())),
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpeg => "jpg",
        }
    }
}

/// Raw, possibly absent inputs as they arrive from the CLI.
#[derive(Debug, Clone, Default)]
pub struct RawOptions {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub ratio: Option<String>,
    pub scale: Option<u32>,
    pub format: Option<String>,
    pub quality: Option<u32>,
}

/// Validated capture plan produced by [`resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedOptions {
    pub viewport: ViewportSpec,
    pub format: OutputFormat,
    pub quality: u32,
}

/// All valid preset keys, for error messages.
pub fn preset_keys() -> Vec<&'static str> {
    RATIO_PRESETS.iter().map(|(key, _)| *key).collect()
}

fn lookup_preset(key: &str) -> Result<(u32, u32), CaptureError> {
    RATIO_PRESETS
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, dims)| *dims)
        .ok_or_else(|| CaptureError::InvalidPreset {
            key: key.to_string(),
            valid: preset_keys().join(", "),
        })
}

/// Turn raw inputs into a validated plan.
///
/// Explicit width and height (both present) win over the preset; the scale
/// factor multiplies whichever pair was chosen. Quality is validated only
/// for jpeg output and passes through untouched for png.
pub fn resolve(raw: &RawOptions) -> Result<ResolvedOptions, CaptureError> {
    let (base_width, base_height) = match (raw.width, raw.height) {
        (Some(width), Some(height)) => (width, height),
        _ => lookup_preset(raw.ratio.as_deref().unwrap_or(DEFAULT_RATIO))?,
    };

    let scale = raw.scale.unwrap_or(1);
    if scale == 0 {
        return Err(CaptureError::InvalidScale(scale));
    }

    let format = OutputFormat::parse(raw.format.as_deref().unwrap_or("png"))?;

    let quality = raw.quality.unwrap_or(DEFAULT_QUALITY);
    if format == OutputFormat::Jpeg && !(1..=100).contains(&quality) {
        return Err(CaptureError::InvalidQuality(quality));
    }

    // Scaled dimensions must stay within u32.
    let (width, height) = base_width
        .checked_mul(scale)
        .zip(base_height.checked_mul(scale))
        .ok_or(CaptureError::ViewportOverflow {
            width: base_width,
            height: base_height,
            scale,
        })?;

    Ok(ResolvedOptions {
        viewport: ViewportSpec {
            width,
            height,
            scale_factor: scale,
        },
        format,
        quality,
    })
}
