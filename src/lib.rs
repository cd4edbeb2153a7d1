//! # pagesnap
//!
//! Capture a single still image of a rendered web page at a configurable
//! viewport size, pixel density, capture delay, and output format, saved
//! under a predictable host-and-timestamp filename.
//!
//! The pipeline is strictly sequential: option resolution and target
//! normalization build an immutable [`CaptureRequest`], a [`CaptureSession`]
//! drives one Chrome lifecycle through it, and the reporter turns the
//! outcome into output and an exit status. The browser is closed exactly
//! once before the session returns, whichever step failed.
//!
//! ## CLI usage
//!
//! ```bash
//! pagesnap example.com
//! pagesnap example.com --ratio mobile --scale 2 --format jpeg --quality 80
//! pagesnap https://example.com --width 1280 --height 720 --output shot.png
//! ```

/// Capture configuration and Chrome launch settings
pub mod config;

/// Error taxonomy for validation and session failures
pub mod error;

/// Option resolution: raw inputs to a validated capture plan
pub mod options;

/// Outcome reporting and exit-status mapping
pub mod report;

/// The browser session lifecycle for one capture
pub mod session;

/// URL normalization and output-path derivation
pub mod target;

/// Command-line interface and request assembly
pub mod cli;

#[cfg(test)]
mod tests;

pub use cli::*;
pub use config::*;
pub use error::*;
pub use options::*;
pub use report::*;
pub use session::*;
pub use target::*;
