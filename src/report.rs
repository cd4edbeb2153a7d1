//! Outcome reporting: human-readable result plus process exit status.

use crate::error::CaptureError;
use crate::session::CaptureOutcome;
use std::process::ExitCode;
use tracing::error;

pub fn format_kilobytes(bytes: u64) -> String {
    format!("{:.1} KB", bytes as f64 / 1024.0)
}

/// Print the result and map it to an exit status. Either a nonzero-size file
/// exists at the output path, or the invocation fails; there is no partial
/// success and no cleanup of whatever the engine left behind.
pub fn report(result: Result<CaptureOutcome, CaptureError>) -> ExitCode {
    match result {
        Ok(outcome) => {
            println!("Screenshot saved: {}", outcome.output_path.display());
            println!(
                "  {} in {:.1}s",
                format_kilobytes(outcome.byte_size),
                outcome.duration.as_secs_f64()
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("capture failed: {err}");
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
