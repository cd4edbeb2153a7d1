use clap::Parser;
use pagesnap::{build_request, report, setup_logging, CaptureConfig, CaptureSession, Cli};
use std::process::ExitCode;
use tracing::info;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Cli::parse();
    setup_logging(args.verbose);

    let mut config = match CaptureConfig::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {err:#}");
            return ExitCode::FAILURE;
        }
    };
    if let Some(chrome_path) = &args.chrome_path {
        config.chrome_path = Some(chrome_path.clone());
    }

    // Validation and output-path setup happen before any browser activity.
    let request = match build_request(&args, &config) {
        Ok(request) => request,
        Err(err) => return report(Err(err)),
    };

    info!(
        "capturing {} at {}x{} -> {}",
        request.url,
        request.viewport.width,
        request.viewport.height,
        request.output_path.display()
    );

    // The session guarantees browser teardown on every path; this is the
    // only place a failure becomes an exit status.
    let session = CaptureSession::new(config);
    report(session.run(&request).await)
}
