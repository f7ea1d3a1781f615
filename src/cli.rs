// SPDX-License-Identifier: GPL-3.0-only

//! CLI commands
//!
//! - Taking a photo with the virtual camera
//! - Inspecting a compiled filter

use shutter::filter;
use shutter::{
    AppResult, CameraSession, CaptureCall, CaptureOrchestrator, CaptureOutcome, CaptureRequest,
    Config, SessionPolicy, VirtualCamera,
};
use std::path::PathBuf;

/// Overrides for the capture command
pub struct CaptureOptions {
    pub config_path: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub unsynchronized: bool,
}

fn load_config(options: &CaptureOptions) -> AppResult<Config> {
    let mut config = match &options.config_path {
        Some(path) => Config::load_from(path)?,
        None => Config::load(),
    };

    if let Some(output) = &options.output {
        config.output_dir = Some(output.clone());
    }
    if options.unsynchronized {
        config.session_policy = SessionPolicy::Unsynchronized;
    }

    Ok(config)
}

/// Take a photo and print where it was saved
pub fn take_photo(call: CaptureCall, options: CaptureOptions) -> AppResult<()> {
    let config = load_config(&options)?;
    let request = CaptureRequest::from(call);

    println!(
        "Capturing: facing={} flash={} zoom={} timer={}s",
        request.facing, request.flash_mode, request.zoom, request.timer_sec
    );
    if request.timer_sec > 0 {
        println!("Waiting {} seconds...", request.timer_sec);
    }

    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| format!("Failed to start async runtime: {}", e))?;
    let report = runtime.block_on(async {
        let session = CameraSession::new(VirtualCamera::new(config.virtual_camera));
        let orchestrator = CaptureOrchestrator::from_config(session, &config);
        orchestrator.run(request).await
    });

    if let Some(matrix) = report.filter.as_ref().filter(|m| !m.is_identity()) {
        println!("Filter (not applied to the saved file):");
        print!("{}", matrix);
    }

    match report.outcome {
        CaptureOutcome::Succeeded { path } => {
            println!("Photo saved: {}", path.display());
            Ok(())
        }
        CaptureOutcome::Failed { reason } => Err(reason.into()),
    }
}

/// Print the parsed filter spec and its matrix
pub fn print_matrix(xml: &str) -> AppResult<()> {
    let spec = filter::parse(xml);
    let matrix = filter::compile(&spec);

    println!(
        "brightness={} contrast={} saturation={} sepia={}",
        spec.brightness, spec.contrast, spec.saturation, spec.sepia
    );
    println!();
    print!("{}", matrix);
    if matrix.is_identity() {
        println!("(identity)");
    }

    Ok(())
}
