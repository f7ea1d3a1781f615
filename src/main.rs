// SPDX-License-Identifier: GPL-3.0-only

use clap::{Parser, Subcommand};
use shutter::AppError;
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "shutter")]
#[command(about = "Capture photos with filter, flash, zoom and timer settings")]
#[command(version)]
struct Cli {
    /// Config file (default: ~/.config/shutter/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Take a photo with the virtual camera
    Capture {
        /// Filter description, e.g. "<filter name='sepia' value='true'/>"
        #[arg(short, long, default_value = "")]
        filter: String,

        /// Flash mode: on, off or auto
        #[arg(long, default_value = "auto")]
        flash: String,

        /// Camera facing: front or back
        #[arg(long, default_value = "back")]
        facing: String,

        /// Delay before capturing, in seconds
        #[arg(short, long, default_value = "0")]
        timer: i64,

        /// Zoom factor (1.0 - 4.0)
        #[arg(short, long, default_value = "1.0")]
        zoom: f64,

        /// Whole capture call as JSON (overrides the individual options)
        #[arg(long)]
        request: Option<String>,

        /// Output directory (default: ~/.local/share/shutter/pictures)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Release the camera while a timer runs (legacy behavior)
        #[arg(long)]
        unsynchronized: bool,
    },

    /// Print the parsed filter and its compiled color matrix
    Matrix {
        /// Filter description
        #[arg(short, long, default_value = "")]
        filter: String,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    // Set RUST_LOG environment variable to control log level
    // Examples: RUST_LOG=debug, RUST_LOG=shutter=debug, RUST_LOG=info
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(true)
        .with_level(true)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Capture {
            filter,
            flash,
            facing,
            timer,
            zoom,
            request,
            output,
            unsynchronized,
        } => {
            let call = match request {
                Some(json) => serde_json::from_str(&json)
                    .map_err(|e| AppError::Other(format!("Invalid capture request: {}", e)))?,
                None => shutter::CaptureCall {
                    filter_xml: Some(filter),
                    flash_mode: Some(flash),
                    camera_facing: Some(facing),
                    timer: Some(timer),
                    zoom: Some(zoom),
                },
            };
            let options = cli::CaptureOptions {
                config_path: cli.config,
                output,
                unsynchronized,
            };
            cli::take_photo(call, options)
        }
        Commands::Matrix { filter } => cli::print_matrix(&filter),
    }?;

    Ok(())
}
