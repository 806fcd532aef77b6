//! Filler-speech removal CLI.
//!
//! Takes one or more video files, transcribes them, asks an LLM to flag
//! filler words, pauses, and coughs, and re-encodes each file keeping only
//! the clean segments.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use fillercut_cli::{is_video_file, process_file, OpenAiClient, PipelineConfig};

#[derive(Parser, Debug)]
#[command(name = "fillercut")]
#[command(about = "Removes filler speech from video files", version)]
struct Cli {
    /// Video files to process
    inputs: Vec<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    init_tracing();

    let cli = Cli::parse();

    if cli.inputs.is_empty() {
        eprintln!("Please provide at least one video file as argument");
        std::process::exit(1);
    }

    for input in &cli.inputs {
        if !is_video_file(input) {
            eprintln!(
                "{} is not a video file; make sure every argument is an existing video file",
                input.display()
            );
            std::process::exit(1);
        }
    }

    fillercut_media::check_ffmpeg().context("checking for FFmpeg")?;
    fillercut_media::check_ffprobe().context("checking for FFprobe")?;

    let config = PipelineConfig::from_env().context("loading configuration")?;
    let client = OpenAiClient::new(&config);

    // Per-file failures are isolated: log, report, continue with the next
    // input. Only argument validation above affects the exit code.
    for input in &cli.inputs {
        info!("Processing {}", input.display());
        match process_file(&config, &client, input).await {
            Ok(output) => {
                println!("Processing complete! Output saved to: {}", output.display());
            }
            Err(e) => {
                error!(input = %input.display(), error = %e, "Failed to process video file");
                println!(
                    "Failed to process video file {}. Check the logs for more details.",
                    input.display()
                );
            }
        }
    }

    Ok(())
}

/// Initialize tracing with colored output for dev, JSON for production.
fn init_tracing() {
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter =
        EnvFilter::from_default_env().add_directive("info".parse().expect("valid directive"));

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }
}
