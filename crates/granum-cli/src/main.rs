//! granum: count objects in a folder of raster images.
//!
//! Scans the input directory for `.jpg`/`.jpeg`/`.png` files, runs each
//! through the grayscale -> blur -> edge -> dilation -> contour
//! pipeline, writes per-stage artifacts to the output directory, and
//! exports per-image object counts to a CSV table.
//!
//! # Usage
//!
//! ```text
//! granum [OPTIONS]
//! ```
//!
//! With no options, reproduces the observed behavior: scans the current
//! directory, writes artifacts to `processed_images/`, and exports
//! `analysis_results.csv`.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use granum_cli::RunConfig;
use granum_pipeline::{PipelineConfig, StructuringElement};

/// Count objects in a folder of raster images.
///
/// Runs a fixed five-stage contour pipeline over every candidate image
/// and exports one `(filename, object count)` row per image.
#[derive(Parser)]
#[command(name = "granum", version)]
struct Cli {
    /// Directory to scan (non-recursively) for images.
    #[arg(long, default_value = ".")]
    input_dir: PathBuf,

    /// Directory for per-stage image artifacts (created if absent).
    #[arg(long, default_value = "processed_images")]
    output_dir: PathBuf,

    /// Path of the exported CSV result table.
    #[arg(long, default_value = "analysis_results.csv")]
    csv_path: PathBuf,

    /// Gaussian blur kernel side length (odd).
    #[arg(long, default_value_t = PipelineConfig::DEFAULT_BLUR_KERNEL_SIZE)]
    blur_kernel_size: u32,

    /// Gaussian blur sigma (0 derives it from the kernel size).
    #[arg(long, default_value_t = PipelineConfig::DEFAULT_BLUR_SIGMA)]
    blur_sigma: f32,

    /// Edge detector low threshold.
    #[arg(long, default_value_t = PipelineConfig::DEFAULT_CANNY_LOW)]
    canny_low: f32,

    /// Edge detector high threshold.
    #[arg(long, default_value_t = PipelineConfig::DEFAULT_CANNY_HIGH)]
    canny_high: f32,

    /// Dilation structuring element width.
    #[arg(long, default_value_t = PipelineConfig::DEFAULT_DILATE_ELEMENT.width)]
    dilate_width: u32,

    /// Dilation structuring element height.
    #[arg(long, default_value_t = PipelineConfig::DEFAULT_DILATE_ELEMENT.height)]
    dilate_height: u32,

    /// Number of dilation passes.
    #[arg(long, default_value_t = PipelineConfig::DEFAULT_DILATE_ITERATIONS)]
    dilate_iterations: u32,

    /// Also write a rendered figure per stage.
    #[arg(long)]
    figures: bool,

    /// Print one "<filename>: N objects" line per processed image.
    #[arg(long)]
    display_result: bool,

    /// Full pipeline config as a JSON string.
    ///
    /// When provided, all other pipeline parameter flags are ignored.
    /// The JSON must be a valid `PipelineConfig` serialization.
    #[arg(long)]
    config_json: Option<String>,
}

/// Build a [`PipelineConfig`] from CLI arguments.
///
/// If `--config-json` is provided, the JSON is parsed directly and all
/// individual parameter flags are ignored. Otherwise, a config is
/// assembled from the individual flags.
fn config_from_cli(cli: &Cli) -> Result<PipelineConfig, String> {
    if let Some(ref json) = cli.config_json {
        return serde_json::from_str(json).map_err(|e| format!("Error parsing --config-json: {e}"));
    }

    Ok(PipelineConfig {
        blur_kernel_size: cli.blur_kernel_size,
        blur_sigma: cli.blur_sigma,
        canny_low: cli.canny_low,
        canny_high: cli.canny_high,
        dilate_element: StructuringElement::rect(cli.dilate_width, cli.dilate_height),
        dilate_iterations: cli.dilate_iterations,
    })
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logging is a diagnostic channel; failing to set it up is not a
    // reason to abort the run.
    let _logger = match flexi_logger::Logger::try_with_env_or_str("info")
        .and_then(flexi_logger::Logger::start)
    {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("logger initialization failed: {e}");
            None
        }
    };

    let pipeline = match config_from_cli(&cli) {
        Ok(config) => config,
        Err(msg) => {
            eprintln!("{msg}");
            return ExitCode::FAILURE;
        }
    };

    let config = RunConfig {
        input_dir: cli.input_dir,
        output_dir: cli.output_dir,
        csv_path: cli.csv_path,
        pipeline,
        persist_figures: cli.figures,
        display_result: cli.display_result,
    };

    match granum_cli::run(&config) {
        Ok(summary) => {
            log::info!(
                "processed {} image(s), skipped {}",
                summary.records.len(),
                summary.skipped.len(),
            );
            println!(
                "Analysis complete. Results saved to {}. Processed images are in the '{}' folder.",
                config.csv_path.display(),
                config.output_dir.display(),
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
