//! Run orchestration: drive the pipeline over a directory of images.
//!
//! Per candidate file, in directory-listing order: read bytes, run the
//! staged pipeline, persist the per-stage artifacts, and append an
//! [`AnalysisRecord`]. A file that cannot be read or decoded is the
//! only recoverable failure: it is logged and skipped, and the run
//! continues. Everything else — output directory creation, artifact
//! writes, the CSV export — is fatal.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use granum_export::AnalysisRecord;
use granum_pipeline::{PipelineConfig, PipelineError};

use crate::artifacts::{self, ArtifactError};
use crate::scan;

/// Configuration for one run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Directory scanned (non-recursively) for candidate images.
    pub input_dir: PathBuf,

    /// Directory receiving per-stage artifacts; created when absent.
    pub output_dir: PathBuf,

    /// Path of the exported CSV result table.
    pub csv_path: PathBuf,

    /// Per-image pipeline parameters.
    pub pipeline: PipelineConfig,

    /// Also write a rendered figure per stage.
    pub persist_figures: bool,

    /// Print one `{filename}: {count} objects` line per image.
    pub display_result: bool,
}

impl Default for RunConfig {
    /// Defaults reproduce the observed behavior: scan the current
    /// directory, write artifacts to `processed_images/`, export
    /// `analysis_results.csv`, figures and per-image display off.
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("."),
            output_dir: PathBuf::from("processed_images"),
            csv_path: PathBuf::from("analysis_results.csv"),
            pipeline: PipelineConfig::default(),
            persist_figures: false,
            display_result: false,
        }
    }
}

/// Outcome of a completed run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// One record per successfully processed image, in processing
    /// order.
    pub records: Vec<AnalysisRecord>,

    /// Filenames of candidates that were skipped (unreadable or
    /// undecodable).
    pub skipped: Vec<String>,
}

/// Fatal run failures.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    /// The pipeline configuration is structurally invalid.
    #[error(transparent)]
    Config(#[from] PipelineError),

    /// The output directory could not be created.
    #[error("failed to create output directory {}: {source}", path.display())]
    CreateOutputDir {
        /// The directory that could not be created.
        path: PathBuf,
        /// Underlying filesystem error.
        source: io::Error,
    },

    /// The input directory could not be enumerated.
    #[error("failed to scan input directory {}: {source}", path.display())]
    ScanInputDir {
        /// The directory that could not be read.
        path: PathBuf,
        /// Underlying filesystem error.
        source: io::Error,
    },

    /// A per-stage artifact could not be written.
    #[error(transparent)]
    Artifact(#[from] ArtifactError),

    /// The CSV export could not be written.
    #[error("failed to write results to {}: {source}", path.display())]
    ExportWrite {
        /// The CSV path that could not be written.
        path: PathBuf,
        /// Underlying filesystem error.
        source: io::Error,
    },
}

/// Process every candidate image in the input directory and export the
/// result table.
///
/// # Errors
///
/// Returns [`RunError`] on any fatal failure (see the variant docs);
/// per-file read/decode failures are skipped, not returned.
#[allow(clippy::print_stdout)] // --display-result is part of the console contract
pub fn run(config: &RunConfig) -> Result<RunSummary, RunError> {
    config.pipeline.validate()?;

    fs::create_dir_all(&config.output_dir).map_err(|source| RunError::CreateOutputDir {
        path: config.output_dir.clone(),
        source,
    })?;

    let candidates =
        scan::scan_directory(&config.input_dir).map_err(|source| RunError::ScanInputDir {
            path: config.input_dir.clone(),
            source,
        })?;
    log::info!(
        "found {} candidate image(s) in {}",
        candidates.len(),
        config.input_dir.display(),
    );

    let mut records = Vec::new();
    let mut skipped = Vec::new();

    for path in candidates {
        let filename = display_name(&path);

        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) => {
                log::warn!("skipping {filename}, could not read the file: {e}");
                skipped.push(filename);
                continue;
            }
        };

        // Config errors were ruled out up front, so any pipeline error
        // here is a decode failure for this particular file.
        let staged = match granum_pipeline::process_staged(&bytes, &config.pipeline) {
            Ok(staged) => staged,
            Err(e) => {
                log::warn!("skipping {filename}, could not load the image: {e}");
                skipped.push(filename);
                continue;
            }
        };

        artifacts::persist_stages(
            &config.output_dir,
            &filename,
            &staged,
            config.persist_figures,
        )?;

        let object_count = staged.object_count();
        log::info!("{filename}: {object_count} object(s)");
        if config.display_result {
            println!("{filename}: {object_count} objects");
        }

        records.push(AnalysisRecord {
            filename,
            object_count,
        });
    }

    let csv = granum_export::to_csv(&records);
    fs::write(&config.csv_path, csv).map_err(|source| RunError::ExportWrite {
        path: config.csv_path.clone(),
        source,
    })?;

    Ok(RunSummary { records, skipped })
}

/// Bare filename of a candidate path, for records and diagnostics.
fn display_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    )
}
