//! granum-cli: orchestration and I/O for the granum pipeline.
//!
//! Scans a directory for candidate images, runs each through the
//! processing pipeline, persists per-stage artifacts, and exports the
//! result table as CSV. The pipeline itself is pure and lives in
//! `granum-pipeline`; everything touching the filesystem lives here.

pub mod artifacts;
pub mod figure;
pub mod run;
pub mod scan;

pub use run::{RunConfig, RunError, RunSummary, run};
