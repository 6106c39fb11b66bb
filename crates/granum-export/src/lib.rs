//! granum-export: Pure result serializers (sans-IO)
//!
//! Converts analysis records into output formats. Currently supports
//! CSV.

pub mod csv;

pub use csv::{AnalysisRecord, to_csv};
