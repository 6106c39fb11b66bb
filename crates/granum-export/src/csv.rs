//! CSV export serializer.
//!
//! Converts the per-image analysis records of one run into a CSV text
//! document with the fixed header `Filename,Number of Objects`, one
//! row per record, in the order the records were produced.
//!
//! Fields containing a comma, double quote, carriage return, or line
//! feed are quoted and embedded quotes doubled (RFC 4180). Everything
//! else is written verbatim.
//!
//! This is a pure function with no I/O — it returns a `String`.

use std::fmt::Write;

use serde::{Deserialize, Serialize};

/// Result of analyzing one image: its filename and object count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    /// Source filename, as enumerated (no directory components).
    pub filename: String,

    /// Number of external contours detected in the image.
    pub object_count: usize,
}

/// Column header line, matching the observed export format.
pub const CSV_HEADER: &str = "Filename,Number of Objects";

/// Serialize analysis records into a CSV text string.
///
/// The header is always present; an empty record slice produces a
/// header-only document. Row order follows slice order.
///
/// # Examples
///
/// ```
/// use granum_export::{AnalysisRecord, to_csv};
///
/// let records = vec![AnalysisRecord {
///     filename: "seeds.png".to_string(),
///     object_count: 42,
/// }];
/// let csv = to_csv(&records);
/// assert_eq!(csv, "Filename,Number of Objects\nseeds.png,42\n");
/// ```
#[must_use]
pub fn to_csv(records: &[AnalysisRecord]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{CSV_HEADER}");
    for record in records {
        let _ = writeln!(out, "{},{}", escape(&record.filename), record.object_count);
    }
    out
}

/// Quote a field when it contains a CSV metacharacter.
fn escape(field: &str) -> String {
    if field.contains(['"', ',', '\r', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
