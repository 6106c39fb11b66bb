//! Input directory scanning.
//!
//! Enumerates one directory non-recursively and selects candidate
//! image files by case-insensitive extension. Entries are yielded in
//! directory-listing order — no sort is applied, so processing order
//! is filesystem-dependent, matching the observed behavior.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Extensions accepted by the loader, compared case-insensitively.
pub const ACCEPTED_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Returns `true` when the file name marks the path as a candidate
/// image file.
///
/// The contract is a case-insensitive name-suffix match, not a proper
/// extension parse: any name ending in `.jpg`, `.jpeg`, or `.png`
/// qualifies.
#[must_use]
pub fn is_candidate(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| {
            let name = name.to_ascii_lowercase();
            ACCEPTED_EXTENSIONS
                .iter()
                .any(|ext| name.ends_with(&format!(".{ext}")))
        })
}

/// Enumerate candidate image files in `dir`.
///
/// Non-files (directories, including the output directory when it
/// lives inside `dir`) and entries with other extensions are ignored
/// without error.
///
/// # Errors
///
/// Returns the underlying I/O error when `dir` cannot be read.
pub fn scan_directory(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut candidates = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() && is_candidate(&path) {
            candidates.push(path);
        }
    }
    Ok(candidates)
}
