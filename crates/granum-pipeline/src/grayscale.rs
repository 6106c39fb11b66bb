//! Image decoding and grayscale conversion.
//!
//! Accepts raw image bytes (PNG, JPEG) and produces the decoded color
//! buffer plus a single-channel grayscale image for the rest of the
//! pipeline. Decoding is split from conversion because the original
//! color buffer is needed again at the end, as the canvas for the
//! contour overlay.

use image::{GrayImage, RgbImage};

use crate::types::PipelineError;

/// Decode raw image bytes into an RGB buffer.
///
/// Supports whatever formats the `image` crate is compiled with
/// (PNG and JPEG here). Alpha channels are dropped.
///
/// # Errors
///
/// Returns [`PipelineError::EmptyInput`] if `bytes` is empty.
/// Returns [`PipelineError::ImageDecode`] if the image format is
/// unrecognized or the data is corrupt.
#[must_use = "returns the decoded image"]
pub fn decode(bytes: &[u8]) -> Result<RgbImage, PipelineError> {
    if bytes.is_empty() {
        return Err(PipelineError::EmptyInput);
    }

    let img = image::load_from_memory(bytes)?;
    Ok(img.to_rgb8())
}

/// Convert an RGB buffer to grayscale.
///
/// Uses the imaging library's fixed weighted luma combination of the
/// three channels. Deterministic, no parameters; output dimensions
/// match the input.
#[must_use = "returns the grayscale image"]
pub fn grayscale(image: &RgbImage) -> GrayImage {
    image::imageops::grayscale(image)
}
