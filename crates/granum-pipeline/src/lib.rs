//! granum-pipeline: Pure image processing pipeline (sans-IO).
//!
//! Counts objects in raster images through a fixed stage chain:
//! grayscale -> Gaussian blur -> Canny edge detection -> dilation ->
//! external contour extraction.
//!
//! This crate has **no I/O dependencies** -- it operates on in-memory
//! byte slices and returns structured data. Directory scanning, artifact
//! persistence, and result export live in `granum-cli` and
//! `granum-export`.

pub mod blur;
pub mod contour;
pub mod edge;
pub mod grayscale;
pub mod morphology;
pub mod overlay;
pub mod types;

pub use morphology::StructuringElement;
pub use types::{
    Contour, Dimensions, GrayImage, PipelineConfig, PipelineError, Point, ProcessResult,
    RgbImage, StagedResult,
};

/// Run the full processing pipeline on one image.
///
/// Takes raw image bytes (PNG, JPEG) and a configuration, and produces
/// a [`ProcessResult`] with the external contours and source
/// dimensions. The object count is the number of contours; an image
/// with no detectable objects yields an empty contour set, not an
/// error.
///
/// # Pipeline steps
///
/// 1. Decode image
/// 2. Grayscale conversion
/// 3. Gaussian blur (noise reduction)
/// 4. Canny edge detection (two-threshold hysteresis)
/// 5. Dilation (identity under the default configuration)
/// 6. External contour extraction
///
/// # Errors
///
/// Returns [`PipelineError::EmptyInput`] if `image_bytes` is empty.
/// Returns [`PipelineError::ImageDecode`] if the image format is
/// unrecognized or the data is corrupt.
/// Returns [`PipelineError::InvalidConfig`] if `config` violates a
/// structural invariant (see [`PipelineConfig::validate`]).
pub fn process(
    image_bytes: &[u8],
    config: &PipelineConfig,
) -> Result<ProcessResult, PipelineError> {
    config.validate()?;

    let original = grayscale::decode(image_bytes)?;
    let dimensions = Dimensions {
        width: original.width(),
        height: original.height(),
    };

    let gray = grayscale::grayscale(&original);
    let blurred = blur::gaussian_blur(&gray, config.blur_kernel_size, config.blur_sigma);
    let edges = edge::canny(&blurred, config.canny_low, config.canny_high);
    let dilated = morphology::dilate(&edges, config.dilate_element, config.dilate_iterations);
    let contours = contour::external_contours(&dilated);

    Ok(ProcessResult {
        contours,
        dimensions,
    })
}

/// Run the pipeline keeping every intermediate stage output.
///
/// Same stage chain as [`process`], plus the contour overlay drawn on a
/// copy of the original. Used by the orchestration layer to persist
/// per-stage artifacts.
///
/// # Errors
///
/// Same as [`process`].
pub fn process_staged(
    image_bytes: &[u8],
    config: &PipelineConfig,
) -> Result<StagedResult, PipelineError> {
    config.validate()?;

    let original = grayscale::decode(image_bytes)?;
    let dimensions = Dimensions {
        width: original.width(),
        height: original.height(),
    };

    let gray = grayscale::grayscale(&original);
    let blurred = blur::gaussian_blur(&gray, config.blur_kernel_size, config.blur_sigma);
    let edges = edge::canny(&blurred, config.canny_low, config.canny_high);
    let dilated = morphology::dilate(&edges, config.dilate_element, config.dilate_iterations);
    let contours = contour::external_contours(&dilated);
    let overlay = overlay::draw_contours(&original, &contours);

    Ok(StagedResult {
        original,
        grayscale: gray,
        blurred,
        edges,
        dilated,
        overlay,
        contours,
        dimensions,
    })
}
