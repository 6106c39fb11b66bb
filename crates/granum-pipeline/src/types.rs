//! Shared types for the granum image processing pipeline.

use serde::{Deserialize, Serialize};

use crate::morphology::StructuringElement;

/// Re-export `GrayImage` so downstream crates can reference
/// intermediate raster data without depending on `image` directly.
pub use image::GrayImage;

/// Re-export `RgbImage` so downstream crates can reference the
/// original decoded image without depending on `image` directly.
pub use image::RgbImage;

/// A boundary point in image coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal position (pixels from left edge).
    pub x: u32,
    /// Vertical position (pixels from top edge).
    pub y: u32,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// The outer boundary of one connected foreground region.
///
/// Points are ordered along the boundary and form a closed cycle:
/// consecutive points (and the last-to-first pair) are 8-neighbors.
/// Every boundary point is retained — no simplification is applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contour(Vec<Point>);

impl Contour {
    /// Create a new contour from a vector of boundary points.
    #[must_use]
    pub const fn new(points: Vec<Point>) -> Self {
        Self(points)
    }

    /// Returns `true` if the contour has no points.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of boundary points.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns a slice of all boundary points.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.0
    }

    /// Consumes the contour and returns the underlying vector of points.
    #[must_use]
    pub fn into_points(self) -> Vec<Point> {
        self.0
    }
}

/// Image dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Configuration for the image processing pipeline.
///
/// All parameters default to the observed processing constants; the
/// `DEFAULT_*` associated consts are the single source of truth for
/// those values (the CLI references them for its flag defaults).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Gaussian blur kernel side length in pixels. Must be odd and
    /// non-zero. A kernel of 1 disables smoothing.
    pub blur_kernel_size: u32,

    /// Gaussian blur standard deviation. Zero means "derive from
    /// `blur_kernel_size`" (see [`crate::blur::derived_sigma`]).
    pub blur_sigma: f32,

    /// Edge detector low threshold. Pixels with gradient magnitude
    /// between `canny_low` and `canny_high` are edges only if connected
    /// to a strong edge.
    pub canny_low: f32,

    /// Edge detector high threshold. Pixels with gradient magnitude
    /// above this value are definite edges.
    pub canny_high: f32,

    /// Structuring element for the dilation stage. The default 1x1
    /// element makes dilation the identity.
    pub dilate_element: StructuringElement,

    /// Number of dilation passes. Zero makes dilation the identity.
    pub dilate_iterations: u32,
}

impl PipelineConfig {
    /// Default Gaussian kernel side length.
    pub const DEFAULT_BLUR_KERNEL_SIZE: u32 = 11;
    /// Default Gaussian sigma (zero: derive from the kernel size).
    pub const DEFAULT_BLUR_SIGMA: f32 = 0.0;
    /// Default low hysteresis threshold.
    pub const DEFAULT_CANNY_LOW: f32 = 30.0;
    /// Default high hysteresis threshold.
    pub const DEFAULT_CANNY_HIGH: f32 = 150.0;
    /// Default structuring element (identity).
    pub const DEFAULT_DILATE_ELEMENT: StructuringElement = StructuringElement::rect(1, 1);
    /// Default dilation pass count (identity).
    pub const DEFAULT_DILATE_ITERATIONS: u32 = 0;

    /// Check structural invariants that the stages rely on.
    ///
    /// The blur kernel must be odd and non-zero (a symmetric kernel has
    /// a well-defined center pixel), and the structuring element must
    /// have a non-zero area.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::InvalidConfig`] naming the offending
    /// field.
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.blur_kernel_size == 0 || self.blur_kernel_size % 2 == 0 {
            return Err(PipelineError::InvalidConfig(format!(
                "blur_kernel_size must be odd and non-zero, got {}",
                self.blur_kernel_size,
            )));
        }
        if self.dilate_element.width == 0 || self.dilate_element.height == 0 {
            return Err(PipelineError::InvalidConfig(format!(
                "dilate_element must have non-zero area, got {}x{}",
                self.dilate_element.width, self.dilate_element.height,
            )));
        }
        Ok(())
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            blur_kernel_size: Self::DEFAULT_BLUR_KERNEL_SIZE,
            blur_sigma: Self::DEFAULT_BLUR_SIGMA,
            canny_low: Self::DEFAULT_CANNY_LOW,
            canny_high: Self::DEFAULT_CANNY_HIGH,
            dilate_element: Self::DEFAULT_DILATE_ELEMENT,
            dilate_iterations: Self::DEFAULT_DILATE_ITERATIONS,
        }
    }
}

/// Result of running the pipeline on one image.
///
/// Contains the external contours and the source image dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessResult {
    /// External contours, one per detected object.
    pub contours: Vec<Contour>,

    /// Dimensions of the source image in pixels.
    pub dimensions: Dimensions,
}

impl ProcessResult {
    /// Number of detected objects (external contours).
    #[must_use]
    pub const fn object_count(&self) -> usize {
        self.contours.len()
    }
}

/// Result of running the pipeline with all intermediate stage outputs
/// preserved, so the orchestration layer can persist per-stage
/// artifacts.
///
/// Note: does not derive `PartialEq` because the raster buffers make
/// pixel-wise comparison more expensive than callers ever need.
#[derive(Debug, Clone)]
pub struct StagedResult {
    /// Stage 0: original decoded RGB image (pre-processing).
    pub original: RgbImage,
    /// Stage 1: grayscale image.
    pub grayscale: GrayImage,
    /// Stage 2: Gaussian-blurred image.
    pub blurred: GrayImage,
    /// Stage 3: binary edge map.
    pub edges: GrayImage,
    /// Stage 4: dilated edge map.
    pub dilated: GrayImage,
    /// Stage 5: original with contours drawn in green.
    pub overlay: RgbImage,
    /// External contours extracted from the dilated edge map.
    pub contours: Vec<Contour>,
    /// Source image dimensions in pixels.
    pub dimensions: Dimensions,
}

impl StagedResult {
    /// Number of detected objects (external contours).
    #[must_use]
    pub const fn object_count(&self) -> usize {
        self.contours.len()
    }
}

/// Errors that can occur during pipeline processing.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Failed to decode the input image.
    #[error("failed to decode image: {0}")]
    ImageDecode(#[from] image::ImageError),

    /// The input image bytes were empty.
    #[error("input image data is empty")]
    EmptyInput,

    /// Pipeline configuration is invalid.
    #[error("invalid pipeline configuration: {0}")]
    InvalidConfig(String),
}
