//! Morphological dilation of the binary edge map.
//!
//! Dilation grows foreground regions: each output pixel takes the
//! maximum value found under the structuring element anchored at that
//! pixel. Out-of-bounds samples are ignored, so the border behaves as
//! if padded with background.
//!
//! The default configuration — a 1x1 element applied 0 times — leaves
//! the buffer unchanged. That matches the observed processing constants
//! exactly; the parameters look like they were meant to strengthen weak
//! edges before contour extraction and never did. The no-op is kept for
//! count compatibility rather than corrected here, and the stage stays
//! fully parametrized so non-identity configurations behave as a real
//! dilation.

use image::{GrayImage, Luma};
use serde::{Deserialize, Serialize};

/// A rectangular all-ones structuring element.
///
/// The anchor sits at the element center (`width / 2`, `height / 2`),
/// so odd dimensions grow regions symmetrically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuringElement {
    /// Element width in pixels.
    pub width: u32,
    /// Element height in pixels.
    pub height: u32,
}

impl StructuringElement {
    /// Create a rectangular element.
    #[must_use]
    pub const fn rect(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Returns `true` when the element covers at most the anchor pixel,
    /// making dilation the identity.
    #[must_use]
    pub const fn is_identity(self) -> bool {
        self.width <= 1 && self.height <= 1
    }
}

impl Default for StructuringElement {
    fn default() -> Self {
        Self::rect(1, 1)
    }
}

/// Dilate a grayscale image with `element`, `iterations` times.
///
/// Zero iterations or an identity element return the input unchanged.
#[must_use = "returns the dilated image"]
pub fn dilate(image: &GrayImage, element: StructuringElement, iterations: u32) -> GrayImage {
    if iterations == 0 || element.is_identity() {
        return image.clone();
    }

    let mut current = image.clone();
    for _ in 0..iterations {
        current = dilate_once(&current, element);
    }
    current
}

/// One dilation pass: per-pixel maximum over the element neighborhood.
fn dilate_once(image: &GrayImage, element: StructuringElement) -> GrayImage {
    let anchor_x = i64::from(element.width / 2);
    let anchor_y = i64::from(element.height / 2);
    let (width, height) = (i64::from(image.width()), i64::from(image.height()));

    GrayImage::from_fn(image.width(), image.height(), |x, y| {
        let mut max = 0u8;
        for ky in 0..i64::from(element.height) {
            for kx in 0..i64::from(element.width) {
                let ix = i64::from(x) + kx - anchor_x;
                let iy = i64::from(y) + ky - anchor_y;
                if ix < 0 || iy < 0 || ix >= width || iy >= height {
                    continue;
                }
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let sample = image.get_pixel(ix as u32, iy as u32).0[0];
                max = max.max(sample);
            }
        }
        Luma([max])
    })
}
