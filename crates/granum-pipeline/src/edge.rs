//! Canny edge detection: Sobel gradients, non-maximum suppression, and
//! two-threshold hysteresis.
//!
//! The detector operates on the already-smoothed buffer from the blur
//! stage and performs no smoothing of its own. Pixels with gradient
//! magnitude above the high threshold are accepted immediately; pixels
//! below the low threshold are rejected; pixels in between are accepted
//! only when 8-connected to an already-accepted pixel. The output is a
//! binary map: 255 for edge pixels, 0 for background.
//!
//! The hysteresis walk visits all eight cardinal/diagonal neighbors and
//! bounds-checks each one, so edges touching the image border are
//! handled without wrapping. (`imageproc::edges::canny` 0.26.0 omits
//! two neighbors and underflows at the border — see
//! <https://github.com/image-rs/imageproc/issues/705> — which is why
//! the detector lives here instead of delegating.)

use image::{GrayImage, Luma};
use imageproc::definitions::Image;
use imageproc::filter::filter_clamped;
use imageproc::kernel;

/// Sobel aperture side length used for gradient estimation.
pub const APERTURE_SIZE: u32 = 3;

/// Minimum allowed hysteresis threshold.
///
/// A low threshold of zero turns every pixel with any gradient into a
/// potential edge, producing a degenerate edge map that overwhelms
/// contour extraction.
pub const MIN_THRESHOLD: f32 = 1.0;
const _: () = assert!(MIN_THRESHOLD > 0.0);

/// Detect edges using the Canny algorithm.
///
/// Returns a binary image: 255 for edge pixels, 0 for non-edge.
///
/// Both thresholds are clamped to a minimum of [`MIN_THRESHOLD`] and
/// `low_threshold` is clamped to be at most `high_threshold`. Images
/// smaller than the Sobel aperture in either dimension have no interior
/// to estimate gradients on and yield an all-zero map.
#[must_use = "returns the binary edge map"]
pub fn canny(image: &GrayImage, low_threshold: f32, high_threshold: f32) -> GrayImage {
    let high = high_threshold.max(MIN_THRESHOLD);
    let low = low_threshold.max(MIN_THRESHOLD).min(high);

    if image.width() < APERTURE_SIZE || image.height() < APERTURE_SIZE {
        return GrayImage::new(image.width(), image.height());
    }

    // 1. Gradient estimation with a 3x3 Sobel aperture.
    let gx = filter_clamped(image, kernel::SOBEL_HORIZONTAL_3X3);
    let gy = filter_clamped(image, kernel::SOBEL_VERTICAL_3X3);

    let mut magnitude = Image::from_pixel(image.width(), image.height(), Luma([0.0f32]));
    for (m, (h, v)) in magnitude
        .pixels_mut()
        .zip(gx.pixels().zip(gy.pixels()))
    {
        m.0[0] = f32::from(h.0[0]).hypot(f32::from(v.0[0]));
    }

    // 2. Non-maximum suppression to thin ridges to single-pixel width.
    let thinned = non_maximum_suppression(&magnitude, &gx, &gy);

    // 3. Two-threshold hysteresis.
    hysteresis(&thinned, low, high)
}

/// Suppress gradient magnitudes that are not local maxima along their
/// gradient direction.
///
/// The gradient angle is quantized to one of four directions (0, 45,
/// 90, 135 degrees) and the pixel is kept only if its magnitude is at
/// least that of both neighbors perpendicular to the quantized edge
/// direction.
fn non_maximum_suppression(
    magnitude: &Image<Luma<f32>>,
    gx: &Image<Luma<i16>>,
    gy: &Image<Luma<i16>>,
) -> Image<Luma<f32>> {
    const RADIANS_TO_DEGREES: f32 = 180.0 / std::f32::consts::PI;
    let mut out = Image::from_pixel(magnitude.width(), magnitude.height(), Luma([0.0]));
    for y in 1..magnitude.height() - 1 {
        for x in 1..magnitude.width() - 1 {
            let x_gradient = f32::from(gx.get_pixel(x, y).0[0]);
            let y_gradient = f32::from(gy.get_pixel(x, y).0[0]);
            let mut angle = y_gradient.atan2(x_gradient) * RADIANS_TO_DEGREES;
            if angle < 0.0 {
                angle += 180.0;
            }

            // The two neighbors along the quantized gradient direction.
            let (cmp1, cmp2) = if !(22.5..157.5).contains(&angle) {
                (*magnitude.get_pixel(x - 1, y), *magnitude.get_pixel(x + 1, y))
            } else if (22.5..67.5).contains(&angle) {
                (
                    *magnitude.get_pixel(x + 1, y + 1),
                    *magnitude.get_pixel(x - 1, y - 1),
                )
            } else if (67.5..112.5).contains(&angle) {
                (*magnitude.get_pixel(x, y - 1), *magnitude.get_pixel(x, y + 1))
            } else {
                (
                    *magnitude.get_pixel(x - 1, y + 1),
                    *magnitude.get_pixel(x + 1, y - 1),
                )
            };

            let pixel = *magnitude.get_pixel(x, y);
            if pixel.0[0] >= cmp1.0[0] && pixel.0[0] >= cmp2.0[0] {
                out.put_pixel(x, y, pixel);
            }
        }
    }
    out
}

/// Apply two-threshold hysteresis to a thinned gradient image.
///
/// Strong pixels (>= `high_thresh`) seed a breadth-first walk that
/// accepts every 8-connected neighbor still >= `low_thresh`.
fn hysteresis(input: &Image<Luma<f32>>, low_thresh: f32, high_thresh: f32) -> GrayImage {
    let (width, height) = (input.width(), input.height());
    let mut out = GrayImage::new(width, height);
    let mut pending: Vec<(u32, u32)> = Vec::new();

    for y in 1..height - 1 {
        for x in 1..width - 1 {
            if input.get_pixel(x, y).0[0] >= high_thresh && out.get_pixel(x, y).0[0] == 0 {
                out.put_pixel(x, y, Luma([255]));
                pending.push((x, y));

                while let Some((nx, ny)) = pending.pop() {
                    // All eight neighbors; wrapping_sub keeps the
                    // arithmetic in u32 and the bounds check below
                    // rejects the wrapped coordinates.
                    let neighbors = [
                        (nx + 1, ny),
                        (nx + 1, ny + 1),
                        (nx, ny + 1),
                        (nx.wrapping_sub(1), ny + 1),
                        (nx.wrapping_sub(1), ny),
                        (nx.wrapping_sub(1), ny.wrapping_sub(1)),
                        (nx, ny.wrapping_sub(1)),
                        (nx + 1, ny.wrapping_sub(1)),
                    ];

                    for &(cx, cy) in &neighbors {
                        if cx >= width || cy >= height {
                            continue;
                        }
                        if input.get_pixel(cx, cy).0[0] >= low_thresh
                            && out.get_pixel(cx, cy).0[0] == 0
                        {
                            out.put_pixel(cx, cy, Luma([255]));
                            pending.push((cx, cy));
                        }
                    }
                }
            }
        }
    }
    out
}
