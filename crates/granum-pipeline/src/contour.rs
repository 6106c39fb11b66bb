//! External contour extraction from a binary map.
//!
//! Uses Suzuki-Abe border following
//! ([`imageproc::contours::find_contours`]) and keeps only top-level
//! outer boundaries: one contour per connected foreground region, with
//! hole boundaries and anything nested inside a hole discarded. The
//! number of returned contours is the image's object count.

use image::GrayImage;
use imageproc::contours::BorderType;

use crate::types::{Contour, Point};

/// Extract the external contours of a binary image.
///
/// Foreground is any non-zero pixel. Full boundary point sequences are
/// retained, including degenerate single-point boundaries — an isolated
/// foreground pixel is still one object.
#[must_use = "returns the external contours"]
pub fn external_contours(image: &GrayImage) -> Vec<Contour> {
    let contours: Vec<imageproc::contours::Contour<u32>> =
        imageproc::contours::find_contours(image);

    contours
        .into_iter()
        .filter(|c| c.parent.is_none() && matches!(c.border_type, BorderType::Outer))
        .map(|c| {
            let points = c
                .points
                .into_iter()
                .map(|p| Point::new(p.x, p.y))
                .collect();
            Contour::new(points)
        })
        .collect()
}
