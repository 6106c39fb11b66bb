//! Contour overlay rendering.
//!
//! Draws extracted contours as closed green polylines onto a copy of
//! the original color image for visual inspection. Drawing never
//! touches the binary map the contours were extracted from, so it
//! cannot affect the reported count.

use image::{Rgb, RgbImage};
use imageproc::drawing::draw_line_segment_mut;

use crate::types::Contour;

/// Stroke color for contour outlines (RGB).
pub const CONTOUR_COLOR: Rgb<u8> = Rgb([0, 255, 0]);

/// Stroke width in pixels.
pub const CONTOUR_THICKNESS: u32 = 2;

/// Draw contours onto a copy of `image` and return the copy.
#[must_use = "returns the overlay image"]
pub fn draw_contours(image: &RgbImage, contours: &[Contour]) -> RgbImage {
    let mut canvas = image.clone();
    draw_contours_mut(&mut canvas, contours);
    canvas
}

/// Draw each contour as a closed polyline directly onto `canvas`.
///
/// The stroke is widened to [`CONTOUR_THICKNESS`] by stamping each
/// segment once per offset in a thickness-sized square.
#[allow(clippy::cast_precision_loss)]
pub fn draw_contours_mut(canvas: &mut RgbImage, contours: &[Contour]) {
    for contour in contours {
        let points = contour.points();
        for i in 0..points.len() {
            let p1 = points[i];
            let p2 = points[(i + 1) % points.len()];
            for dy in 0..CONTOUR_THICKNESS {
                for dx in 0..CONTOUR_THICKNESS {
                    draw_line_segment_mut(
                        canvas,
                        ((p1.x + dx) as f32, (p1.y + dy) as f32),
                        ((p2.x + dx) as f32, (p2.y + dy) as f32),
                        CONTOUR_COLOR,
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Point;

    fn square_contour() -> Contour {
        Contour::new(vec![
            Point::new(2, 2),
            Point::new(6, 2),
            Point::new(6, 6),
            Point::new(2, 6),
        ])
    }

    #[test]
    fn drawing_leaves_source_untouched() {
        let original = RgbImage::from_pixel(10, 10, Rgb([10, 20, 30]));
        let overlay = draw_contours(&original, &[square_contour()]);
        assert!(original.pixels().all(|p| *p == Rgb([10, 20, 30])));
        assert_ne!(original, overlay);
    }

    #[test]
    fn drawn_pixels_are_green() {
        let original = RgbImage::from_pixel(10, 10, Rgb([0, 0, 0]));
        let overlay = draw_contours(&original, &[square_contour()]);
        // Contour vertices must be stroked.
        assert_eq!(*overlay.get_pixel(2, 2), CONTOUR_COLOR);
        assert_eq!(*overlay.get_pixel(6, 6), CONTOUR_COLOR);
        // Everything drawn is either untouched background or the stroke
        // color.
        assert!(
            overlay
                .pixels()
                .all(|p| *p == Rgb([0, 0, 0]) || *p == CONTOUR_COLOR),
        );
    }

    #[test]
    fn stroke_is_two_pixels_wide() {
        let original = RgbImage::from_pixel(12, 12, Rgb([0, 0, 0]));
        let overlay = draw_contours(&original, &[square_contour()]);
        // The top edge runs along y=2; the widened stroke also covers
        // y=3.
        assert_eq!(*overlay.get_pixel(4, 2), CONTOUR_COLOR);
        assert_eq!(*overlay.get_pixel(4, 3), CONTOUR_COLOR);
    }

    #[test]
    fn polyline_is_closed() {
        // The segment from the last point back to the first must be
        // drawn: midpoint of (2,6)-(2,2) lies at (2,4).
        let original = RgbImage::from_pixel(10, 10, Rgb([0, 0, 0]));
        let overlay = draw_contours(&original, &[square_contour()]);
        assert_eq!(*overlay.get_pixel(2, 4), CONTOUR_COLOR);
    }

    #[test]
    fn single_point_contour_is_drawn() {
        let original = RgbImage::from_pixel(5, 5, Rgb([0, 0, 0]));
        let overlay = draw_contours(&original, &[Contour::new(vec![Point::new(2, 2)])]);
        assert_eq!(*overlay.get_pixel(2, 2), CONTOUR_COLOR);
    }

    #[test]
    fn no_contours_is_a_no_op() {
        let original = RgbImage::from_pixel(5, 5, Rgb([7, 7, 7]));
        let overlay = draw_contours(&original, &[]);
        assert_eq!(original, overlay);
    }
}
