//! Stage figure rendering.
//!
//! Renders a stage raster as a plot-style figure: the image centered on
//! a white canvas with proportional margins, a framed axes box, and
//! extra headroom where the original tool put its title. The stage
//! title itself is carried in the artifact filename; no font asset is
//! bundled, so no glyphs are rasterized.

use granum_pipeline::{GrayImage, RgbImage};
use image::Rgb;
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;

/// Margin as a fraction of the larger image side.
const MARGIN_DIVISOR: u32 = 8;

/// Smallest margin in pixels, for tiny inputs.
const MIN_MARGIN: u32 = 8;

/// Canvas background.
const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);

/// Axes frame color.
const FRAME: Rgb<u8> = Rgb([0, 0, 0]);

/// Render a stage image as a figure.
///
/// The title band above the axes box is twice the side margin, mirroring
/// the original figure layout.
#[must_use = "returns the rendered figure"]
pub fn render(stage: &RgbImage) -> RgbImage {
    let margin = (stage.width().max(stage.height()) / MARGIN_DIVISOR).max(MIN_MARGIN);
    let title_band = margin * 2;
    let width = stage.width() + margin * 2;
    let height = stage.height() + title_band + margin;

    let mut canvas = RgbImage::from_pixel(width, height, BACKGROUND);
    image::imageops::replace(&mut canvas, stage, i64::from(margin), i64::from(title_band));

    // Axes box, one pixel outside the image area.
    #[allow(clippy::cast_possible_wrap)]
    let frame = Rect::at(margin as i32 - 1, title_band as i32 - 1)
        .of_size(stage.width() + 2, stage.height() + 2);
    draw_hollow_rect_mut(&mut canvas, frame, FRAME);

    canvas
}

/// Expand a grayscale stage to RGB so it can be rendered on the figure
/// canvas.
#[must_use]
pub fn gray_to_rgb(image: &GrayImage) -> RgbImage {
    RgbImage::from_fn(image.width(), image.height(), |x, y| {
        let v = image.get_pixel(x, y).0[0];
        Rgb([v, v, v])
    })
}
