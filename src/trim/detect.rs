//! Background bound detection
//!
//! # Algorithm
//!
//! 1. Flatten the image to RGB, compositing transparency onto the background tone
//! 2. Scan columns inward from the left and right edges until a column holds
//!    a non-background pixel (horizontal / both)
//! 3. Scan rows inward from the top and bottom edges the same way (vertical / both)
//! 4. Clamp the result so the box is never empty

use image::{DynamicImage, Rgb, RgbImage};
use tracing::debug;

use super::types::{AxisMode, BoundingBox, DetectionColorMode, Result, TrimError};

/// Whether the image carries transparency
///
/// Palette transparency is expanded to an alpha channel by the decoders, so
/// the colour type check covers it.
pub fn has_alpha(image: &DynamicImage) -> bool {
    image.color().has_alpha()
}

/// Blend one channel over an opaque background
#[inline]
pub(crate) fn composite_channel(fg: u8, bg: u8, alpha: u8) -> u8 {
    let a = alpha as u32;
    ((fg as u32 * a + bg as u32 * (255 - a) + 127) / 255) as u8
}

/// Build the RGB view used only for measurement
///
/// Transparent images are composited onto white (white mode) or black
/// (black mode) first so transparent areas classify as background.
pub fn detection_view(image: &DynamicImage, color_mode: DetectionColorMode) -> RgbImage {
    if !has_alpha(image) {
        return image.to_rgb8();
    }

    let [bg_r, bg_g, bg_b] = color_mode.fill_rgb();
    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();
    let mut view = RgbImage::new(width, height);

    for (x, y, pixel) in rgba.enumerate_pixels() {
        let [r, g, b, a] = pixel.0;
        view.put_pixel(
            x,
            y,
            Rgb([
                composite_channel(r, bg_r, a),
                composite_channel(g, bg_g, a),
                composite_channel(b, bg_b, a),
            ]),
        );
    }

    view
}

/// Find the content box of a detection view
///
/// Axes outside `axis_mode` keep their full extent. A scan that finds no
/// content leaves that axis at full extent too, and the final clamp keeps
/// the box at least one pixel wide and tall.
pub fn detect_bounds(
    view: &RgbImage,
    color_mode: DetectionColorMode,
    axis_mode: AxisMode,
    threshold: u8,
) -> Result<BoundingBox> {
    let (width, height) = view.dimensions();
    if width == 0 || height == 0 {
        return Err(TrimError::EmptyImage);
    }

    let is_content = |x: u32, y: u32| !color_mode.is_background(view.get_pixel(x, y).0, threshold);
    let column_has_content = |x: u32| (0..height).any(|y| is_content(x, y));
    let row_has_content = |y: u32| (0..width).any(|x| is_content(x, y));

    let (mut left, mut right, mut top, mut bottom) = (0, width, 0, height);

    if axis_mode.trims_columns() {
        if let Some(x) = (0..width).find(|&x| column_has_content(x)) {
            left = x;
        }
        if let Some(x) = (0..width).rev().find(|&x| column_has_content(x)) {
            right = x + 1;
        }
    }

    if axis_mode.trims_rows() {
        if let Some(y) = (0..height).find(|&y| row_has_content(y)) {
            top = y;
        }
        if let Some(y) = (0..height).rev().find(|&y| row_has_content(y)) {
            bottom = y + 1;
        }
    }

    let left = left.min(width - 1);
    let right = right.min(width).max(left + 1);
    let top = top.min(height - 1);
    let bottom = bottom.min(height).max(top + 1);

    let bounds = BoundingBox {
        left,
        right,
        top,
        bottom,
    };
    debug!(
        "Detected bounds {} on {}x{} ({}, {})",
        bounds, width, height, color_mode, axis_mode
    );

    Ok(bounds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
    const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

    fn white_with_pixel(width: u32, height: u32, x: u32, y: u32) -> RgbImage {
        let mut img = RgbImage::from_pixel(width, height, WHITE);
        img.put_pixel(x, y, BLACK);
        img
    }

    #[test]
    fn test_uniform_background_yields_non_empty_box() {
        let white = RgbImage::from_pixel(10, 8, WHITE);
        let black = RgbImage::from_pixel(10, 8, BLACK);

        for threshold in [0u8, 1, 70, 128, 254, 255] {
            for axis in [AxisMode::Horizontal, AxisMode::Vertical, AxisMode::Both] {
                let bbox =
                    detect_bounds(&white, DetectionColorMode::White, axis, threshold).unwrap();
                assert!(bbox.width() >= 1 && bbox.height() >= 1);
                assert!(bbox.right <= 10 && bbox.bottom <= 8);

                let bbox =
                    detect_bounds(&black, DetectionColorMode::Black, axis, threshold).unwrap();
                assert!(bbox.width() >= 1 && bbox.height() >= 1);
                assert!(bbox.right <= 10 && bbox.bottom <= 8);
            }
        }
    }

    #[test]
    fn test_uniform_background_keeps_full_extent() {
        let white = RgbImage::from_pixel(10, 10, WHITE);
        let bbox = detect_bounds(&white, DetectionColorMode::White, AxisMode::Both, 70).unwrap();
        assert_eq!(bbox, BoundingBox::full(10, 10));
    }

    #[test]
    fn test_single_pixel_exact_bounds() {
        for (x0, y0) in [(0, 0), (3, 7), (9, 9), (5, 0), (0, 6)] {
            let img = white_with_pixel(10, 10, x0, y0);
            let bbox = detect_bounds(&img, DetectionColorMode::White, AxisMode::Both, 70).unwrap();
            assert_eq!(
                bbox,
                BoundingBox {
                    left: x0,
                    right: x0 + 1,
                    top: y0,
                    bottom: y0 + 1,
                }
            );
        }
    }

    #[test]
    fn test_single_pixel_black_mode() {
        let mut img = RgbImage::from_pixel(12, 6, BLACK);
        img.put_pixel(2, 4, WHITE);

        let bbox = detect_bounds(&img, DetectionColorMode::Black, AxisMode::Both, 70).unwrap();
        assert_eq!(
            bbox,
            BoundingBox {
                left: 2,
                right: 3,
                top: 4,
                bottom: 5,
            }
        );
    }

    #[test]
    fn test_horizontal_only_keeps_rows() {
        let img = white_with_pixel(10, 10, 3, 7);
        let bbox =
            detect_bounds(&img, DetectionColorMode::White, AxisMode::Horizontal, 70).unwrap();
        assert_eq!(
            bbox,
            BoundingBox {
                left: 3,
                right: 4,
                top: 0,
                bottom: 10,
            }
        );
    }

    #[test]
    fn test_vertical_only_keeps_columns() {
        let img = white_with_pixel(10, 10, 3, 7);
        let bbox = detect_bounds(&img, DetectionColorMode::White, AxisMode::Vertical, 70).unwrap();
        assert_eq!(
            bbox,
            BoundingBox {
                left: 0,
                right: 10,
                top: 7,
                bottom: 8,
            }
        );
    }

    #[test]
    fn test_block_bounds() {
        let mut img = RgbImage::from_pixel(10, 10, WHITE);
        for y in 4..6 {
            for x in 4..6 {
                img.put_pixel(x, y, BLACK);
            }
        }

        let bbox = detect_bounds(&img, DetectionColorMode::White, AxisMode::Both, 70).unwrap();
        assert_eq!(
            bbox,
            BoundingBox {
                left: 4,
                right: 6,
                top: 4,
                bottom: 6,
            }
        );
    }

    #[test]
    fn test_threshold_controls_classification() {
        let mut img = RgbImage::from_pixel(10, 10, WHITE);
        img.put_pixel(5, 5, Rgb([200, 200, 200]));

        // 200 >= 255 - 70, so light grey is background
        let loose = detect_bounds(&img, DetectionColorMode::White, AxisMode::Both, 70).unwrap();
        assert_eq!(loose, BoundingBox::full(10, 10));

        // 200 < 255 - 40, so it is content
        let strict = detect_bounds(&img, DetectionColorMode::White, AxisMode::Both, 40).unwrap();
        assert_eq!(
            strict,
            BoundingBox {
                left: 5,
                right: 6,
                top: 5,
                bottom: 6,
            }
        );
    }

    #[test]
    fn test_single_channel_breaks_background() {
        let mut img = RgbImage::from_pixel(8, 8, WHITE);
        img.put_pixel(6, 1, Rgb([255, 255, 0]));

        let bbox = detect_bounds(&img, DetectionColorMode::White, AxisMode::Both, 70).unwrap();
        assert_eq!(bbox.left, 6);
        assert_eq!(bbox.top, 1);
    }

    #[test]
    fn test_content_touching_edges_is_stable() {
        let mut img = RgbImage::from_pixel(6, 4, WHITE);
        img.put_pixel(0, 0, BLACK);
        img.put_pixel(5, 3, BLACK);

        let bbox = detect_bounds(&img, DetectionColorMode::White, AxisMode::Both, 70).unwrap();
        assert!(bbox.is_full(6, 4));
    }

    #[test]
    fn test_empty_image_rejected() {
        let img = RgbImage::new(0, 5);
        let result = detect_bounds(&img, DetectionColorMode::White, AxisMode::Both, 70);
        assert!(matches!(result, Err(TrimError::EmptyImage)));
    }

    #[test]
    fn test_one_by_one_image() {
        let img = RgbImage::from_pixel(1, 1, WHITE);
        let bbox = detect_bounds(&img, DetectionColorMode::White, AxisMode::Both, 70).unwrap();
        assert_eq!(bbox, BoundingBox::full(1, 1));
    }

    #[test]
    fn test_has_alpha() {
        let rgb = DynamicImage::ImageRgb8(RgbImage::new(2, 2));
        let rgba = DynamicImage::ImageRgba8(RgbaImage::new(2, 2));
        let luma_alpha = DynamicImage::ImageLumaA8(image::GrayAlphaImage::new(2, 2));

        assert!(!has_alpha(&rgb));
        assert!(has_alpha(&rgba));
        assert!(has_alpha(&luma_alpha));
    }

    #[test]
    fn test_detection_view_composites_transparency() {
        let mut rgba = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 0]));
        rgba.put_pixel(1, 2, Rgba([0, 0, 0, 128]));
        let img = DynamicImage::ImageRgba8(rgba);

        let white_view = detection_view(&img, DetectionColorMode::White);
        assert_eq!(white_view.get_pixel(0, 0), &WHITE);
        assert_eq!(white_view.get_pixel(1, 2), &Rgb([127, 127, 127]));

        let black_view = detection_view(&img, DetectionColorMode::Black);
        assert_eq!(black_view.get_pixel(0, 0), &BLACK);
        assert_eq!(black_view.get_pixel(1, 2), &BLACK);
    }

    #[test]
    fn test_transparent_region_is_background() {
        // Opaque red subject on a fully transparent canvas
        let mut rgba = RgbaImage::from_pixel(10, 10, Rgba([0, 0, 0, 0]));
        for y in 2..5 {
            for x in 3..8 {
                rgba.put_pixel(x, y, Rgba([200, 0, 0, 255]));
            }
        }
        let img = DynamicImage::ImageRgba8(rgba);

        for mode in [DetectionColorMode::White, DetectionColorMode::Black] {
            let view = detection_view(&img, mode);
            let bbox = detect_bounds(&view, mode, AxisMode::Both, 70).unwrap();
            assert_eq!(
                bbox,
                BoundingBox {
                    left: 3,
                    right: 8,
                    top: 2,
                    bottom: 5,
                }
            );
        }
    }

    #[test]
    fn test_detection_view_without_alpha_is_plain_conversion() {
        let gray = image::GrayImage::from_pixel(3, 3, image::Luma([42]));
        let view = detection_view(&DynamicImage::ImageLuma8(gray), DetectionColorMode::White);
        assert_eq!(view.get_pixel(1, 1), &Rgb([42, 42, 42]));
    }

    #[test]
    fn test_composite_channel_extremes() {
        assert_eq!(composite_channel(10, 255, 255), 10);
        assert_eq!(composite_channel(10, 255, 0), 255);
        assert_eq!(composite_channel(0, 0, 128), 0);
    }
}
