//! Detection preview
//!
//! Renders the detection view with the detected content box outlined, so a
//! caller can show what a trim would keep before running a batch.

use image::{DynamicImage, Rgb, RgbImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;

use super::detect::{detect_bounds, detection_view};
use super::types::{BoundingBox, Result};
use super::TrimOptions;

/// Outline colour
const OUTLINE_COLOR: Rgb<u8> = Rgb([255, 64, 64]);

/// Outline stroke width in pixels
const OUTLINE_WIDTH: u32 = 3;

/// Dash length in pixels
const DASH_LENGTH: u32 = 12;

/// Gap between dashes in pixels
const DASH_GAP: u32 = 6;

/// Rendered preview
#[derive(Debug, Clone)]
pub struct Preview {
    /// Detection view with the outline drawn on it
    pub image: RgbImage,
    /// Box the outline traces
    pub bounds: BoundingBox,
}

/// Render the detection view of `image` with the detected box outlined
pub fn render_preview(image: &DynamicImage, options: &TrimOptions) -> Result<Preview> {
    let mut view = detection_view(image, options.color_mode);
    let bounds = detect_bounds(
        &view,
        options.color_mode,
        options.axis_mode,
        options.threshold,
    )?;

    draw_dashed_outline(&mut view, &bounds);

    Ok(Preview {
        image: view,
        bounds,
    })
}

/// Start offset and length of each dash along an edge
fn dashes(length: u32) -> impl Iterator<Item = (u32, u32)> {
    (0..length)
        .step_by((DASH_LENGTH + DASH_GAP) as usize)
        .map(move |start| (start, DASH_LENGTH.min(length - start)))
}

/// Stroke the inside of `bounds` with a dashed line
fn draw_dashed_outline(canvas: &mut RgbImage, bounds: &BoundingBox) {
    let stroke_x = OUTLINE_WIDTH.min(bounds.width());
    let stroke_y = OUTLINE_WIDTH.min(bounds.height());

    for (start, len) in dashes(bounds.width()) {
        let x = (bounds.left + start) as i32;
        let top = Rect::at(x, bounds.top as i32).of_size(len, stroke_y);
        let bottom = Rect::at(x, (bounds.bottom - stroke_y) as i32).of_size(len, stroke_y);
        draw_filled_rect_mut(canvas, top, OUTLINE_COLOR);
        draw_filled_rect_mut(canvas, bottom, OUTLINE_COLOR);
    }

    for (start, len) in dashes(bounds.height()) {
        let y = (bounds.top + start) as i32;
        let left = Rect::at(bounds.left as i32, y).of_size(stroke_x, len);
        let right = Rect::at((bounds.right - stroke_x) as i32, y).of_size(stroke_x, len);
        draw_filled_rect_mut(canvas, left, OUTLINE_COLOR);
        draw_filled_rect_mut(canvas, right, OUTLINE_COLOR);
    }
}
