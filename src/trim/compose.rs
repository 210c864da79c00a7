//! Cropping, margin re-padding and format-aware saving

use image::codecs::jpeg::JpegEncoder;
use image::{imageops, DynamicImage, Rgb, RgbImage, Rgba, RgbaImage};
use std::borrow::Cow;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tracing::debug;

use super::detect::{detect_bounds, detection_view, has_alpha};
use super::types::{
    BoundingBox, DetectionColorMode, OutputFormat, Result, TrimError, TrimResult,
};
use super::TrimOptions;

/// Opaque fill for margins around images without alpha
const OPAQUE_MARGIN_FILL: Rgb<u8> = Rgb([255, 255, 255]);

/// Fill for margins around images with alpha
const TRANSPARENT_MARGIN_FILL: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// In-memory trim output
#[derive(Debug, Clone)]
pub struct TrimmedImage {
    /// Cropped (and possibly padded) image
    pub image: DynamicImage,
    /// Content box detected on the source
    pub bounds: BoundingBox,
    /// Source dimensions
    pub original_size: (u32, u32),
}

/// Crop to a detected box, keeping the source pixel type
pub fn crop_to_bounds(image: &DynamicImage, bounds: &BoundingBox) -> DynamicImage {
    image.crop_imm(bounds.left, bounds.top, bounds.width(), bounds.height())
}

/// Pad a cropped image with a margin sized from the original dimensions
///
/// Margins are `floor(W * p / 100)` horizontally and `floor(H * p / 100)`
/// vertically on every side. Images with alpha get a transparent canvas,
/// everything else an opaque white one.
pub fn add_margin(
    cropped: DynamicImage,
    original_size: (u32, u32),
    margin_percent: u32,
) -> DynamicImage {
    if margin_percent == 0 {
        return cropped;
    }

    let (orig_w, orig_h) = original_size;
    let margin_x = (orig_w as u64 * margin_percent as u64 / 100) as u32;
    let margin_y = (orig_h as u64 * margin_percent as u64 / 100) as u32;
    let width = cropped.width() + 2 * margin_x;
    let height = cropped.height() + 2 * margin_y;

    if has_alpha(&cropped) {
        // Canvas is fully transparent, so compositing reduces to a copy
        let mut canvas = RgbaImage::from_pixel(width, height, TRANSPARENT_MARGIN_FILL);
        imageops::replace(
            &mut canvas,
            &cropped.to_rgba8(),
            margin_x as i64,
            margin_y as i64,
        );
        DynamicImage::ImageRgba8(canvas)
    } else {
        let mut canvas = RgbImage::from_pixel(width, height, OPAQUE_MARGIN_FILL);
        imageops::replace(
            &mut canvas,
            &cropped.to_rgb8(),
            margin_x as i64,
            margin_y as i64,
        );
        DynamicImage::ImageRgb8(canvas)
    }
}

/// Detect, crop and pad an in-memory image
pub fn trim_image(image: &DynamicImage, options: &TrimOptions) -> Result<TrimmedImage> {
    options.validate()?;

    let original_size = (image.width(), image.height());
    let view = detection_view(image, options.color_mode);
    let bounds = detect_bounds(
        &view,
        options.color_mode,
        options.axis_mode,
        options.threshold,
    )?;

    let cropped = crop_to_bounds(image, &bounds);
    let image = add_margin(cropped, original_size, options.margin_percent);

    Ok(TrimmedImage {
        image,
        bounds,
        original_size,
    })
}

/// Composite transparency onto opaque white and drop the alpha channel
fn flatten_onto_white(image: &DynamicImage) -> RgbImage {
    detection_view(image, DetectionColorMode::White)
}

/// Convert an image into a pixel layout the target encoder accepts
///
/// Formats without alpha flatten transparency onto white; formats with
/// alpha keep it.
fn prepare_for_format(image: &DynamicImage, format: OutputFormat) -> Cow<'_, DynamicImage> {
    if !format.supports_alpha() && has_alpha(image) {
        return Cow::Owned(DynamicImage::ImageRgb8(flatten_onto_white(image)));
    }
    if format.accepts(image.color()) {
        return Cow::Borrowed(image);
    }
    if has_alpha(image) {
        Cow::Owned(DynamicImage::ImageRgba8(image.to_rgba8()))
    } else {
        Cow::Owned(DynamicImage::ImageRgb8(image.to_rgb8()))
    }
}

/// Save an image, picking the encoding from the path extension
pub fn save_image(image: &DynamicImage, path: &Path, jpeg_quality: u8) -> Result<()> {
    let format = OutputFormat::from_path(path)
        .ok_or_else(|| TrimError::UnsupportedFormat(path.display().to_string()))?;
    let prepared = prepare_for_format(image, format);

    match format {
        OutputFormat::Jpeg => {
            let writer = BufWriter::new(File::create(path)?);
            let encoder = JpegEncoder::new_with_quality(writer, jpeg_quality);
            prepared
                .write_with_encoder(encoder)
                .map_err(|e| TrimError::EncodeFailed(e.to_string()))?;
        }
        _ => {
            prepared
                .save_with_format(path, format.image_format())
                .map_err(|e| TrimError::EncodeFailed(e.to_string()))?;
        }
    }

    Ok(())
}

/// Trim an image file and write the result to `output_path`
///
/// The output directory is created when missing. The source file is only read.
pub fn trim_file(input_path: &Path, output_path: &Path, options: &TrimOptions) -> Result<TrimResult> {
    if !input_path.exists() {
        return Err(TrimError::ImageNotFound(input_path.to_path_buf()));
    }
    if OutputFormat::from_path(output_path).is_none() {
        return Err(TrimError::UnsupportedFormat(
            output_path.display().to_string(),
        ));
    }

    let image = image::open(input_path).map_err(|e| TrimError::InvalidImage(e.to_string()))?;
    let trimmed = trim_image(&image, options)?;

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    save_image(&trimmed.image, output_path, options.jpeg_quality)?;

    debug!(
        "Trimmed {} -> {} ({}x{} -> {}x{})",
        input_path.display(),
        output_path.display(),
        trimmed.original_size.0,
        trimmed.original_size.1,
        trimmed.image.width(),
        trimmed.image.height()
    );

    Ok(TrimResult {
        input_path: input_path.to_path_buf(),
        output_path: output_path.to_path_buf(),
        original_size: trimmed.original_size,
        bounds: trimmed.bounds,
        final_size: (trimmed.image.width(), trimmed.image.height()),
    })
}
