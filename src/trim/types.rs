//! Common types for the trim module

use image::{ColorType, ImageFormat};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Trim error types
#[derive(Debug, Error)]
pub enum TrimError {
    #[error("Image not found: {0}")]
    ImageNotFound(PathBuf),

    #[error("Invalid image: {0}")]
    InvalidImage(String),

    #[error("Image has zero width or height")]
    EmptyImage,

    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),

    #[error("Failed to encode output: {0}")]
    EncodeFailed(String),

    #[error("Invalid options: {0}")]
    InvalidOptions(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TrimError>;

/// Background tone treated as empty space
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum DetectionColorMode {
    /// Near-white borders
    #[default]
    White,
    /// Near-black borders
    Black,
}

impl DetectionColorMode {
    /// Opaque fill used when flattening transparency for detection
    pub fn fill_rgb(self) -> [u8; 3] {
        match self {
            DetectionColorMode::White => [255, 255, 255],
            DetectionColorMode::Black => [0, 0, 0],
        }
    }

    /// Whether an RGB triple counts as background under this mode
    #[inline]
    pub fn is_background(self, rgb: [u8; 3], threshold: u8) -> bool {
        match self {
            DetectionColorMode::White => {
                let floor = 255 - threshold;
                rgb.iter().all(|&c| c >= floor)
            }
            DetectionColorMode::Black => rgb.iter().all(|&c| c <= threshold),
        }
    }
}

impl fmt::Display for DetectionColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetectionColorMode::White => write!(f, "white"),
            DetectionColorMode::Black => write!(f, "black"),
        }
    }
}

/// Which edges are scanned and trimmed
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum AxisMode {
    /// Left and right edges
    #[default]
    Horizontal,
    /// Top and bottom edges
    Vertical,
    /// All four edges
    Both,
}

impl AxisMode {
    pub fn trims_columns(self) -> bool {
        matches!(self, AxisMode::Horizontal | AxisMode::Both)
    }

    pub fn trims_rows(self) -> bool {
        matches!(self, AxisMode::Vertical | AxisMode::Both)
    }
}

impl fmt::Display for AxisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AxisMode::Horizontal => write!(f, "horizontal"),
            AxisMode::Vertical => write!(f, "vertical"),
            AxisMode::Both => write!(f, "both"),
        }
    }
}

/// Detected content box, half-open on right/bottom
///
/// Always satisfies `left < right <= width` and `top < bottom <= height`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl BoundingBox {
    /// Box covering a whole `width` x `height` image
    pub fn full(width: u32, height: u32) -> Self {
        Self {
            left: 0,
            right: width,
            top: 0,
            bottom: height,
        }
    }

    pub fn width(&self) -> u32 {
        self.right - self.left
    }

    pub fn height(&self) -> u32 {
        self.bottom - self.top
    }

    /// True when the box spans the whole image
    pub fn is_full(&self, width: u32, height: u32) -> bool {
        *self == Self::full(width, height)
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}..{}, {}..{}] ({}x{})",
            self.left,
            self.right,
            self.top,
            self.bottom,
            self.width(),
            self.height()
        )
    }
}

/// Output encodings, keyed by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Jpeg,
    Bmp,
    Gif,
    Tiff,
    WebP,
}

impl OutputFormat {
    /// Every format the batch runner accepts
    pub const ALL: [OutputFormat; 6] = [
        OutputFormat::Png,
        OutputFormat::Jpeg,
        OutputFormat::Bmp,
        OutputFormat::Gif,
        OutputFormat::Tiff,
        OutputFormat::WebP,
    ];

    /// Resolve from a bare extension (no dot), case-insensitive
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(OutputFormat::Png),
            "jpg" | "jpeg" => Some(OutputFormat::Jpeg),
            "bmp" => Some(OutputFormat::Bmp),
            "gif" => Some(OutputFormat::Gif),
            "tiff" => Some(OutputFormat::Tiff),
            "webp" => Some(OutputFormat::WebP),
            _ => None,
        }
    }

    /// Resolve from a path's extension
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// Extensions mapped to this format
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            OutputFormat::Png => &["png"],
            OutputFormat::Jpeg => &["jpg", "jpeg"],
            OutputFormat::Bmp => &["bmp"],
            OutputFormat::Gif => &["gif"],
            OutputFormat::Tiff => &["tiff"],
            OutputFormat::WebP => &["webp"],
        }
    }

    /// Whether the encoding can carry transparency
    pub fn supports_alpha(self) -> bool {
        !matches!(self, OutputFormat::Jpeg | OutputFormat::Bmp)
    }

    /// Whether the encoder takes this pixel layout without conversion
    pub fn accepts(self, color: ColorType) -> bool {
        use ColorType::*;
        match self {
            OutputFormat::Png => matches!(color, L8 | La8 | Rgb8 | Rgba8 | L16 | La16 | Rgb16 | Rgba16),
            OutputFormat::Jpeg | OutputFormat::Bmp => matches!(color, L8 | Rgb8),
            OutputFormat::Gif | OutputFormat::WebP => matches!(color, Rgb8 | Rgba8),
            OutputFormat::Tiff => matches!(color, L8 | L16 | Rgb8 | Rgb16 | Rgba8 | Rgba16),
        }
    }

    pub fn image_format(self) -> ImageFormat {
        match self {
            OutputFormat::Png => ImageFormat::Png,
            OutputFormat::Jpeg => ImageFormat::Jpeg,
            OutputFormat::Bmp => ImageFormat::Bmp,
            OutputFormat::Gif => ImageFormat::Gif,
            OutputFormat::Tiff => ImageFormat::Tiff,
            OutputFormat::WebP => ImageFormat::WebP,
        }
    }
}

/// Result of trimming a single file
#[derive(Debug, Clone)]
pub struct TrimResult {
    /// Source image path
    pub input_path: PathBuf,
    /// Written output path
    pub output_path: PathBuf,
    /// Source dimensions
    pub original_size: (u32, u32),
    /// Detected content box on the source
    pub bounds: BoundingBox,
    /// Dimensions of the written image
    pub final_size: (u32, u32),
}
