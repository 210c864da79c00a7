//! Whitespace Detection & Trimming module
//!
//! Detects uniform background borders around image content, crops them away
//! and optionally re-pads the result with a proportional margin.
//!
//! # Features
//!
//! - White or black background detection with a per-channel threshold
//! - Horizontal, vertical or full trimming
//! - Alpha-aware detection (transparency counts as background)
//! - Margin re-padding sized from the original image
//! - Format-aware saving (alpha kept for PNG/WebP/GIF/TIFF, flattened for JPEG/BMP)
//!
//! # Example
//!
//! ```rust,no_run
//! use piccut::{AxisMode, DetectionColorMode, TrimOptions, trim_file};
//! use std::path::Path;
//!
//! let options = TrimOptions::builder()
//!     .color_mode(DetectionColorMode::White)
//!     .axis_mode(AxisMode::Both)
//!     .margin_percent(5)
//!     .build();
//!
//! let result = trim_file(
//!     Path::new("scan.png"),
//!     Path::new("Remake/scan.png"),
//!     &options,
//! ).unwrap();
//!
//! println!("Content box: {}", result.bounds);
//! ```

// Submodules
mod compose;
mod detect;
mod preview;
mod types;

// Re-export public API
pub use compose::{add_margin, crop_to_bounds, save_image, trim_file, trim_image, TrimmedImage};
pub use detect::{detect_bounds, detection_view, has_alpha};
pub use preview::{render_preview, Preview};
pub use types::{
    AxisMode, BoundingBox, DetectionColorMode, OutputFormat, Result, TrimError, TrimResult,
};

// ============================================================
// Constants
// ============================================================

/// Default per-channel background threshold
pub const DEFAULT_THRESHOLD: u8 = 70;

/// Largest accepted margin percentage
pub const MAX_MARGIN_PERCENT: u32 = 50;

/// Default JPEG quality
const DEFAULT_JPEG_QUALITY: u8 = 75;

/// Output subdirectory created next to each source file
pub const OUTPUT_DIR_NAME: &str = "Remake";

// ============================================================
// Options
// ============================================================

/// Trimming options
#[derive(Debug, Clone, PartialEq)]
pub struct TrimOptions {
    /// Background tone to trim
    pub color_mode: DetectionColorMode,
    /// Edges to scan
    pub axis_mode: AxisMode,
    /// Margin re-added around the content, percent of the original size (0-50)
    pub margin_percent: u32,
    /// Per-channel distance from pure white/black still counted as background
    pub threshold: u8,
    /// JPEG encoder quality (1-100)
    pub jpeg_quality: u8,
}

impl Default for TrimOptions {
    fn default() -> Self {
        Self {
            color_mode: DetectionColorMode::White,
            axis_mode: AxisMode::Horizontal,
            margin_percent: 0,
            threshold: DEFAULT_THRESHOLD,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

impl TrimOptions {
    /// Create a new options builder
    pub fn builder() -> TrimOptionsBuilder {
        TrimOptionsBuilder::default()
    }

    /// Trim every edge against a black background
    pub fn for_dark_background() -> Self {
        Self {
            color_mode: DetectionColorMode::Black,
            axis_mode: AxisMode::Both,
            ..Default::default()
        }
    }

    /// Reject values the builder would have clamped
    pub fn validate(&self) -> Result<()> {
        if self.margin_percent > MAX_MARGIN_PERCENT {
            return Err(TrimError::InvalidOptions(format!(
                "margin_percent must be within 0..={}, got {}",
                MAX_MARGIN_PERCENT, self.margin_percent
            )));
        }
        if self.jpeg_quality == 0 || self.jpeg_quality > 100 {
            return Err(TrimError::InvalidOptions(format!(
                "jpeg_quality must be within 1..=100, got {}",
                self.jpeg_quality
            )));
        }
        Ok(())
    }
}

/// Builder for TrimOptions
#[derive(Debug, Default)]
pub struct TrimOptionsBuilder {
    options: TrimOptions,
}

impl TrimOptionsBuilder {
    /// Set background tone
    #[must_use]
    pub fn color_mode(mut self, mode: DetectionColorMode) -> Self {
        self.options.color_mode = mode;
        self
    }

    /// Set trimmed axes
    #[must_use]
    pub fn axis_mode(mut self, mode: AxisMode) -> Self {
        self.options.axis_mode = mode;
        self
    }

    /// Set margin percentage (clamped to 0-50)
    #[must_use]
    pub fn margin_percent(mut self, percent: u32) -> Self {
        self.options.margin_percent = percent.min(MAX_MARGIN_PERCENT);
        self
    }

    /// Set background threshold
    #[must_use]
    pub fn threshold(mut self, threshold: u8) -> Self {
        self.options.threshold = threshold;
        self
    }

    /// Set JPEG quality (clamped to 1-100)
    #[must_use]
    pub fn jpeg_quality(mut self, quality: u8) -> Self {
        self.options.jpeg_quality = quality.clamp(1, 100);
        self
    }

    /// Build the options
    #[must_use]
    pub fn build(self) -> TrimOptions {
        self.options
    }
}
