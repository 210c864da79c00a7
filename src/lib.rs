//! piccut - Batch whitespace trimming for raster images
//!
//! Removes uniform white or black borders from images and writes the results
//! to a `Remake/` folder beside each source, optionally re-padding them with a
//! margin proportional to the original size.
//!
//! # Features
//!
//! - **Trimming** ([`trim`]) - Background detection, cropping, margin re-padding and saving
//! - **Batch Runs** ([`batch`]) - Recursive input expansion with progress and cancellation
//! - **Settings** ([`settings`]) - Persisted modes and margin for front ends
//! - **Progress** ([`progress`]) - Run tracking and summaries
//! - **CLI** ([`cli`]) - Command-line interface
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use piccut::{run, AxisMode, TrimOptions};
//! use std::path::PathBuf;
//!
//! let options = TrimOptions::builder()
//!     .axis_mode(AxisMode::Both)
//!     .margin_percent(5)
//!     .build();
//!
//! let errors = run(
//!     &[PathBuf::from("scans")],
//!     &options,
//!     |done, total| println!("{done}/{total}"),
//!     || false,
//! ).unwrap();
//!
//! for error in &errors {
//!     eprintln!("{error}");
//! }
//! ```
//!
//! ## Using Builder Patterns
//!
//! ```rust
//! use piccut::{DetectionColorMode, TrimOptions};
//!
//! let options = TrimOptions::builder()
//!     .color_mode(DetectionColorMode::Black)
//!     .margin_percent(80) // clamped to 50
//!     .build();
//! assert_eq!(options.margin_percent, 50);
//!
//! // Or use presets
//! let dark = TrimOptions::for_dark_background();
//! assert_eq!(dark.color_mode, DetectionColorMode::Black);
//! ```

pub mod batch;
pub mod cli;
pub mod progress;
pub mod settings;
pub mod trim;

// Re-exports for convenience
pub use batch::{collect_targets, first_target, is_supported, output_path_for, run};
pub use cli::{create_progress_bar, Cli, Commands, ExitCode, PreviewArgs, TrimArgs};
pub use progress::{BatchTracker, OutputMode, RunSummary};
pub use settings::{CliOverrides, Settings, SettingsError, WindowGeometry};
pub use trim::{
    add_margin, crop_to_bounds, detect_bounds, detection_view, has_alpha, render_preview,
    save_image, trim_file, trim_image, AxisMode, BoundingBox, DetectionColorMode, OutputFormat,
    Preview, TrimError, TrimOptions, TrimOptionsBuilder, TrimResult, TrimmedImage,
};

/// Exit codes for CLI
pub mod exit_codes {
    use super::ExitCode;

    pub const SUCCESS: i32 = ExitCode::Success as i32;
    pub const GENERAL_ERROR: i32 = ExitCode::GeneralError as i32;
    pub const INVALID_ARGS: i32 = ExitCode::InvalidArgs as i32;
    pub const INPUT_NOT_FOUND: i32 = ExitCode::InputNotFound as i32;
    pub const PROCESSING_ERROR: i32 = ExitCode::ProcessingError as i32;
}
