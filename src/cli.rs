//! CLI interface module
//!
//! Provides command-line interface using clap derive macros.

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;

use crate::progress::OutputMode;
use crate::settings::CliOverrides;
use crate::trim::{AxisMode, DetectionColorMode, MAX_MARGIN_PERCENT};

/// Exit codes for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Every file trimmed
    Success = 0,
    /// Unexpected failure
    GeneralError = 1,
    /// Bad command-line arguments
    InvalidArgs = 2,
    /// No input path exists or no supported image was found
    InputNotFound = 3,
    /// At least one file failed to trim
    ProcessingError = 5,
}

impl ExitCode {
    /// Convert to process exit code
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Get human-readable description
    pub fn description(self) -> &'static str {
        match self {
            ExitCode::Success => "Success",
            ExitCode::GeneralError => "General error",
            ExitCode::InvalidArgs => "Invalid arguments",
            ExitCode::InputNotFound => "Input file or directory not found",
            ExitCode::ProcessingError => "One or more files failed to process",
        }
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code.code()
    }
}

/// Batch whitespace trimming for images
#[derive(Parser, Debug)]
#[command(name = "piccut")]
#[command(version)]
#[command(about = "Trim uniform white or black borders from images in bulk", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Trim images, writing results to a Remake/ folder next to each source
    Trim(TrimArgs),
    /// Render the detected box for one image without trimming
    Preview(PreviewArgs),
    /// Show supported formats and settings location
    Info,
}

/// Arguments for the trim command
#[derive(clap::Args, Debug)]
pub struct TrimArgs {
    /// Image files or directories (searched recursively)
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Background tone to trim
    #[arg(short, long, value_enum)]
    pub color: Option<DetectionColorMode>,

    /// Edges to trim
    #[arg(short, long, value_enum)]
    pub axis: Option<AxisMode>,

    /// Margin to re-add, percent of the original size (0-50)
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(0..=MAX_MARGIN_PERCENT as i64))]
    pub margin: Option<u32>,

    /// Do not re-add a margin
    #[arg(long, conflicts_with = "margin")]
    pub no_margin: bool,

    /// Per-channel background threshold (default 70)
    #[arg(short, long)]
    pub threshold: Option<u8>,

    /// JPEG output quality (1-100)
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub jpeg_quality: Option<u8>,

    /// Settings file (defaults to the user config directory)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Remember the modes and margin used for this run
    #[arg(long)]
    pub save_settings: bool,

    /// Verbose output (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress and summary output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl TrimArgs {
    /// Values explicitly given on the command line
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            color_mode: self.color,
            axis_mode: self.axis,
            keep_margin: self.no_margin.then_some(false),
            margin_percent: self.margin,
            threshold: self.threshold,
            jpeg_quality: self.jpeg_quality,
        }
    }

    pub fn output_mode(&self) -> OutputMode {
        if self.quiet {
            OutputMode::Quiet
        } else {
            OutputMode::from_verbosity(self.verbose)
        }
    }
}

/// Arguments for the preview command
#[derive(clap::Args, Debug)]
pub struct PreviewArgs {
    /// Image file, or a directory whose first image is used
    pub input: PathBuf,

    /// Output image (defaults to <name>_preview.png next to the source)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Background tone to trim
    #[arg(short, long, value_enum)]
    pub color: Option<DetectionColorMode>,

    /// Edges to trim
    #[arg(short, long, value_enum)]
    pub axis: Option<AxisMode>,

    /// Per-channel background threshold (default 70)
    #[arg(short, long)]
    pub threshold: Option<u8>,

    /// Settings file (defaults to the user config directory)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl PreviewArgs {
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            color_mode: self.color,
            axis_mode: self.axis,
            threshold: self.threshold,
            ..Default::default()
        }
    }
}

/// Create a progress bar for file processing
pub fn create_progress_bar(total: u64) -> ProgressBar {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
            .expect("Invalid progress bar template")
            .progress_chars("#>-"),
    );
    pb
}
