//! Batch processing module
//!
//! Expands input paths into image targets and trims them one after another,
//! writing each result to a `Remake/` directory next to its source.
//!
//! # Example
//!
//! ```rust,no_run
//! use piccut::{run, AxisMode, TrimOptions};
//! use std::path::PathBuf;
//!
//! let options = TrimOptions::builder().axis_mode(AxisMode::Both).build();
//! let inputs = vec![PathBuf::from("scans")];
//!
//! let errors = run(
//!     &inputs,
//!     &options,
//!     |done, total| println!("{}/{}", done, total),
//!     || false,
//! ).unwrap();
//!
//! for error in &errors {
//!     eprintln!("{}", error);
//! }
//! ```

use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

use crate::trim::{trim_file, OutputFormat, Result, TrimOptions, OUTPUT_DIR_NAME};

/// Whether the path has a supported image extension (case-insensitive)
pub fn is_supported(path: &Path) -> bool {
    OutputFormat::from_path(path).is_some()
}

/// Output location for a source file: `<source dir>/Remake/<file name>`
pub fn output_path_for(source: &Path) -> PathBuf {
    let parent = source.parent().unwrap_or_else(|| Path::new(""));
    match source.file_name() {
        Some(name) => parent.join(OUTPUT_DIR_NAME).join(name),
        None => parent.join(OUTPUT_DIR_NAME),
    }
}

/// Files before directories, then by name
fn walk_order(a: &DirEntry, b: &DirEntry) -> Ordering {
    a.file_type()
        .is_dir()
        .cmp(&b.file_type().is_dir())
        .then_with(|| a.file_name().cmp(b.file_name()))
}

/// Supported files under a directory, depth-first
///
/// Unreadable entries are skipped.
fn collect_dir(dir: &Path) -> impl Iterator<Item = PathBuf> {
    WalkDir::new(dir)
        .sort_by(walk_order)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Skipping unreadable path: {}", e);
                None
            }
        })
        .map(DirEntry::into_path)
        .filter(|path| path.is_file() && is_supported(path))
}

/// Expand input paths into the ordered list of files to process
///
/// Directories are walked recursively; supported files are taken as-is.
/// Anything else, including paths that do not exist, is skipped.
pub fn collect_targets(inputs: &[PathBuf]) -> Vec<PathBuf> {
    let mut targets = Vec::new();

    for input in inputs {
        if input.is_dir() {
            targets.extend(collect_dir(input));
        } else if input.is_file() && is_supported(input) {
            targets.push(input.clone());
        } else {
            debug!("Skipping input: {}", input.display());
        }
    }

    targets
}

/// First file `collect_targets` would yield, for previews
pub fn first_target(inputs: &[PathBuf]) -> Option<PathBuf> {
    inputs.iter().find_map(|input| {
        if input.is_dir() {
            collect_dir(input).next()
        } else if input.is_file() && is_supported(input) {
            Some(input.clone())
        } else {
            None
        }
    })
}

/// Trim every supported image under `inputs`
///
/// Reports `(0, total)` before the first file and `(done, total)` after
/// each one. `is_cancelled` is polled before each file; once it returns
/// true the run stops and the errors gathered so far are returned.
///
/// Per-file failures never abort the run. They are returned as
/// `"<source path>: <description>"` strings; an empty list means every
/// processed file succeeded. Only invalid options fail the whole call.
pub fn run<P, C>(
    inputs: &[PathBuf],
    options: &TrimOptions,
    mut on_progress: P,
    is_cancelled: C,
) -> Result<Vec<String>>
where
    P: FnMut(usize, usize),
    C: Fn() -> bool,
{
    options.validate()?;

    let targets = collect_targets(inputs);
    let total = targets.len();
    info!(
        "Trimming {} file(s) ({}, {}, margin {}%)",
        total, options.color_mode, options.axis_mode, options.margin_percent
    );
    on_progress(0, total);

    let mut errors = Vec::new();
    for (index, source) in targets.iter().enumerate() {
        if is_cancelled() {
            info!("Cancelled after {}/{} file(s)", index, total);
            break;
        }

        let output = output_path_for(source);
        if let Err(e) = trim_file(source, &output, options) {
            warn!("Failed to trim {}: {}", source.display(), e);
            errors.push(format!("{}: {}", source.display(), e));
        }

        on_progress(index + 1, total);
    }

    Ok(errors)
}
