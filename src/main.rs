//! piccut - Batch whitespace trimming for images
//!
//! CLI entry point

use anyhow::Context;
use clap::Parser;
use indicatif::ProgressBar;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use piccut::{
    create_progress_bar, exit_codes, first_target, render_preview, run, BatchTracker, Cli,
    Commands, ExitCode, OutputFormat, OutputMode, PreviewArgs, Settings, SettingsError, TrimArgs,
};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Trim(args) => run_trim(&args),
        Commands::Preview(args) => run_preview(&args),
        Commands::Info => run_info(),
    };

    std::process::exit(match result {
        Ok(code) => code.code(),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            exit_codes::GENERAL_ERROR
        }
    });
}

fn init_logging(mode: OutputMode) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(mode.log_level())
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
}

/// Load settings from `--config` if given, else the default location
fn load_settings(config: Option<&Path>) -> Settings {
    let loaded = match config {
        Some(path) => Settings::load_from_path(path),
        None => Settings::load(),
    };

    match loaded {
        Ok(settings) => settings,
        Err(SettingsError::NotFound(_)) => Settings::default(),
        Err(e) => {
            warn!("Failed to load settings, using defaults: {}", e);
            Settings::default()
        }
    }
}

// ============ Trim Command ============

fn run_trim(args: &TrimArgs) -> anyhow::Result<ExitCode> {
    let output_mode = args.output_mode();
    init_logging(output_mode);

    for missing in args.inputs.iter().filter(|path| !path.exists()) {
        warn!("Input path does not exist: {}", missing.display());
    }
    if args.inputs.iter().all(|path| !path.exists()) {
        eprintln!("Error: None of the input paths exist");
        return Ok(ExitCode::InputNotFound);
    }

    let mut settings = load_settings(args.config.as_deref());
    let overrides = args.overrides();
    let options = settings.merge_with_cli(&overrides);

    let pb = if output_mode.should_show(OutputMode::Normal) {
        create_progress_bar(0)
    } else {
        ProgressBar::hidden()
    };

    let mut tracker = BatchTracker::new();
    let errors = run(
        &args.inputs,
        &options,
        |done, total| {
            tracker.update(done, total);
            pb.set_length(total as u64);
            pb.set_position(done as u64);
        },
        || false,
    )?;
    pb.finish_and_clear();

    if tracker.total == 0 {
        eprintln!("Error: No supported images found in input paths");
        return Ok(ExitCode::InputNotFound);
    }

    for error in &errors {
        eprintln!("Failed: {}", error);
    }

    if output_mode.should_show(OutputMode::Normal) {
        tracker.summary(errors.len()).print();
    }

    if args.save_settings {
        settings.apply(&overrides);
        let saved = match &args.config {
            Some(path) => settings.save_to_path(path).map(|()| path.clone()),
            None => settings.save(),
        };
        match saved {
            Ok(path) => info!("Settings saved to {}", path.display()),
            Err(e) => warn!("Failed to save settings: {}", e),
        }
    }

    Ok(if errors.is_empty() {
        ExitCode::Success
    } else {
        ExitCode::ProcessingError
    })
}

// ============ Preview Command ============

fn default_preview_path(source: &Path) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    source.with_file_name(format!("{}_preview.png", stem))
}

fn run_preview(args: &PreviewArgs) -> anyhow::Result<ExitCode> {
    init_logging(OutputMode::Normal);

    let Some(source) = first_target(std::slice::from_ref(&args.input)) else {
        eprintln!("Error: No supported image found at {}", args.input.display());
        return Ok(ExitCode::InputNotFound);
    };

    let options = load_settings(args.config.as_deref()).merge_with_cli(&args.overrides());
    let image = image::open(&source)
        .with_context(|| format!("Failed to decode {}", source.display()))?;
    let preview = render_preview(&image, &options)?;

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_preview_path(&source));
    preview
        .image
        .save(&output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!("Source:      {}", source.display());
    println!("Content box: {}", preview.bounds);
    println!("Preview:     {}", output.display());

    Ok(ExitCode::Success)
}

// ============ Info Command ============

fn run_info() -> anyhow::Result<ExitCode> {
    init_logging(OutputMode::Normal);

    println!("piccut v{}", env!("CARGO_PKG_VERSION"));
    println!();

    println!("Supported Formats:");
    for format in OutputFormat::ALL {
        let alpha = if format.supports_alpha() {
            "keeps transparency"
        } else {
            "flattened onto white"
        };
        println!(
            "  {:<6} {:<24} {}",
            format!("{:?}", format),
            format.extensions().join(", "),
            alpha
        );
    }

    println!();
    println!("Settings:");
    match Settings::default_path() {
        Some(path) => {
            let state = if path.exists() { "" } else { " (not created yet)" };
            println!("  Path: {}{}", path.display(), state);
        }
        None => println!("  Path: unavailable on this platform"),
    }

    let settings = load_settings(None);
    println!("  Color mode: {}", settings.color_mode);
    println!("  Axis mode:  {}", settings.axis_mode);
    println!("  Margin:     {}%", settings.effective_margin());

    Ok(ExitCode::Success)
}
