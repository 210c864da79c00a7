//! Persisted settings for piccut front ends
//!
//! A small JSON document remembering the last-used detection modes, margin
//! and window geometry. The trimming core never reads it; front ends load it
//! at startup, merge command-line overrides on top and save it back.
//!
//! Search order for [`Settings::load`]:
//! 1. `~/.config/piccut/config.json` (platform config dir)
//! 2. Default values
//!
//! # Example Settings
//!
//! ```json
//! {
//!   "color_mode": "white",
//!   "axis_mode": "both",
//!   "keep_margin": true,
//!   "margin_percent": 5
//! }
//! ```
//!
//! Missing fields fall back to their defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::trim::{AxisMode, DetectionColorMode, TrimOptions, MAX_MARGIN_PERCENT};

/// Application directory name under the platform config dir
const APP_DIR_NAME: &str = "piccut";

/// Settings file name
const SETTINGS_FILE_NAME: &str = "config.json";

/// Default margin percentage when margins are enabled
const DEFAULT_MARGIN_PERCENT: u32 = 5;

/// Settings file errors
#[derive(Debug, Error)]
pub enum SettingsError {
    /// IO error reading or writing the settings file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parse/serialize error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// File not found
    #[error("Settings file not found: {0}")]
    NotFound(PathBuf),
}

/// Last window placement, owned by GUI front ends
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowGeometry {
    /// Left position, -1 for "let the window manager decide"
    pub x: i32,
    /// Top position, -1 for "let the window manager decide"
    pub y: i32,
    pub width: u32,
    pub height: u32,
    pub maximized: bool,
}

impl Default for WindowGeometry {
    fn default() -> Self {
        Self {
            x: -1,
            y: -1,
            width: 1000,
            height: 660,
            maximized: false,
        }
    }
}

/// Persisted settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Background tone to trim
    pub color_mode: DetectionColorMode,

    /// Edges to trim
    pub axis_mode: AxisMode,

    /// Whether a margin is re-added after trimming
    pub keep_margin: bool,

    /// Margin percentage used when `keep_margin` is set
    pub margin_percent: u32,

    /// Window placement
    pub window: WindowGeometry,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color_mode: DetectionColorMode::White,
            axis_mode: AxisMode::Horizontal,
            keep_margin: true,
            margin_percent: DEFAULT_MARGIN_PERCENT,
            window: WindowGeometry::default(),
        }
    }
}

/// Values given on the command line, overriding stored settings
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub color_mode: Option<DetectionColorMode>,
    pub axis_mode: Option<AxisMode>,
    /// `Some(false)` disables the margin regardless of the stored flag
    pub keep_margin: Option<bool>,
    pub margin_percent: Option<u32>,
    pub threshold: Option<u8>,
    pub jpeg_quality: Option<u8>,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Settings {
    /// Default settings file location
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(SETTINGS_FILE_NAME))
    }

    /// Load settings from the default location, or defaults if there is none
    pub fn load() -> Result<Self, SettingsError> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from_path(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load settings from a specific file
    pub fn load_from_path(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            return Err(SettingsError::NotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse settings from a JSON string
    pub fn from_json(content: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Serialize settings to pretty-printed JSON
    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Save settings to the default location
    pub fn save(&self) -> Result<PathBuf, SettingsError> {
        let path = Self::default_path().ok_or_else(|| {
            SettingsError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "no config directory on this platform",
            ))
        })?;
        self.save_to_path(&path)?;
        Ok(path)
    }

    /// Save settings to a specific file, creating its directory if needed
    pub fn save_to_path(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Margin to apply: the stored percentage when enabled, else 0
    pub fn effective_margin(&self) -> u32 {
        if self.keep_margin {
            self.margin_percent.min(MAX_MARGIN_PERCENT)
        } else {
            0
        }
    }

    /// Record overrides so they are remembered next time
    pub fn apply(&mut self, overrides: &CliOverrides) {
        if let Some(mode) = overrides.color_mode {
            self.color_mode = mode;
        }
        if let Some(mode) = overrides.axis_mode {
            self.axis_mode = mode;
        }
        if let Some(keep) = overrides.keep_margin {
            self.keep_margin = keep;
        }
        if let Some(percent) = overrides.margin_percent {
            self.margin_percent = percent.min(MAX_MARGIN_PERCENT);
            if overrides.keep_margin.is_none() {
                self.keep_margin = true;
            }
        }
    }

    /// Build trim options from these settings with CLI values taking precedence
    pub fn merge_with_cli(&self, overrides: &CliOverrides) -> TrimOptions {
        let mut merged = self.clone();
        merged.apply(overrides);

        let mut builder = TrimOptions::builder()
            .color_mode(merged.color_mode)
            .axis_mode(merged.axis_mode)
            .margin_percent(merged.effective_margin());

        if let Some(threshold) = overrides.threshold {
            builder = builder.threshold(threshold);
        }
        if let Some(quality) = overrides.jpeg_quality {
            builder = builder.jpeg_quality(quality);
        }

        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.color_mode, DetectionColorMode::White);
        assert_eq!(settings.axis_mode, AxisMode::Horizontal);
        assert!(settings.keep_margin);
        assert_eq!(settings.margin_percent, 5);
        assert_eq!(settings.window.width, 1000);
        assert_eq!(settings.window.height, 660);
        assert_eq!(settings.window.x, -1);
        assert!(!settings.window.maximized);
    }

    #[test]
    fn test_partial_document_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "axis_mode": "both", "window": { "width": 1200 } }"#)
            .unwrap();

        assert_eq!(settings.axis_mode, AxisMode::Both);
        assert_eq!(settings.color_mode, DetectionColorMode::White);
        assert_eq!(settings.margin_percent, 5);
        assert_eq!(settings.window.width, 1200);
        assert_eq!(settings.window.height, 660);
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let settings = Settings::from_json(r#"{ "color_mode": "black", "theme": "dark" }"#).unwrap();
        assert_eq!(settings.color_mode, DetectionColorMode::Black);
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            Settings::from_json("{ not json"),
            Err(SettingsError::Json(_))
        ));
        assert!(matches!(
            Settings::from_json(r#"{ "axis_mode": "diagonal" }"#),
            Err(SettingsError::Json(_))
        ));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let settings = Settings {
            color_mode: DetectionColorMode::Black,
            axis_mode: AxisMode::Vertical,
            keep_margin: false,
            margin_percent: 12,
            window: WindowGeometry {
                x: 40,
                y: 80,
                maximized: true,
                ..Default::default()
            },
        };
        settings.save_to_path(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"black\""));
        assert!(content.contains("\"vertical\""));

        let loaded = Settings::load_from_path(&path).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_load_missing_file() {
        let result = Settings::load_from_path(Path::new("/nonexistent/piccut.json"));
        assert!(matches!(result, Err(SettingsError::NotFound(_))));
    }

    #[test]
    fn test_effective_margin() {
        let mut settings = Settings::default();
        assert_eq!(settings.effective_margin(), 5);

        settings.keep_margin = false;
        assert_eq!(settings.effective_margin(), 0);

        settings.keep_margin = true;
        settings.margin_percent = 90;
        assert_eq!(settings.effective_margin(), 50);
    }

    #[test]
    fn test_merge_without_overrides_uses_settings() {
        let settings = Settings {
            axis_mode: AxisMode::Both,
            margin_percent: 8,
            ..Default::default()
        };

        let options = settings.merge_with_cli(&CliOverrides::new());
        assert_eq!(options.axis_mode, AxisMode::Both);
        assert_eq!(options.color_mode, DetectionColorMode::White);
        assert_eq!(options.margin_percent, 8);
        assert_eq!(options.threshold, 70);
    }

    #[test]
    fn test_merge_cli_takes_precedence() {
        let settings = Settings {
            keep_margin: false,
            ..Default::default()
        };
        let overrides = CliOverrides {
            color_mode: Some(DetectionColorMode::Black),
            margin_percent: Some(20),
            threshold: Some(30),
            jpeg_quality: Some(95),
            ..Default::default()
        };

        let options = settings.merge_with_cli(&overrides);
        assert_eq!(options.color_mode, DetectionColorMode::Black);
        // an explicit margin re-enables margins
        assert_eq!(options.margin_percent, 20);
        assert_eq!(options.threshold, 30);
        assert_eq!(options.jpeg_quality, 95);
    }

    #[test]
    fn test_merge_no_margin_wins() {
        let overrides = CliOverrides {
            keep_margin: Some(false),
            margin_percent: Some(20),
            ..Default::default()
        };

        let options = Settings::default().merge_with_cli(&overrides);
        assert_eq!(options.margin_percent, 0);
    }

    #[test]
    fn test_apply_records_overrides() {
        let mut settings = Settings::default();
        settings.apply(&CliOverrides {
            axis_mode: Some(AxisMode::Vertical),
            margin_percent: Some(70),
            ..Default::default()
        });

        assert_eq!(settings.axis_mode, AxisMode::Vertical);
        assert_eq!(settings.margin_percent, 50);
        assert!(settings.keep_margin);
    }
}
