// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[viewer]` - Pan behavior of the lightbox
//! - `[gallery]` - Removal confirmation
//! - `[watermark]` - Default watermark inputs, base image and drag behavior
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. Set `GALLERY_STUDIO_CONFIG_DIR` environment variable
//! 3. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use gallery_studio::config::{self, Config};
//!
//! // Load existing configuration (returns tuple with optional warning)
//! let (mut config, _warning) = config::load();
//!
//! // Modify a setting
//! config.watermark.font_size_px = Some(32.0);
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::domain::editing::WatermarkStyle;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";

// =============================================================================
// Enums (shared between sections)
// =============================================================================

/// Which image a watermark is composited onto.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum WatermarkBase {
    /// The latest committed bytes, keeping earlier crops and watermarks.
    #[default]
    Current,
    /// The pristine ingested bytes, falling back to the current ones.
    Original,
}

// =============================================================================
// Section Structs
// =============================================================================

/// Lightbox viewer settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ViewerConfig {
    /// Maximum absolute pan offset in pixels. Unset means unbounded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pan_limit_px: Option<f32>,
}

/// Gallery list settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GalleryConfig {
    /// Ask before removing images.
    #[serde(default = "default_confirm_removals")]
    pub confirm_removals: bool,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            confirm_removals: default_confirm_removals(),
        }
    }
}

/// Watermark tool settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WatermarkConfig {
    /// Style preselected when the tool opens.
    #[serde(default)]
    pub style: WatermarkStyle,

    /// CSS color preselected when the tool opens.
    #[serde(
        default = "default_watermark_color",
        skip_serializing_if = "Option::is_none"
    )]
    pub color: Option<String>,

    /// Font size preselected when the tool opens, in display pixels.
    #[serde(
        default = "default_watermark_font_size",
        skip_serializing_if = "Option::is_none"
    )]
    pub font_size_px: Option<f32>,

    /// Image the watermark is composited onto.
    #[serde(default)]
    pub base: WatermarkBase,

    /// Keep the dragged watermark inside the displayed image.
    #[serde(default)]
    pub clamp_drag: bool,

    /// Font file used to rasterize the text. Unset means system lookup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_path: Option<PathBuf>,
}

impl Default for WatermarkConfig {
    fn default() -> Self {
        Self {
            style: WatermarkStyle::default(),
            color: default_watermark_color(),
            font_size_px: default_watermark_font_size(),
            base: WatermarkBase::default(),
            clamp_drag: false,
            font_path: None,
        }
    }
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

/// Application configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    /// Lightbox viewer settings.
    #[serde(default)]
    pub viewer: ViewerConfig,

    /// Gallery list settings.
    #[serde(default)]
    pub gallery: GalleryConfig,

    /// Watermark tool settings.
    #[serde(default)]
    pub watermark: WatermarkConfig,
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_confirm_removals() -> bool {
    true
}

fn default_watermark_color() -> Option<String> {
    Some(DEFAULT_WATERMARK_COLOR.to_string())
}

fn default_watermark_font_size() -> Option<f32> {
    Some(DEFAULT_WATERMARK_FONT_SIZE_PX)
}

// =============================================================================
// Config Path Resolution
// =============================================================================

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with a warning key explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    log::warn!("Ignoring unreadable config {}: {}", path.display(), err);
                    return (
                        Config::default(),
                        Some("notification-config-load-error".to_string()),
                    );
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves the configuration to the default path.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_settings() {
        let config = Config {
            viewer: ViewerConfig {
                pan_limit_px: Some(400.0),
            },
            gallery: GalleryConfig {
                confirm_removals: false,
            },
            watermark: WatermarkConfig {
                style: WatermarkStyle::Outline,
                color: Some("#ff0000".to_string()),
                font_size_px: Some(48.0),
                base: WatermarkBase::Original,
                clamp_drag: true,
                font_path: Some(PathBuf::from("/tmp/font.ttf")),
            },
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn load_from_path_invalid_toml_errors() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        match load_from_path(&config_path) {
            Err(Error::Config(_)) => {}
            other => panic!("expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn load_with_override_falls_back_to_default_with_warning() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        fs::write(temp_dir.path().join(CONFIG_FILE), "[watermark]\nstyle = 42\n")
            .expect("failed to write config");

        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));

        assert_eq!(config, Config::default());
        assert_eq!(warning.as_deref(), Some("notification-config-load-error"));
    }

    #[test]
    fn missing_sections_use_defaults() {
        let config: Config =
            toml::from_str("[watermark]\nstyle = \"shadow\"\n").expect("valid toml");

        assert_eq!(config.watermark.style, WatermarkStyle::Shadow);
        assert_eq!(
            config.watermark.font_size_px,
            Some(DEFAULT_WATERMARK_FONT_SIZE_PX)
        );
        assert!(config.gallery.confirm_removals);
        assert!(config.viewer.pan_limit_px.is_none());
        assert_eq!(config.watermark.base, WatermarkBase::Current);
    }

    #[test]
    fn save_to_path_creates_parent_directories() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("deep").join("path").join("settings.toml");

        save_to_path(&Config::default(), &config_path).expect("save should create directories");
        assert!(config_path.exists());
    }
}
