// SPDX-License-Identifier: MPL-2.0
//! Non-destructive filter values attached to every image record.

use crate::config::{BLUR_PRESET_RADIUS_PX, NEUTRAL_FILTER_PERCENT};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Single-effect preset layered after the numeric adjustments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterPreset {
    #[default]
    None,
    Grayscale,
    Sepia,
    Invert,
    Blur,
}

impl FilterPreset {
    pub const ALL: [FilterPreset; 5] = [
        FilterPreset::None,
        FilterPreset::Grayscale,
        FilterPreset::Sepia,
        FilterPreset::Invert,
        FilterPreset::Blur,
    ];

    /// CSS filter function for the preset, or `None` for no preset.
    #[must_use]
    pub fn css_function(self) -> Option<String> {
        match self {
            FilterPreset::None => None,
            FilterPreset::Grayscale => Some("grayscale(100%)".to_string()),
            FilterPreset::Sepia => Some("sepia(100%)".to_string()),
            FilterPreset::Invert => Some("invert(100%)".to_string()),
            FilterPreset::Blur => Some(format!("blur({}px)", BLUR_PRESET_RADIUS_PX)),
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            FilterPreset::None => "none",
            FilterPreset::Grayscale => "grayscale",
            FilterPreset::Sepia => "sepia",
            FilterPreset::Invert => "invert",
            FilterPreset::Blur => "blur",
        }
    }
}

impl fmt::Display for FilterPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        FilterPreset::ALL
            .into_iter()
            .find(|preset| preset.as_str() == wanted)
            .ok_or_else(|| format!("unknown filter preset {:?}", s))
    }
}

/// Names of the editable filter parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterParameter {
    Brightness,
    Contrast,
    Saturation,
    Preset,
}

impl FromStr for FilterParameter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "brightness" => Ok(FilterParameter::Brightness),
            "contrast" => Ok(FilterParameter::Contrast),
            "saturation" | "saturate" => Ok(FilterParameter::Saturation),
            "preset" | "filter" => Ok(FilterParameter::Preset),
            _ => Err(format!("unknown filter parameter {:?}", s)),
        }
    }
}

/// A new value for one filter parameter.
///
/// Numeric values are percentages and are stored as given, without clamping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilterChange {
    Brightness(f32),
    Contrast(f32),
    Saturation(f32),
    Preset(FilterPreset),
}

impl FilterChange {
    #[must_use]
    pub fn parameter(self) -> FilterParameter {
        match self {
            FilterChange::Brightness(_) => FilterParameter::Brightness,
            FilterChange::Contrast(_) => FilterParameter::Contrast,
            FilterChange::Saturation(_) => FilterParameter::Saturation,
            FilterChange::Preset(_) => FilterParameter::Preset,
        }
    }
}

/// Per-image filter adjustments.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Filters {
    pub brightness: f32,
    pub contrast: f32,
    pub saturation: f32,
    pub preset: FilterPreset,
}

impl Default for Filters {
    fn default() -> Self {
        Self {
            brightness: NEUTRAL_FILTER_PERCENT,
            contrast: NEUTRAL_FILTER_PERCENT,
            saturation: NEUTRAL_FILTER_PERCENT,
            preset: FilterPreset::None,
        }
    }
}

impl Filters {
    /// Returns a copy with one parameter replaced.
    #[must_use]
    pub fn with(mut self, change: FilterChange) -> Self {
        match change {
            FilterChange::Brightness(value) => self.brightness = value,
            FilterChange::Contrast(value) => self.contrast = value,
            FilterChange::Saturation(value) => self.saturation = value,
            FilterChange::Preset(preset) => self.preset = preset,
        }
        self
    }

    /// Returns a copy with one parameter put back to its neutral value.
    #[must_use]
    pub fn reset(self, parameter: FilterParameter) -> Self {
        let neutral = Filters::default();
        let change = match parameter {
            FilterParameter::Brightness => FilterChange::Brightness(neutral.brightness),
            FilterParameter::Contrast => FilterChange::Contrast(neutral.contrast),
            FilterParameter::Saturation => FilterChange::Saturation(neutral.saturation),
            FilterParameter::Preset => FilterChange::Preset(neutral.preset),
        };
        self.with(change)
    }

    /// True when rendering these filters leaves pixels untouched.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        *self == Filters::default()
    }

    /// Renders the CSS `filter` property value.
    ///
    /// `brightness(B%) contrast(C%) saturate(S%)` followed by the preset
    /// function, if any.
    #[must_use]
    pub fn to_css(&self) -> String {
        let mut css = format!(
            "brightness({}%) contrast({}%) saturate({}%)",
            css_number(self.brightness),
            css_number(self.contrast),
            css_number(self.saturation)
        );
        if let Some(function) = self.preset.css_function() {
            css.push(' ');
            css.push_str(&function);
        }
        css
    }
}

fn css_number(value: f32) -> String {
    // Adding zero folds -0.0 into 0.0.
    format!("{}", value + 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filters_render_neutral_css() {
        assert_eq!(
            Filters::default().to_css(),
            "brightness(100%) contrast(100%) saturate(100%)"
        );
        assert!(Filters::default().is_identity());
    }

    #[test]
    fn preset_is_appended() {
        let filters = Filters {
            brightness: 120.0,
            contrast: 80.0,
            saturation: 100.0,
            preset: FilterPreset::Sepia,
        };
        assert_eq!(
            filters.to_css(),
            "brightness(120%) contrast(80%) saturate(100%) sepia(100%)"
        );
    }

    #[test]
    fn blur_preset_uses_fixed_radius() {
        let filters = Filters::default().with(FilterChange::Preset(FilterPreset::Blur));
        assert!(filters.to_css().ends_with(" blur(5px)"));
    }

    #[test]
    fn negative_and_zero_values_are_kept() {
        let filters = Filters::default()
            .with(FilterChange::Brightness(0.0))
            .with(FilterChange::Contrast(-20.0));
        assert_eq!(
            filters.to_css(),
            "brightness(0%) contrast(-20%) saturate(100%)"
        );
    }

    #[test]
    fn reset_restores_neutral_value() {
        let filters = Filters::default()
            .with(FilterChange::Saturation(10.0))
            .with(FilterChange::Preset(FilterPreset::Invert));
        let filters = filters
            .reset(FilterParameter::Saturation)
            .reset(FilterParameter::Preset);
        assert!(filters.is_identity());
    }

    #[test]
    fn preset_parses_case_insensitively() {
        assert_eq!("Grayscale".parse::<FilterPreset>(), Ok(FilterPreset::Grayscale));
        assert!("vintage".parse::<FilterPreset>().is_err());
    }

    #[test]
    fn parameter_names_parse() {
        assert_eq!(
            "saturation".parse::<FilterParameter>(),
            Ok(FilterParameter::Saturation)
        );
        assert_eq!("preset".parse::<FilterParameter>(), Ok(FilterParameter::Preset));
    }
}
