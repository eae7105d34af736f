// SPDX-License-Identifier: MPL-2.0
//! Watermark inputs: text, style, color, size and placement.

use super::newtypes::FontSize;
use crate::config::{DEFAULT_WATERMARK_COLOR, DEFAULT_WATERMARK_TEXT};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Rendering style of the watermark text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WatermarkStyle {
    /// Plain fill.
    #[default]
    None,
    /// Fill over a soft black drop shadow.
    Shadow,
    /// Fill over a black stroke.
    Outline,
    /// Fill at half opacity.
    Transparent,
}

impl WatermarkStyle {
    pub const ALL: [WatermarkStyle; 4] = [
        WatermarkStyle::None,
        WatermarkStyle::Shadow,
        WatermarkStyle::Outline,
        WatermarkStyle::Transparent,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            WatermarkStyle::None => "none",
            WatermarkStyle::Shadow => "shadow",
            WatermarkStyle::Outline => "outline",
            WatermarkStyle::Transparent => "transparent",
        }
    }
}

impl fmt::Display for WatermarkStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WatermarkStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        WatermarkStyle::ALL
            .into_iter()
            .find(|style| style.as_str() == wanted)
            .ok_or_else(|| format!("unknown watermark style {:?}", s))
    }
}

/// Where the watermark sits on the displayed image.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum WatermarkPosition {
    /// Text centered on the image.
    #[default]
    Centered,
    /// Top-left corner of the text, in display space.
    Explicit { left: f32, top: f32 },
}

/// A complete watermark description.
#[derive(Debug, Clone, PartialEq)]
pub struct WatermarkSpec {
    text: String,
    pub style: WatermarkStyle,
    pub color: String,
    pub font_size: FontSize,
    pub position: WatermarkPosition,
}

impl WatermarkSpec {
    /// Builds a centered watermark; blank text becomes the default text.
    #[must_use]
    pub fn new(text: &str, style: WatermarkStyle, color: &str, font_size: FontSize) -> Self {
        Self {
            text: resolve_text(text),
            style,
            color: resolve_color(color),
            font_size,
            position: WatermarkPosition::Centered,
        }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: &str) {
        self.text = resolve_text(text);
    }

    pub fn set_color(&mut self, color: &str) {
        self.color = resolve_color(color);
    }
}

impl Default for WatermarkSpec {
    fn default() -> Self {
        Self::new(
            DEFAULT_WATERMARK_TEXT,
            WatermarkStyle::default(),
            DEFAULT_WATERMARK_COLOR,
            FontSize::default(),
        )
    }
}

fn resolve_text(text: &str) -> String {
    if text.trim().is_empty() {
        DEFAULT_WATERMARK_TEXT.to_string()
    } else {
        text.to_string()
    }
}

fn resolve_color(color: &str) -> String {
    let color = color.trim();
    if color.is_empty() {
        DEFAULT_WATERMARK_COLOR.to_string()
    } else {
        color.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_text_uses_default() {
        let spec = WatermarkSpec::new("   ", WatermarkStyle::None, "#000", FontSize::default());
        assert_eq!(spec.text(), DEFAULT_WATERMARK_TEXT);
        assert_eq!(spec.position, WatermarkPosition::Centered);
    }

    #[test]
    fn text_is_kept_verbatim() {
        let mut spec = WatermarkSpec::default();
        spec.set_text(" DRAFT ");
        assert_eq!(spec.text(), " DRAFT ");
        spec.set_text("");
        assert_eq!(spec.text(), DEFAULT_WATERMARK_TEXT);
    }

    #[test]
    fn style_parses() {
        assert_eq!("outline".parse::<WatermarkStyle>(), Ok(WatermarkStyle::Outline));
        assert_eq!(" Shadow".parse::<WatermarkStyle>(), Ok(WatermarkStyle::Shadow));
        assert!("glow".parse::<WatermarkStyle>().is_err());
    }
}
