// SPDX-License-Identifier: MPL-2.0
//! Editing newtypes.
//!
//! This module provides type-safe wrappers for editing values,
//! ensuring they are always within valid ranges.

use crate::config::{
    DEFAULT_WATERMARK_FONT_SIZE_PX, MAX_WATERMARK_FONT_SIZE_PX, MIN_WATERMARK_FONT_SIZE_PX,
};

// =============================================================================
// FontSize
// =============================================================================

/// Watermark font size in display pixels, guaranteed to be within 1–1000.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontSize(f32);

impl FontSize {
    /// Creates a new font size, clamping the value to the valid range.
    ///
    /// Non-finite input falls back to the default size.
    #[must_use]
    pub fn new(px: f32) -> Self {
        if !px.is_finite() {
            return Self::default();
        }
        Self(px.clamp(MIN_WATERMARK_FONT_SIZE_PX, MAX_WATERMARK_FONT_SIZE_PX))
    }

    /// Returns the raw pixel value.
    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    /// Returns the size scaled into source space, never below one pixel.
    #[must_use]
    pub fn scaled(self, factor: f32) -> f32 {
        (self.0 * factor).max(1.0)
    }

    #[must_use]
    pub fn is_min(self) -> bool {
        self.0 <= MIN_WATERMARK_FONT_SIZE_PX
    }

    #[must_use]
    pub fn is_max(self) -> bool {
        self.0 >= MAX_WATERMARK_FONT_SIZE_PX
    }
}

impl Default for FontSize {
    fn default() -> Self {
        Self(DEFAULT_WATERMARK_FONT_SIZE_PX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;

    #[test]
    fn font_size_clamps() {
        assert_abs_diff_eq!(FontSize::new(0.0).value(), MIN_WATERMARK_FONT_SIZE_PX);
        assert_abs_diff_eq!(FontSize::new(5000.0).value(), MAX_WATERMARK_FONT_SIZE_PX);
        assert_abs_diff_eq!(FontSize::new(48.0).value(), 48.0);
        assert!(FontSize::new(-3.0).is_min());
        assert!(FontSize::new(2000.0).is_max());
    }

    #[test]
    fn font_size_non_finite_uses_default() {
        assert_eq!(FontSize::new(f32::NAN), FontSize::default());
        assert_eq!(FontSize::new(f32::INFINITY), FontSize::default());
    }

    #[test]
    fn font_size_scaled() {
        assert_abs_diff_eq!(FontSize::new(24.0).scaled(2.0), 48.0);
        assert_abs_diff_eq!(FontSize::new(1.0).scaled(0.1), 1.0);
    }
}
