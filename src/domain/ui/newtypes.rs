// SPDX-License-Identifier: MPL-2.0
//! UI newtypes.
//!
//! This module provides type-safe wrappers for viewer values,
//! ensuring they are always within valid ranges.

use crate::config::{DEFAULT_SCALE, MAX_SCALE, MIN_SCALE, ROTATION_STEP_DEGREES, ZOOM_FACTOR};

// =============================================================================
// ZoomScale
// =============================================================================

/// Viewer scale factor, guaranteed to be within valid range (0.1–5.0).
///
/// Zooming is multiplicative: one step in multiplies by [`ZOOM_FACTOR`], one
/// step out divides by it, and the result is clamped at the bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomScale(f32);

impl ZoomScale {
    /// Creates a new scale, clamping the value to the valid range.
    ///
    /// NaN falls back to the default scale.
    #[must_use]
    pub fn new(scale: f32) -> Self {
        if scale.is_nan() {
            return Self::default();
        }
        Self(scale.clamp(MIN_SCALE, MAX_SCALE))
    }

    /// Returns the raw scale factor.
    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    /// Returns whether the scale is at the minimum value.
    #[must_use]
    pub fn is_min(self) -> bool {
        self.0 <= MIN_SCALE
    }

    /// Returns whether the scale is at the maximum value.
    #[must_use]
    pub fn is_max(self) -> bool {
        self.0 >= MAX_SCALE
    }

    /// Multiplies by the zoom factor, capped at the maximum.
    #[must_use]
    pub fn zoom_in(self) -> Self {
        Self((self.0 * ZOOM_FACTOR).min(MAX_SCALE))
    }

    /// Divides by the zoom factor, floored at the minimum.
    #[must_use]
    pub fn zoom_out(self) -> Self {
        Self((self.0 / ZOOM_FACTOR).max(MIN_SCALE))
    }
}

impl Default for ZoomScale {
    fn default() -> Self {
        Self(DEFAULT_SCALE)
    }
}

// =============================================================================
// RotationDegrees
// =============================================================================

/// Accumulated rotation in 90° steps.
///
/// Unlike a normalized angle, the raw value keeps growing in either direction
/// (`-90`, `450`, ...). [`normalized`](Self::normalized) gives the visual angle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RotationDegrees(i32);

impl RotationDegrees {
    /// No rotation.
    pub const ZERO: Self = Self(0);

    /// Wraps a raw degree count.
    #[must_use]
    pub fn new(degrees: i32) -> Self {
        Self(degrees)
    }

    /// Returns the accumulated degrees.
    #[must_use]
    pub fn degrees(self) -> i32 {
        self.0
    }

    /// Returns the visual angle in `0..360`.
    #[must_use]
    pub fn normalized(self) -> i32 {
        self.0.rem_euclid(360)
    }

    /// Returns the accumulated angle in radians.
    #[must_use]
    pub fn radians(self) -> f32 {
        (self.0 as f32).to_radians()
    }

    /// Rotates one step clockwise.
    #[must_use]
    pub fn rotate_right(self) -> Self {
        Self(self.0.saturating_add(ROTATION_STEP_DEGREES))
    }

    /// Rotates one step counter-clockwise.
    #[must_use]
    pub fn rotate_left(self) -> Self {
        Self(self.0.saturating_sub(ROTATION_STEP_DEGREES))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;

    // -------------------------------------------------------------------------
    // ZoomScale tests
    // -------------------------------------------------------------------------

    #[test]
    fn zoom_scale_clamps() {
        assert_abs_diff_eq!(ZoomScale::new(0.01).value(), MIN_SCALE);
        assert_abs_diff_eq!(ZoomScale::new(50.0).value(), MAX_SCALE);
        assert_abs_diff_eq!(ZoomScale::new(2.5).value(), 2.5);
        assert_abs_diff_eq!(ZoomScale::new(f32::NAN).value(), DEFAULT_SCALE);
    }

    #[test]
    fn zoom_in_multiplies_by_factor() {
        let scale = ZoomScale::default().zoom_in();
        assert_abs_diff_eq!(scale.value(), 1.2, epsilon = 1e-6);
        assert_abs_diff_eq!(scale.zoom_in().value(), 1.44, epsilon = 1e-6);
    }

    #[test]
    fn zoom_out_divides_by_factor() {
        let scale = ZoomScale::new(1.44).zoom_out();
        assert_abs_diff_eq!(scale.value(), 1.2, epsilon = 1e-6);
    }

    #[test]
    fn zoom_in_saturates_at_max() {
        let mut scale = ZoomScale::default();
        for _ in 0..20 {
            scale = scale.zoom_in();
        }
        assert!(scale.is_max());
        assert_abs_diff_eq!(scale.value(), MAX_SCALE);
    }

    #[test]
    fn zoom_out_saturates_at_min() {
        let mut scale = ZoomScale::default();
        for _ in 0..20 {
            scale = scale.zoom_out();
        }
        assert!(scale.is_min());
        assert_abs_diff_eq!(scale.value(), MIN_SCALE);
    }

    // -------------------------------------------------------------------------
    // RotationDegrees tests
    // -------------------------------------------------------------------------

    #[test]
    fn rotation_is_unbounded() {
        let mut angle = RotationDegrees::ZERO;
        for _ in 0..5 {
            angle = angle.rotate_right();
        }
        assert_eq!(angle.degrees(), 450);
        assert_eq!(angle.normalized(), 90);
    }

    #[test]
    fn rotate_left_goes_negative() {
        let angle = RotationDegrees::ZERO.rotate_left();
        assert_eq!(angle.degrees(), -90);
        assert_eq!(angle.normalized(), 270);
    }

    #[test]
    fn rotation_radians() {
        use std::f32::consts::PI;
        assert_abs_diff_eq!(RotationDegrees::new(180).radians(), PI, epsilon = 1e-6);
        assert_abs_diff_eq!(RotationDegrees::new(-90).radians(), -PI / 2.0, epsilon = 1e-6);
    }
}
