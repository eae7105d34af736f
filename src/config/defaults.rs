// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the application. Constants are organized by category.
//!
//! # Categories
//!
//! - **Viewer**: Zoom factor and scale bounds
//! - **Filters**: Neutral adjustment values and preset parameters
//! - **Crop**: Initial region size and minimum handle size
//! - **Watermark**: Default text, style parameters and font size bounds

// ==========================================================================
// Viewer Defaults
// ==========================================================================

/// Scale applied when the viewer opens an image (1.0 = displayed size).
pub const DEFAULT_SCALE: f32 = 1.0;

/// Minimum viewer scale.
pub const MIN_SCALE: f32 = 0.1;

/// Maximum viewer scale.
pub const MAX_SCALE: f32 = 5.0;

/// Multiplier applied by one zoom in (divisor for zoom out).
pub const ZOOM_FACTOR: f32 = 1.2;

/// Rotation step for rotate left/right, in degrees.
pub const ROTATION_STEP_DEGREES: i32 = 90;

// ==========================================================================
// Filter Defaults
// ==========================================================================

/// Neutral value for brightness, contrast and saturation (percent).
pub const NEUTRAL_FILTER_PERCENT: f32 = 100.0;

/// Blur radius used by the blur preset, in pixels.
pub const BLUR_PRESET_RADIUS_PX: f32 = 5.0;

// ==========================================================================
// Crop Defaults
// ==========================================================================

/// Fraction of the displayed image covered by a fresh crop region.
pub const CROP_INITIAL_FRACTION: f32 = 0.6;

/// Minimum crop region width and height, in display pixels.
pub const CROP_MIN_SIZE_PX: f32 = 50.0;

// ==========================================================================
// Watermark Defaults
// ==========================================================================

/// Text used when the watermark input is empty.
pub const DEFAULT_WATERMARK_TEXT: &str = "水印文字";

/// Default watermark color.
pub const DEFAULT_WATERMARK_COLOR: &str = "#ffffff";

/// Default watermark font size, in display pixels.
pub const DEFAULT_WATERMARK_FONT_SIZE_PX: f32 = 24.0;

/// Minimum watermark font size.
pub const MIN_WATERMARK_FONT_SIZE_PX: f32 = 1.0;

/// Maximum watermark font size.
pub const MAX_WATERMARK_FONT_SIZE_PX: f32 = 1000.0;

/// Shadow blur radius at display scale.
pub const WATERMARK_SHADOW_BLUR_PX: f32 = 4.0;

/// Shadow offset on both axes at display scale.
pub const WATERMARK_SHADOW_OFFSET_PX: f32 = 2.0;

/// Shadow color alpha (the shadow itself is black).
pub const WATERMARK_SHADOW_ALPHA: f32 = 0.5;

/// Outline stroke width at display scale.
pub const WATERMARK_OUTLINE_WIDTH_PX: f32 = 1.0;

/// Global alpha of the transparent style.
pub const WATERMARK_TRANSPARENT_ALPHA: f32 = 0.5;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(MIN_SCALE > 0.0);
    assert!(MIN_SCALE < DEFAULT_SCALE);
    assert!(MAX_SCALE > DEFAULT_SCALE);
    assert!(ZOOM_FACTOR > 1.0);
    assert!(ROTATION_STEP_DEGREES == 90);

    assert!(NEUTRAL_FILTER_PERCENT == 100.0);
    assert!(BLUR_PRESET_RADIUS_PX > 0.0);

    assert!(CROP_INITIAL_FRACTION > 0.0);
    assert!(CROP_INITIAL_FRACTION <= 1.0);
    assert!(CROP_MIN_SIZE_PX > 0.0);

    assert!(MIN_WATERMARK_FONT_SIZE_PX > 0.0);
    assert!(DEFAULT_WATERMARK_FONT_SIZE_PX >= MIN_WATERMARK_FONT_SIZE_PX);
    assert!(DEFAULT_WATERMARK_FONT_SIZE_PX <= MAX_WATERMARK_FONT_SIZE_PX);
    assert!(WATERMARK_SHADOW_ALPHA > 0.0 && WATERMARK_SHADOW_ALPHA <= 1.0);
    assert!(WATERMARK_TRANSPARENT_ALPHA > 0.0 && WATERMARK_TRANSPARENT_ALPHA <= 1.0);
};
