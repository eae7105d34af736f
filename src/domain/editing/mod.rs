// SPDX-License-Identifier: MPL-2.0
//! Editing domain types.
//!
//! This module provides pure domain types for image editing operations:
//! - [`Filters`]: Non-destructive brightness/contrast/saturation and preset
//! - [`WatermarkSpec`]: Watermark text, style and placement
//! - [`FontSize`]: Watermark font size

pub mod filter;
pub mod newtypes;
pub mod watermark;

pub use filter::{FilterChange, FilterParameter, FilterPreset, Filters};
pub use newtypes::FontSize;
pub use watermark::{WatermarkPosition, WatermarkSpec, WatermarkStyle};
