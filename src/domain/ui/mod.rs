// SPDX-License-Identifier: MPL-2.0
//! UI domain types.
//!
//! This module contains viewer value objects that are independent
//! of any presentation surface.

pub mod geometry;
pub mod newtypes;

// Re-export commonly used types
pub use geometry::{Rect, Size, Vector};
pub use newtypes::{RotationDegrees, ZoomScale};
