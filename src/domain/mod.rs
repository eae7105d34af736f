// SPDX-License-Identifier: MPL-2.0
//! Domain layer - Core value types shared by every component.
//!
//! This module contains pure domain types, value objects, and business rules.
//! Nothing here touches pixels, files or a rendering surface.
//!
//! # Modules
//!
//! - [`editing`]: Editing types ([`Filters`](editing::Filters),
//!   [`WatermarkSpec`](editing::WatermarkSpec), [`FontSize`](editing::FontSize))
//! - [`format`]: Human-readable sizes ([`format_file_size`](format::format_file_size))
//! - [`ui`]: Viewer value objects ([`ZoomScale`](ui::ZoomScale),
//!   [`RotationDegrees`](ui::RotationDegrees), [`Rect`](ui::Rect))

pub mod editing;
pub mod format;
pub mod ui;
