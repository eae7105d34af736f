// SPDX-License-Identifier: MPL-2.0
//! Interactive state and the collaborators it drives.
//!
//! Nothing here draws pixels. State machines own their data and expose plain
//! methods; the [`surface`] traits describe what a front end must render.
//!
//! - [`state`] - Transform, drag-to-pan and wheel zoom
//! - [`viewer`] - Lightbox session and keyboard shortcuts
//! - [`editor`] - Edit panel: filter staging, crop and watermark tools
//! - [`notifications`] - Queue of user-facing notifications
//! - [`surface`] - Rendering surface, gallery list and confirmation traits

pub mod editor;
pub mod notifications;
pub mod state;
pub mod surface;
pub mod viewer;
