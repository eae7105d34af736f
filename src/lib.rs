// SPDX-License-Identifier: MPL-2.0
//! `gallery_studio` is the core of an image gallery viewer and editor.
//!
//! Images are ingested into an in-memory [`gallery`], browsed in a viewer
//! with zoom, rotation and pan, and edited with non-destructive filters and
//! destructive crop and text watermark commits at source resolution. The
//! [`app::Studio`] facade drives a rendering surface supplied by the front
//! end; [`ui::surface::HeadlessSurface`] stands in for one in the CLI.

pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod gallery;
pub mod media;
pub mod ui;

#[cfg(test)]
pub(crate) mod test_utils;
