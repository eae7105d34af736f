// SPDX-License-Identifier: MPL-2.0
//! Test utilities for float comparisons and other common test helpers.
//!
//! This module re-exports the `approx` crate's assertion macros for float comparison,
//! which properly handle floating-point precision issues that `assert_eq!` cannot.

// Re-export approx macros for convenient use in tests
pub use approx::assert_abs_diff_eq;

use crate::media::{self, EncodedImage};
use image_rs::{DynamicImage, ImageBuffer, Rgba};

/// Opaque mid-gray test image.
pub fn create_test_image(width: u32, height: u32) -> DynamicImage {
    create_solid_image(width, height, [128, 128, 128, 255])
}

/// Test image filled with one color.
pub fn create_solid_image(width: u32, height: u32, rgba: [u8; 4]) -> DynamicImage {
    DynamicImage::ImageRgba8(ImageBuffer::from_pixel(width, height, Rgba(rgba)))
}

/// PNG-encoded mid-gray test image.
pub fn encoded_png(width: u32, height: u32) -> EncodedImage {
    media::encode(&create_test_image(width, height), media::MIME_PNG)
        .expect("encoding a test image must succeed")
}
