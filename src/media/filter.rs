// SPDX-License-Identifier: MPL-2.0
//! Bakes a [`Filters`] descriptor into pixels.
//!
//! The math follows the CSS filter functions in the order they appear in the
//! filter string: `brightness`, `contrast`, `saturate`, then the preset. Each
//! step clamps channels to `0..=1`. Alpha is never touched.

use crate::config::BLUR_PRESET_RADIUS_PX;
use crate::domain::editing::{FilterPreset, Filters};
use image_rs::{DynamicImage, Rgba, RgbaImage};

type Matrix = [[f32; 3]; 3];

const GRAYSCALE: Matrix = [
    [0.2126, 0.7152, 0.0722],
    [0.2126, 0.7152, 0.0722],
    [0.2126, 0.7152, 0.0722],
];

const SEPIA: Matrix = [
    [0.393, 0.769, 0.189],
    [0.349, 0.686, 0.168],
    [0.272, 0.534, 0.131],
];

/// Renders filters onto a copy of the image.
#[must_use]
pub fn apply_filters(image: &DynamicImage, filters: &Filters) -> DynamicImage {
    if filters.is_identity() {
        return image.clone();
    }

    let brightness = percent_factor(filters.brightness);
    let contrast = percent_factor(filters.contrast);
    let saturation = saturate_matrix(percent_factor(filters.saturation));
    let preset = match filters.preset {
        FilterPreset::Grayscale => Some(GRAYSCALE),
        FilterPreset::Sepia => Some(SEPIA),
        FilterPreset::None | FilterPreset::Invert | FilterPreset::Blur => None,
    };
    let invert = filters.preset == FilterPreset::Invert;

    let mut pixels: RgbaImage = image.to_rgba8();
    for pixel in pixels.pixels_mut() {
        let mut rgb = to_unit(pixel);
        rgb = rgb.map(|c| clamp_unit(c * brightness));
        rgb = rgb.map(|c| clamp_unit((c - 0.5) * contrast + 0.5));
        rgb = apply_matrix(&saturation, rgb);
        if let Some(matrix) = &preset {
            rgb = apply_matrix(matrix, rgb);
        }
        if invert {
            rgb = rgb.map(|c| 1.0 - c);
        }
        write_unit(pixel, rgb);
    }

    let filtered = DynamicImage::ImageRgba8(pixels);
    if filters.preset == FilterPreset::Blur {
        // CSS blur radius is the gaussian standard deviation.
        filtered.blur(BLUR_PRESET_RADIUS_PX)
    } else {
        filtered
    }
}

fn percent_factor(percent: f32) -> f32 {
    if percent.is_finite() {
        (percent / 100.0).max(0.0)
    } else {
        1.0
    }
}

fn saturate_matrix(s: f32) -> Matrix {
    [
        [0.213 + 0.787 * s, 0.715 - 0.715 * s, 0.072 - 0.072 * s],
        [0.213 - 0.213 * s, 0.715 + 0.285 * s, 0.072 - 0.072 * s],
        [0.213 - 0.213 * s, 0.715 - 0.715 * s, 0.072 + 0.928 * s],
    ]
}

fn apply_matrix(matrix: &Matrix, rgb: [f32; 3]) -> [f32; 3] {
    let row = |r: &[f32; 3]| clamp_unit(r[0] * rgb[0] + r[1] * rgb[1] + r[2] * rgb[2]);
    [row(&matrix[0]), row(&matrix[1]), row(&matrix[2])]
}

fn clamp_unit(value: f32) -> f32 {
    value.clamp(0.0, 1.0)
}

fn to_unit(pixel: &Rgba<u8>) -> [f32; 3] {
    [
        f32::from(pixel[0]) / 255.0,
        f32::from(pixel[1]) / 255.0,
        f32::from(pixel[2]) / 255.0,
    ]
}

fn write_unit(pixel: &mut Rgba<u8>, rgb: [f32; 3]) {
    for (channel, value) in rgb.into_iter().enumerate() {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let byte = (value * 255.0).round() as u8;
        pixel[channel] = byte;
    }
}
