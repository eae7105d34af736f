// SPDX-License-Identifier: MPL-2.0
//! Image decoding and encoding between [`EncodedImage`] bytes and pixels.

use super::{EncodedImage, MIME_PNG};
use crate::error::{EditError, Error, Result};
use image_rs::{DynamicImage, ImageFormat, ImageReader};
use std::io::Cursor;

/// Formats the encoder accepts for the record's MIME type. Anything else is
/// written as PNG.
const ENCODABLE_FORMATS: [ImageFormat; 6] = [
    ImageFormat::Png,
    ImageFormat::Jpeg,
    ImageFormat::Bmp,
    ImageFormat::Tiff,
    ImageFormat::Gif,
    ImageFormat::WebP,
];

/// Decodes encoded bytes into pixels.
pub fn decode(image: &EncodedImage) -> Result<DynamicImage> {
    let decoded = image_rs::load_from_memory(image.bytes())?;
    Ok(decoded)
}

/// Reads the pixel dimensions without decoding the whole image.
pub fn dimensions(bytes: &[u8]) -> Result<(u32, u32)> {
    let reader = ImageReader::new(Cursor::new(bytes)).with_guessed_format()?;
    let size = reader.into_dimensions()?;
    Ok(size)
}

/// Picks the output format for a MIME type, falling back to PNG.
#[must_use]
pub fn output_format(mime_type: &str) -> ImageFormat {
    ImageFormat::from_mime_type(mime_type)
        .filter(|format| ENCODABLE_FORMATS.contains(format))
        .unwrap_or(ImageFormat::Png)
}

/// Encodes pixels in the format named by `mime_type` (PNG when unknown or not
/// encodable).
///
/// Failures are reported as [`EditError::Compositing`] since encoding only
/// happens when committing an edit.
pub fn encode(image: &DynamicImage, mime_type: &str) -> Result<EncodedImage> {
    let format = output_format(mime_type);
    // JPEG has no alpha channel; the other encoders take RGBA.
    let pixels = match format {
        ImageFormat::Jpeg => DynamicImage::ImageRgb8(image.to_rgb8()),
        _ => DynamicImage::ImageRgba8(image.to_rgba8()),
    };

    let mut buffer = Cursor::new(Vec::new());
    pixels
        .write_to(&mut buffer, format)
        .map_err(|err| Error::Edit(EditError::Compositing(err.to_string())))?;

    let mime = if format == ImageFormat::Png {
        MIME_PNG.to_string()
    } else {
        format.to_mime_type().to_string()
    };
    Ok(EncodedImage::new(mime, buffer.into_inner()))
}
