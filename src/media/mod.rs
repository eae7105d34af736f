// SPDX-License-Identifier: MPL-2.0
//! Raster side of the pipeline: encoded image bytes, decoding and encoding,
//! and the pixel operations behind filters, crops and watermarks.

pub mod color;
pub mod filter;
pub mod image;
pub mod image_transform;
pub mod text;
pub mod watermark;

use base64::Engine as _;
use std::fmt;
use std::sync::{Arc, Weak};

pub use color::Color;
pub use image::{decode, dimensions, encode};
pub use text::{AbGlyphRasterizer, GlyphRasterizer, TextMask};

/// MIME type used whenever the source type cannot be encoded.
pub const MIME_PNG: &str = "image/png";

/// Encoded image bytes together with their MIME type.
///
/// Cloning shares the underlying buffer. The buffer is released when the last
/// clone is dropped.
#[derive(Clone)]
pub struct EncodedImage {
    mime_type: String,
    bytes: Arc<[u8]>,
}

impl EncodedImage {
    #[must_use]
    pub fn new(mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            bytes: Arc::from(bytes),
        }
    }

    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[must_use]
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Renders the bytes as a `data:<mime>;base64,...` URL.
    #[must_use]
    pub fn to_data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.mime_type,
            base64::engine::general_purpose::STANDARD.encode(&self.bytes)
        )
    }

    /// Whether both values share the same buffer.
    #[must_use]
    pub fn shares_buffer_with(&self, other: &EncodedImage) -> bool {
        Arc::ptr_eq(&self.bytes, &other.bytes)
    }

    /// Weak handle on the buffer, used to observe its release.
    #[must_use]
    pub fn downgrade(&self) -> Weak<[u8]> {
        Arc::downgrade(&self.bytes)
    }
}

impl PartialEq for EncodedImage {
    fn eq(&self, other: &Self) -> bool {
        self.mime_type == other.mime_type && self.bytes == other.bytes
    }
}

impl Eq for EncodedImage {}

impl fmt::Debug for EncodedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncodedImage")
            .field("mime_type", &self.mime_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}
