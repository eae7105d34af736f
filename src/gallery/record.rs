// SPDX-License-Identifier: MPL-2.0
//! One image in the gallery.

use crate::domain::editing::Filters;
use crate::domain::format::format_file_size;
use crate::error::Result;
use crate::media::{self, EncodedImage};
use chrono::{DateTime, Utc};

/// An ingested image with its pristine bytes, working bytes and filters.
///
/// `original` is set once at ingestion. `current` starts as the same buffer
/// and is replaced wholesale by crop and watermark commits.
#[derive(Debug, Clone)]
pub struct ImageRecord {
    name: String,
    original: EncodedImage,
    current: EncodedImage,
    byte_size: u64,
    mime_type: String,
    last_modified: Option<DateTime<Utc>>,
    natural_size: (u32, u32),
    /// Committed filter adjustments.
    pub filters: Filters,
}

impl ImageRecord {
    /// Builds a record from decoded source bytes, with default filters.
    ///
    /// Fails with a decode error when the bytes are not a readable image.
    pub fn new(
        name: impl Into<String>,
        bytes: EncodedImage,
        byte_size: u64,
        last_modified: Option<DateTime<Utc>>,
    ) -> Result<Self> {
        let natural_size = media::dimensions(bytes.bytes())?;
        Ok(Self {
            name: name.into(),
            mime_type: bytes.mime_type().to_string(),
            original: bytes.clone(),
            current: bytes,
            byte_size,
            last_modified,
            natural_size,
            filters: Filters::default(),
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn original(&self) -> &EncodedImage {
        &self.original
    }

    #[must_use]
    pub fn current(&self) -> &EncodedImage {
        &self.current
    }

    /// Size of the source file in bytes.
    #[must_use]
    pub fn byte_size(&self) -> u64 {
        self.byte_size
    }

    #[must_use]
    pub fn formatted_size(&self) -> String {
        format_file_size(self.byte_size)
    }

    /// MIME type reported at ingestion; edits are re-encoded in this type.
    #[must_use]
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    #[must_use]
    pub fn last_modified(&self) -> Option<DateTime<Utc>> {
        self.last_modified
    }

    /// Pixel dimensions of the current bytes.
    #[must_use]
    pub fn natural_size(&self) -> (u32, u32) {
        self.natural_size
    }

    /// Whether a crop or watermark has been committed.
    #[must_use]
    pub fn is_edited(&self) -> bool {
        !self.current.shares_buffer_with(&self.original)
    }

    /// Swaps in new working bytes. The superseded buffer is dropped here
    /// unless it is still the original.
    pub fn replace_current(&mut self, bytes: EncodedImage) -> Result<()> {
        let natural_size = media::dimensions(bytes.bytes())?;
        self.current = bytes;
        self.natural_size = natural_size;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::encoded_png;

    #[test]
    fn new_record_starts_unedited_with_default_filters() {
        let record = ImageRecord::new("a.png", encoded_png(8, 6), 1536, None).expect("record");
        assert_eq!(record.name(), "a.png");
        assert_eq!(record.natural_size(), (8, 6));
        assert_eq!(record.filters, Filters::default());
        assert!(!record.is_edited());
        assert_eq!(record.current(), record.original());
        assert_eq!(record.formatted_size(), "1.5 KB");
    }

    #[test]
    fn undecodable_bytes_create_no_record() {
        let bytes = EncodedImage::new("image/png", b"broken".to_vec());
        assert!(ImageRecord::new("bad.png", bytes, 6, None).is_err());
    }

    #[test]
    fn replace_current_keeps_original_and_drops_superseded() {
        let mut record = ImageRecord::new("a.png", encoded_png(8, 6), 10, None).expect("record");
        record
            .replace_current(encoded_png(4, 3))
            .expect("first replace");
        let superseded = record.current().downgrade();

        record
            .replace_current(encoded_png(2, 2))
            .expect("second replace");

        assert!(superseded.upgrade().is_none());
        assert_eq!(record.natural_size(), (2, 2));
        assert_eq!(
            media::dimensions(record.original().bytes()).expect("dims"),
            (8, 6)
        );
        assert!(record.is_edited());
    }

    #[test]
    fn failed_replace_leaves_record_untouched() {
        let mut record = ImageRecord::new("a.png", encoded_png(8, 6), 10, None).expect("record");
        let before = record.current().clone();
        let result = record.replace_current(EncodedImage::new("image/png", vec![1, 2, 3]));
        assert!(result.is_err());
        assert_eq!(record.current(), &before);
        assert_eq!(record.natural_size(), (8, 6));
    }
}
