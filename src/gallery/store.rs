// SPDX-License-Identifier: MPL-2.0
//! Ordered collection of image records and the current-image cursor.

use super::ingest::{FileSource, IngestReport};
use super::record::ImageRecord;
use crate::error::{Error, IngestionRejection, Result};
use crate::media::EncodedImage;

/// The gallery: records in insertion order, unique by name.
///
/// `current_index` stays within `0..len` while non-empty and is 0 when empty.
#[derive(Debug, Default)]
pub struct Gallery {
    records: Vec<ImageRecord>,
    current_index: usize,
}

impl Gallery {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Ingests one file.
    ///
    /// Rejects non-image MIME types and names already present before reading
    /// anything. Returns the index of the new record.
    pub async fn add<F: FileSource>(&mut self, file: &F) -> Result<usize> {
        let name = file.name().to_string();
        let mime_type = file.mime_type().to_string();

        if !mime_type.starts_with("image/") {
            return Err(IngestionRejection::UnsupportedType { name, mime_type }.into());
        }
        if self.position_of(&name).is_some() {
            return Err(IngestionRejection::Duplicate { name }.into());
        }

        let bytes = file
            .decode()
            .await
            .map_err(|err| Error::Decode(format!("{}: {}", name, err)))?;

        let record = ImageRecord::new(
            name.clone(),
            EncodedImage::new(mime_type, bytes),
            file.byte_size(),
            file.last_modified(),
        )
        .map_err(|err| match err {
            Error::Decode(msg) | Error::Io(msg) => Error::Decode(format!("{}: {}", name, msg)),
            other => other,
        })?;

        log::debug!(
            "Ingested {} ({}x{})",
            record.name(),
            record.natural_size().0,
            record.natural_size().1
        );
        self.records.push(record);
        Ok(self.records.len() - 1)
    }

    /// Ingests every file in order. A rejected file never stops the batch.
    pub async fn add_batch<'a, F, I>(&mut self, files: I) -> IngestReport
    where
        F: FileSource + 'a,
        I: IntoIterator<Item = &'a F>,
    {
        let mut report = IngestReport::default();
        for file in files {
            match self.add(file).await {
                Ok(index) => report.added.push(self.records[index].name().to_string()),
                Err(err) => report.rejected.push(err),
            }
        }
        report
    }

    /// Removes the record at `index`.
    ///
    /// The cursor only moves when it falls past the end.
    pub fn remove(&mut self, index: usize) -> Option<ImageRecord> {
        if index >= self.records.len() {
            return None;
        }
        let removed = self.records.remove(index);
        if self.current_index >= self.records.len() {
            self.current_index = self.records.len().saturating_sub(1);
        }
        Some(removed)
    }

    /// Drops every record and resets the cursor.
    pub fn clear(&mut self) {
        self.records.clear();
        self.current_index = 0;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&ImageRecord> {
        self.records.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut ImageRecord> {
        self.records.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ImageRecord> {
        self.records.iter()
    }

    #[must_use]
    pub fn position_of(&self, name: &str) -> Option<usize> {
        self.records.iter().position(|record| record.name() == name)
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    #[must_use]
    pub fn current(&self) -> Option<&ImageRecord> {
        self.records.get(self.current_index)
    }

    pub fn current_mut(&mut self) -> Option<&mut ImageRecord> {
        self.records.get_mut(self.current_index)
    }

    /// Moves the cursor. Out-of-range indices are ignored.
    pub fn set_current(&mut self, index: usize) -> bool {
        if index < self.records.len() {
            self.current_index = index;
            true
        } else {
            false
        }
    }

    /// Steps to the next record; stops at the last one.
    pub fn next(&mut self) -> bool {
        self.set_current(self.current_index + 1)
    }

    /// Steps to the previous record; stops at the first one.
    pub fn previous(&mut self) -> bool {
        match self.current_index.checked_sub(1) {
            Some(index) => self.set_current(index),
            None => false,
        }
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.current_index + 1 < self.records.len()
    }

    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.current_index > 0 && !self.records.is_empty()
    }
}
