// SPDX-License-Identifier: MPL-2.0
//! File sources handed to the gallery, and the outcome of a batch add.

use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use std::future::Future;
use std::path::{Path, PathBuf};

/// A named, typed file whose bytes are produced asynchronously.
pub trait FileSource {
    fn name(&self) -> &str;

    /// Reported MIME type. Only `image/*` files are accepted.
    fn mime_type(&self) -> &str;

    fn byte_size(&self) -> u64;

    fn last_modified(&self) -> Option<DateTime<Utc>>;

    /// Reads the file contents.
    fn decode(&self) -> impl Future<Output = std::io::Result<Vec<u8>>> + Send;
}

/// A file already held in memory.
#[derive(Debug, Clone)]
pub struct InMemoryFile {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
    pub last_modified: Option<DateTime<Utc>>,
}

impl InMemoryFile {
    #[must_use]
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes,
            last_modified: None,
        }
    }
}

impl FileSource for InMemoryFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn mime_type(&self) -> &str {
        &self.mime_type
    }

    fn byte_size(&self) -> u64 {
        self.bytes.len() as u64
    }

    fn last_modified(&self) -> Option<DateTime<Utc>> {
        self.last_modified
    }

    fn decode(&self) -> impl Future<Output = std::io::Result<Vec<u8>>> + Send {
        std::future::ready(Ok(self.bytes.clone()))
    }
}

/// A file on disk, typed by its extension.
#[derive(Debug, Clone)]
pub struct DiskFile {
    path: PathBuf,
    name: String,
    mime_type: String,
    byte_size: u64,
    last_modified: Option<DateTime<Utc>>,
}

impl DiskFile {
    /// Reads the file's metadata. Contents are read later by `decode()`.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let metadata = tokio::fs::metadata(&path).await?;
        if !metadata.is_file() {
            return Err(Error::Io(format!("{} is not a file", path.display())));
        }
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let mime_type = mime_type_for_path(&path).to_string();
        let last_modified = metadata.modified().ok().map(DateTime::<Utc>::from);
        Ok(Self {
            path,
            name,
            mime_type,
            byte_size: metadata.len(),
            last_modified,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FileSource for DiskFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn mime_type(&self) -> &str {
        &self.mime_type
    }

    fn byte_size(&self) -> u64 {
        self.byte_size
    }

    fn last_modified(&self) -> Option<DateTime<Utc>> {
        self.last_modified
    }

    fn decode(&self) -> impl Future<Output = std::io::Result<Vec<u8>>> + Send {
        let path = self.path.clone();
        async move { tokio::fs::read(path).await }
    }
}

/// MIME type guessed from a file extension.
#[must_use]
pub fn mime_type_for_path(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        "webp" => "image/webp",
        "tif" | "tiff" => "image/tiff",
        "ico" => "image/x-icon",
        "svg" => "image/svg+xml",
        "txt" => "text/plain",
        _ => "application/octet-stream",
    }
}

/// Outcome of adding several files at once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IngestReport {
    /// Names of the records created, in order.
    pub added: Vec<String>,
    /// Files that were skipped, with the reason.
    pub rejected: Vec<Error>,
}

impl IngestReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn mime_from_extension() {
        assert_eq!(mime_type_for_path(Path::new("a.PNG")), "image/png");
        assert_eq!(mime_type_for_path(Path::new("b.jpeg")), "image/jpeg");
        assert_eq!(mime_type_for_path(Path::new("notes.txt")), "text/plain");
        assert_eq!(
            mime_type_for_path(Path::new("no_extension")),
            "application/octet-stream"
        );
    }

    #[tokio::test]
    async fn in_memory_file_decodes_its_bytes() {
        let file = InMemoryFile::new("a.png", "image/png", vec![1, 2, 3]);
        assert_eq!(file.byte_size(), 3);
        assert_eq!(file.decode().await.expect("decode"), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn disk_file_reads_metadata_and_contents() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("photo.jpg");
        std::fs::write(&path, b"jpeg-ish").expect("write");

        let file = DiskFile::open(&path).await.expect("open");
        assert_eq!(file.name(), "photo.jpg");
        assert_eq!(file.mime_type(), "image/jpeg");
        assert_eq!(file.byte_size(), 8);
        assert!(file.last_modified().is_some());
        assert_eq!(file.decode().await.expect("read"), b"jpeg-ish".to_vec());
    }

    #[tokio::test]
    async fn missing_disk_file_is_io_error() {
        let dir = tempdir().expect("temp dir");
        let result = DiskFile::open(dir.path().join("missing.png")).await;
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
