// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    Io(String),
    Config(String),
    /// A file was skipped at ingestion (wrong type or duplicate name).
    Ingestion(IngestionRejection),
    /// The source file could not be read or decoded.
    Decode(String),
    /// An edit could not be applied to the current image.
    Edit(EditError),
}

/// Reasons a file is refused before any decoding happens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestionRejection {
    /// MIME type does not start with `image/`.
    UnsupportedType { name: String, mime_type: String },
    /// A record with the same name is already in the gallery.
    Duplicate { name: String },
}

impl IngestionRejection {
    /// Name of the rejected file.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            IngestionRejection::UnsupportedType { name, .. }
            | IngestionRejection::Duplicate { name } => name,
        }
    }
}

/// Failures of the interactive editing engines.
#[derive(Debug, Clone, PartialEq)]
pub enum EditError {
    /// The displayed image has no size yet; the operation is deferred.
    GeometryDegenerate { width: f32, height: f32 },
    /// The base image could not be (re)loaded or re-encoded for compositing.
    Compositing(String),
    /// No text rasterizer or font is available for watermarking.
    FontUnavailable(String),
    /// The requested operation needs a mode that is not active.
    InactiveMode(&'static str),
    /// Another exclusive editing mode is already active.
    ModeBusy(&'static str),
    /// There is no current image to operate on.
    NoImage,
}

impl EditError {
    /// Returns the notification message key for this error.
    #[must_use]
    pub fn notification_key(&self) -> &'static str {
        match self {
            EditError::GeometryDegenerate { .. } => "notification-edit-geometry-deferred",
            EditError::Compositing(_) => "notification-edit-compositing-failed",
            EditError::FontUnavailable(_) => "notification-watermark-font-unavailable",
            EditError::InactiveMode(_) => "notification-edit-mode-inactive",
            EditError::ModeBusy(_) => "notification-edit-mode-busy",
            EditError::NoImage => "notification-edit-no-image",
        }
    }

    /// Whether the failure only postpones the operation.
    #[must_use]
    pub fn is_deferred(&self) -> bool {
        matches!(self, EditError::GeometryDegenerate { .. })
    }
}

impl Error {
    /// Returns the notification message key for this error.
    #[must_use]
    pub fn notification_key(&self) -> &'static str {
        match self {
            Error::Io(_) => "notification-io-error",
            Error::Config(_) => "notification-config-load-error",
            Error::Ingestion(IngestionRejection::UnsupportedType { .. }) => {
                "notification-ingest-unsupported-type"
            }
            Error::Ingestion(IngestionRejection::Duplicate { .. }) => {
                "notification-ingest-duplicate"
            }
            Error::Decode(_) => "notification-decode-failed",
            Error::Edit(err) => err.notification_key(),
        }
    }
}

impl fmt::Display for IngestionRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IngestionRejection::UnsupportedType { name, mime_type } => {
                write!(f, "{} is not an image (type {:?})", name, mime_type)
            }
            IngestionRejection::Duplicate { name } => {
                write!(f, "{} is already in the gallery", name)
            }
        }
    }
}

impl fmt::Display for EditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditError::GeometryDegenerate { width, height } => {
                write!(f, "Displayed image has no size yet ({}x{})", width, height)
            }
            EditError::Compositing(msg) => write!(f, "Compositing failed: {}", msg),
            EditError::FontUnavailable(msg) => write!(f, "No usable font: {}", msg),
            EditError::InactiveMode(mode) => write!(f, "{} mode is not active", mode),
            EditError::ModeBusy(mode) => write!(f, "{} mode is already active", mode),
            EditError::NoImage => write!(f, "No image selected"),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Ingestion(e) => write!(f, "Ingestion Rejected: {}", e),
            Error::Decode(e) => write!(f, "Decode Error: {}", e),
            Error::Edit(e) => write!(f, "Edit Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<IngestionRejection> for Error {
    fn from(err: IngestionRejection) -> Self {
        Error::Ingestion(err)
    }
}

impl From<EditError> for Error {
    fn from(err: EditError) -> Self {
        Error::Edit(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<image_rs::ImageError> for Error {
    fn from(err: image_rs::ImageError) -> Self {
        Error::Decode(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
