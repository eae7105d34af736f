// SPDX-License-Identifier: MPL-2.0
//! Gallery store: ingestion, records and the current-image cursor.

pub mod ingest;
pub mod record;
pub mod store;

pub use ingest::{DiskFile, FileSource, InMemoryFile, IngestReport};
pub use record::ImageRecord;
pub use store::Gallery;
