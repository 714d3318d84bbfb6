//! # Export Serialization
//!
//! Builds downloadable JSON documents from credential records and hands
//! them to an [`ExportSink`]. Serialization is deterministic: two-space
//! pretty-printed JSON in field declaration order, with absent optional
//! fields omitted.
//!
//! ## File Names
//!
//! - Single credential: `vc-<execution_id>.json`
//! - Bulk: `credentials-export-<epoch_millis>.json`
//!
//! Bulk export covers exactly the records the caller passes, which is the
//! filtered, loaded set. It is never widened to the server-side total.

use chrono::{DateTime, Utc};
use parking_lot::Mutex;

use crate::error::CredlensError;
use crate::record::CredentialRecord;

/// A named document ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportDocument {
    pub filename: String,
    pub content: String,
}

impl ExportDocument {
    /// Hand this document to `sink`.
    pub fn deliver_to(&self, sink: &dyn ExportSink) -> Result<(), CredlensError> {
        sink.deliver(&self.filename, &self.content)
    }
}

/// Serialize a single credential.
pub fn export_one(record: &CredentialRecord) -> Result<ExportDocument, CredlensError> {
    Ok(ExportDocument {
        filename: format!("vc-{}.json", record.execution_id),
        content: serde_json::to_string_pretty(record)?,
    })
}

/// Serialize a set of credentials as one JSON array.
pub fn export_many(
    records: &[CredentialRecord],
    now: DateTime<Utc>,
) -> Result<ExportDocument, CredlensError> {
    Ok(ExportDocument {
        filename: format!("credentials-export-{}.json", now.timestamp_millis()),
        content: serde_json::to_string_pretty(records)?,
    })
}

/// Destination for export documents.
///
/// Implementations own the platform side effect (a browser download, a
/// file on disk, an in-memory buffer). Delivery is attempted once; there is
/// no retry.
pub trait ExportSink: Send + Sync {
    fn deliver(&self, filename: &str, content: &str) -> Result<(), CredlensError>;
}

/// Sink that keeps every delivered document in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    delivered: Mutex<Vec<ExportDocument>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Documents delivered so far, oldest first.
    pub fn documents(&self) -> Vec<ExportDocument> {
        self.delivered.lock().clone()
    }
}

impl ExportSink for MemorySink {
    fn deliver(&self, filename: &str, content: &str) -> Result<(), CredlensError> {
        self.delivered.lock().push(ExportDocument {
            filename: filename.to_string(),
            content: content.to_string(),
        });
        Ok(())
    }
}
