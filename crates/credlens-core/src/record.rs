//! # Credential Records and Search Wire Types
//!
//! Types matching the backend's credential search schema. Field names are
//! snake_case on the wire. Records are immutable once received: nothing in
//! credlens mutates a record after it has been deserialized.
//!
//! ## Faithful Round Trip
//!
//! Export must reproduce the record the backend sent. Absent optional
//! fields stay absent (they are skipped, never written as `null` or the
//! string `"undefined"`), `created_at` is kept verbatim instead of being
//! reformatted, and any field this crate does not model is carried in
//! [`CredentialRecord::extra`].

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A verifiable execution credential as returned by the search endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CredentialRecord {
    /// Unique credential identifier; primary key for list rendering.
    pub vc_id: String,
    /// The execution that produced this credential.
    pub execution_id: String,
    /// The workflow the execution belongs to.
    pub workflow_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoner_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_name: Option<String>,
    /// Raw backend status; see [`crate::status::StatusTable`].
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
    /// Signature check result computed by the backend.
    pub verified: bool,
    /// ISO-8601 creation timestamp, kept exactly as received.
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issuer_did: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_did: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caller_did: Option<String>,
    /// Fields sent by the backend that are not modelled above.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl CredentialRecord {
    /// Parse `created_at`, accepting any RFC 3339 offset.
    ///
    /// Returns `None` when the backend sent something unparseable; the raw
    /// string is still available for display.
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.created_at)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// The searchable text fields, in the order they are matched.
    pub(crate) fn searchable_fields(&self) -> impl Iterator<Item = &str> {
        [
            Some(self.execution_id.as_str()),
            Some(self.workflow_id.as_str()),
            self.session_id.as_deref(),
            self.reasoner_name.as_deref(),
            self.agent_name.as_deref(),
        ]
        .into_iter()
        .flatten()
    }
}

/// Parameters sent to the search endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    /// Raw status filter; `None` means every status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    pub limit: usize,
    pub offset: usize,
}

/// One page of search results.
///
/// Missing `credentials` or `total` are read as an empty page, not as an
/// error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub credentials: Vec<CredentialRecord>,
    #[serde(default)]
    pub total: usize,
}
