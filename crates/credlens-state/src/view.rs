//! # List and Detail View Models
//!
//! [`ViewState`] is the two-state list/detail machine:
//!
//! ```text
//!   Listing ──open(record)──▶ Inspecting { record, raw_expanded: false }
//!      ▲                              │
//!      └────────────back──────────────┘
//! ```
//!
//! There is no detail-of-detail state: `open` while inspecting is rejected.
//!
//! [`CredentialRow`] is the per-row projection rendered by the list.

use credlens_core::display::EMPTY_CELL;
use credlens_core::{
    format_duration, workflow_route, BadgeVariant, CanonicalStatus, CredentialRecord, StatusTable,
};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ViewState {
    #[default]
    Listing,
    Inspecting {
        record: Box<CredentialRecord>,
        /// Whether the raw JSON document is expanded.
        raw_expanded: bool,
    },
}

impl ViewState {
    /// `Listing -> Inspecting(record)`. Returns `false` (and stays put)
    /// when already inspecting.
    pub fn open(&mut self, record: CredentialRecord) -> bool {
        match self {
            Self::Listing => {
                *self = Self::Inspecting {
                    record: Box::new(record),
                    raw_expanded: false,
                };
                true
            }
            Self::Inspecting { .. } => false,
        }
    }

    /// `Inspecting -> Listing`. No-op while listing.
    pub fn back(&mut self) {
        *self = Self::Listing;
    }

    /// Flip the raw-document flag. Returns the new value, or `None` while
    /// listing.
    pub fn toggle_raw(&mut self) -> Option<bool> {
        match self {
            Self::Listing => None,
            Self::Inspecting { raw_expanded, .. } => {
                *raw_expanded = !*raw_expanded;
                Some(*raw_expanded)
            }
        }
    }

    pub fn inspected(&self) -> Option<&CredentialRecord> {
        match self {
            Self::Listing => None,
            Self::Inspecting { record, .. } => Some(record),
        }
    }

    pub fn is_raw_expanded(&self) -> bool {
        matches!(self, Self::Inspecting { raw_expanded: true, .. })
    }
}

/// One rendered row of the credential list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CredentialRow {
    pub vc_id: String,
    pub execution_id: String,
    pub workflow_id: String,
    pub workflow_route: String,
    pub reasoner: String,
    pub raw_status: String,
    pub status: CanonicalStatus,
    pub badge: BadgeVariant,
    /// Live indicator animates for running executions only.
    pub animated: bool,
    pub duration: String,
    pub verified: bool,
    pub created_at: String,
}

impl CredentialRow {
    pub fn new(record: &CredentialRecord, statuses: &StatusTable) -> Self {
        let status = statuses.normalize(&record.status);
        Self {
            vc_id: record.vc_id.clone(),
            execution_id: record.execution_id.clone(),
            workflow_id: record.workflow_id.clone(),
            workflow_route: workflow_route(&record.workflow_id),
            reasoner: record
                .reasoner_name
                .clone()
                .unwrap_or_else(|| EMPTY_CELL.to_string()),
            raw_status: record.status.clone(),
            status,
            badge: status.badge(),
            animated: status.is_animated(),
            duration: format_duration(record.duration_ms),
            verified: record.verified,
            created_at: record.created_at.clone(),
        }
    }
}
