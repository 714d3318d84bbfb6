//! # Status Normalization
//!
//! The backend reports execution status as a free-form string. The display
//! layer only knows four canonical states, which select the badge variant
//! and whether the live indicator animates.
//!
//! The mapping is a contract with the backend vocabulary, so it is an
//! explicit, enumerated [`StatusTable`] rather than a heuristic. The default
//! table covers the vocabulary the workflow platform is known to emit;
//! deployments extend or override it from configuration. Lookups are
//! case-insensitive and ignore surrounding whitespace. Anything not in the
//! table is shown as [`CanonicalStatus::Pending`].

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// The four display states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CanonicalStatus {
    Succeeded,
    Failed,
    Pending,
    Running,
}

/// Badge styling derived from a canonical status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeVariant {
    Success,
    Failed,
    Pending,
}

impl CanonicalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
            Self::Pending => "pending",
            Self::Running => "running",
        }
    }

    /// `succeeded` → success, `failed` → failed, everything else pending.
    pub fn badge(&self) -> BadgeVariant {
        match self {
            Self::Succeeded => BadgeVariant::Success,
            Self::Failed => BadgeVariant::Failed,
            Self::Pending | Self::Running => BadgeVariant::Pending,
        }
    }

    /// Only running executions get an animated live indicator.
    pub fn is_animated(&self) -> bool {
        matches!(self, Self::Running)
    }
}

impl fmt::Display for CanonicalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl BadgeVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failed => "failed",
            Self::Pending => "pending",
        }
    }
}

impl fmt::Display for BadgeVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Default backend vocabulary.
const DEFAULT_VOCABULARY: &[(&str, CanonicalStatus)] = &[
    ("succeeded", CanonicalStatus::Succeeded),
    ("success", CanonicalStatus::Succeeded),
    ("successful", CanonicalStatus::Succeeded),
    ("completed", CanonicalStatus::Succeeded),
    ("complete", CanonicalStatus::Succeeded),
    ("done", CanonicalStatus::Succeeded),
    ("failed", CanonicalStatus::Failed),
    ("failure", CanonicalStatus::Failed),
    ("error", CanonicalStatus::Failed),
    ("errored", CanonicalStatus::Failed),
    ("timeout", CanonicalStatus::Failed),
    ("timed_out", CanonicalStatus::Failed),
    ("cancelled", CanonicalStatus::Failed),
    ("canceled", CanonicalStatus::Failed),
    ("running", CanonicalStatus::Running),
    ("in_progress", CanonicalStatus::Running),
    ("processing", CanonicalStatus::Running),
    ("executing", CanonicalStatus::Running),
    ("pending", CanonicalStatus::Pending),
    ("queued", CanonicalStatus::Pending),
    ("waiting", CanonicalStatus::Pending),
    ("scheduled", CanonicalStatus::Pending),
    ("unknown", CanonicalStatus::Pending),
];

/// Raw status → canonical status lookup table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<String, CanonicalStatus>",
    into = "BTreeMap<String, CanonicalStatus>"
)]
pub struct StatusTable {
    entries: BTreeMap<String, CanonicalStatus>,
}

impl From<BTreeMap<String, CanonicalStatus>> for StatusTable {
    fn from(map: BTreeMap<String, CanonicalStatus>) -> Self {
        Self::empty().with_overrides(&map)
    }
}

impl From<StatusTable> for BTreeMap<String, CanonicalStatus> {
    fn from(table: StatusTable) -> Self {
        table.entries
    }
}

impl Default for StatusTable {
    fn default() -> Self {
        let mut table = Self::empty();
        for (raw, canonical) in DEFAULT_VOCABULARY {
            table.insert(raw, *canonical);
        }
        table
    }
}

impl StatusTable {
    /// A table with no entries; every status normalizes to pending.
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Add or replace a mapping.
    pub fn insert(&mut self, raw: &str, canonical: CanonicalStatus) {
        self.entries.insert(key(raw), canonical);
    }

    /// Layer `overrides` on top of this table.
    pub fn with_overrides<'a>(
        mut self,
        overrides: impl IntoIterator<Item = (&'a String, &'a CanonicalStatus)>,
    ) -> Self {
        for (raw, canonical) in overrides {
            self.insert(raw, *canonical);
        }
        self
    }

    /// Look up a raw status without the pending fallback.
    pub fn get(&self, raw: &str) -> Option<CanonicalStatus> {
        self.entries.get(&key(raw)).copied()
    }

    pub fn normalize(&self, raw: &str) -> CanonicalStatus {
        self.get(raw).unwrap_or(CanonicalStatus::Pending)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn key(raw: &str) -> String {
    raw.trim().to_lowercase()
}
