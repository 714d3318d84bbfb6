//! # Server-Side Filters
//!
//! The part of the filter state that is sent to the backend. Changing any
//! field of [`Filters`] invalidates the loaded pages; the free-text search
//! query is deliberately not part of this type because it never triggers a
//! refetch.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::record::SearchQuery;
use crate::time_range::TimeRange;

/// Status filter token: either every status or one raw backend status.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(String),
}

impl StatusFilter {
    /// Parse a filter token. `all` (any case) and the empty string mean
    /// every status.
    pub fn parse(token: &str) -> Self {
        let token = token.trim();
        if token.is_empty() || token.eq_ignore_ascii_case("all") {
            Self::All
        } else {
            Self::Only(token.to_string())
        }
    }

    /// The value for the `status` query parameter.
    pub fn as_param(&self) -> Option<&str> {
        match self {
            Self::All => None,
            Self::Only(status) => Some(status),
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_param().unwrap_or("all"))
    }
}

impl From<&str> for StatusFilter {
    fn from(token: &str) -> Self {
        Self::parse(token)
    }
}

impl Serialize for StatusFilter {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for StatusFilter {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let token = String::deserialize(deserializer)?;
        Ok(Self::parse(&token))
    }
}

/// Filters that scope the server-side result set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Filters {
    #[serde(default)]
    pub time_range: TimeRange,
    #[serde(default)]
    pub status: StatusFilter,
}

impl Filters {
    pub fn new(time_range: TimeRange, status: StatusFilter) -> Self {
        Self { time_range, status }
    }

    /// Build the search request for one page.
    pub fn to_query(&self, now: DateTime<Utc>, limit: usize, offset: usize) -> SearchQuery {
        let bounds = self.time_range.resolve(now);
        SearchQuery {
            start_time: bounds.start_param(),
            end_time: bounds.end_param(),
            status: self.status.as_param().map(str::to_string),
            limit,
            offset,
        }
    }
}
