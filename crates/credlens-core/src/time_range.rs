//! # Time Ranges — Symbolic Tokens to Absolute Bounds
//!
//! The browser filters credentials by a symbolic range token rather than
//! explicit timestamps. This module owns the closed token set and the
//! conversion into the `start_time` / `end_time` bounds consumed by the
//! search client.
//!
//! ## Tokens
//!
//! | Token | Window |
//! |-------|--------|
//! | `1h`  | last hour |
//! | `24h` | last 24 hours (default) |
//! | `7d`  | last 7 days |
//! | `30d` | last 30 days |
//! | `all` | unbounded |
//!
//! Unknown tokens are rejected at parse time with
//! [`CredlensError::InvalidFilter`]; there is no silent fallback.
//!
//! ## Wire Format
//!
//! Bounds are rendered as RFC 3339 UTC with millisecond precision and a `Z`
//! suffix (e.g. `2026-01-15T12:00:00.000Z`).

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CredlensError;

/// A symbolic time-range filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TimeRange {
    /// Last hour.
    LastHour,
    /// Last 24 hours.
    #[default]
    LastDay,
    /// Last 7 days.
    LastWeek,
    /// Last 30 days.
    LastMonth,
    /// No time bounds.
    All,
}

/// Absolute query bounds produced by [`TimeRange::resolve`].
///
/// Both fields are `None` for [`TimeRange::All`], meaning "unbounded".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeBounds {
    /// Inclusive lower bound.
    pub start: Option<DateTime<Utc>>,
    /// Upper bound; always the resolution instant when bounded.
    pub end: Option<DateTime<Utc>>,
}

impl TimeBounds {
    /// Whether the bounds restrict the query at all.
    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// `start` rendered for the wire.
    pub fn start_param(&self) -> Option<String> {
        self.start.map(to_wire)
    }

    /// `end` rendered for the wire.
    pub fn end_param(&self) -> Option<String> {
        self.end.map(to_wire)
    }
}

impl TimeRange {
    /// Every token, in the order a filter picker lists them.
    pub const ALL: [TimeRange; 5] = [
        Self::LastHour,
        Self::LastDay,
        Self::LastWeek,
        Self::LastMonth,
        Self::All,
    ];

    /// The symbolic token.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LastHour => "1h",
            Self::LastDay => "24h",
            Self::LastWeek => "7d",
            Self::LastMonth => "30d",
            Self::All => "all",
        }
    }

    /// Parse a symbolic token.
    ///
    /// # Errors
    ///
    /// Returns [`CredlensError::InvalidFilter`] for anything outside the
    /// closed token set.
    pub fn parse(token: &str) -> Result<Self, CredlensError> {
        match token {
            "1h" => Ok(Self::LastHour),
            "24h" => Ok(Self::LastDay),
            "7d" => Ok(Self::LastWeek),
            "30d" => Ok(Self::LastMonth),
            "all" => Ok(Self::All),
            other => Err(CredlensError::InvalidFilter {
                token: other.to_string(),
            }),
        }
    }

    /// Width of the window, or `None` when unbounded.
    pub fn window(&self) -> Option<Duration> {
        match self {
            Self::LastHour => Some(Duration::hours(1)),
            Self::LastDay => Some(Duration::hours(24)),
            Self::LastWeek => Some(Duration::days(7)),
            Self::LastMonth => Some(Duration::days(30)),
            Self::All => None,
        }
    }

    /// Resolve into absolute bounds ending at `now`.
    pub fn resolve(&self, now: DateTime<Utc>) -> TimeBounds {
        match self.window() {
            Some(window) => TimeBounds {
                start: Some(now - window),
                end: Some(now),
            },
            None => TimeBounds::default(),
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeRange {
    type Err = CredlensError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for TimeRange {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TimeRange {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let token = String::deserialize(deserializer)?;
        Self::parse(&token).map_err(serde::de::Error::custom)
    }
}

fn to_wire(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}
