//! # credlens-core — Foundational Types for Credential Browsing
//!
//! This crate is the leaf of the credlens workspace. It defines the
//! credential record as received from the backend, and the pure functions
//! that the paginated browser composes:
//!
//! - **Time ranges** (`time_range.rs`): symbolic tokens (`1h`, `24h`, `7d`,
//!   `30d`, `all`) resolved into absolute query bounds.
//! - **Status normalization** (`status.rs`): an explicit lookup table from
//!   raw backend status strings to the four canonical display states.
//! - **Search** (`search.rs`): case-insensitive substring refinement over
//!   already-fetched records.
//! - **Export** (`export.rs`): deterministic JSON documents for one or many
//!   records, delivered through an injected [`ExportSink`].
//! - **Client seam** (`client.rs`): the [`SearchClient`] trait implemented
//!   by the HTTP client and by test doubles.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `credlens-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - Records are never re-sorted or deduplicated; server order is preserved.

pub mod client;
pub mod display;
pub mod error;
pub mod export;
pub mod filters;
pub mod record;
pub mod search;
pub mod status;
pub mod time_range;

// Re-export primary types for ergonomic imports.
pub use client::SearchClient;
pub use display::{format_duration, workflow_route};
pub use error::CredlensError;
pub use export::{export_many, export_one, ExportDocument, ExportSink, MemorySink};
pub use filters::{Filters, StatusFilter};
pub use record::{CredentialRecord, SearchQuery, SearchResponse};
pub use search::filter;
pub use status::{BadgeVariant, CanonicalStatus, StatusTable};
pub use time_range::{TimeBounds, TimeRange};
