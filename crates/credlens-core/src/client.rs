//! # Search Client Seam
//!
//! The credential backend is an external collaborator. The browser talks to
//! it only through [`SearchClient`], which lets the HTTP client, test
//! doubles, and any future transport plug into the same pagination logic.
//!
//! Implementations map every transport, HTTP, or decoding failure to
//! [`CredlensError::Network`]. A response with missing `credentials` or
//! `total` is a valid empty page, not a failure.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::CredlensError;
use crate::record::{SearchQuery, SearchResponse};

/// Executes one credential search request.
#[async_trait]
pub trait SearchClient: Send + Sync {
    async fn search(&self, query: &SearchQuery) -> Result<SearchResponse, CredlensError>;
}

#[async_trait]
impl<T: SearchClient + ?Sized> SearchClient for Arc<T> {
    async fn search(&self, query: &SearchQuery) -> Result<SearchResponse, CredlensError> {
        (**self).search(query).await
    }
}
