//! # credlens-client — HTTP client for credential search
//!
//! Typed access to the identity service's credential search endpoint:
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | GET    | `/api/ui/v1/identity/credentials/search` | Search credentials |
//!
//! Query parameters are `start_time`, `end_time`, `status`, `limit`,
//! `offset`; absent values are not sent. The response body is
//! `{"credentials": [...], "total": n}`, and either field may be missing.
//!
//! ## Error Mapping
//!
//! Connect failures and timeouts are retried with backoff inside the
//! configured timeout (see `retry`). Non-2xx statuses and undecodable
//! bodies fail immediately. Every failure surfaces
//! to the browser as [`credlens_core::CredlensError::Network`].

pub mod config;
pub mod error;
pub(crate) mod retry;

pub use config::{ConfigError, SearchApiConfig};
pub use error::SearchApiError;

use std::time::Duration;

use async_trait::async_trait;
use credlens_core::{CredlensError, SearchClient, SearchQuery, SearchResponse};

use crate::retry::RetryPolicy;

/// Path of the search endpoint, relative to the base URL.
const SEARCH_PATH: &str = "api/ui/v1/identity/credentials/search";

/// Credential search client backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpSearchClient {
    http: reqwest::Client,
    search_url: String,
    retry: RetryPolicy,
}

impl HttpSearchClient {
    /// Create a new client from configuration.
    pub fn new(config: SearchApiConfig) -> Result<Self, SearchApiError> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/json"),
        );
        if let Some(token) = &config.api_token {
            headers.insert(
                reqwest::header::AUTHORIZATION,
                reqwest::header::HeaderValue::from_str(&format!("Bearer {}", token.as_str()))
                    .map_err(|_| SearchApiError::Config(ConfigError::InvalidToken))?,
            );
        }

        let timeout = Duration::from_secs(config.timeout_secs);
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| SearchApiError::Http {
                endpoint: "client_init".into(),
                source: e,
            })?;

        let search_url = format!(
            "{}/{SEARCH_PATH}",
            config.base_url.as_str().trim_end_matches('/')
        );
        Ok(Self {
            http,
            search_url,
            retry: RetryPolicy::within(timeout),
        })
    }

    /// Create a client from `CREDLENS_*` environment variables.
    pub fn from_env() -> Result<Self, SearchApiError> {
        Self::new(SearchApiConfig::from_env()?)
    }

    /// The fully-qualified search URL.
    pub fn search_url(&self) -> &str {
        &self.search_url
    }

    /// Run one search request.
    ///
    /// Calls `GET {base}/api/ui/v1/identity/credentials/search`.
    pub async fn search_credentials(
        &self,
        query: &SearchQuery,
    ) -> Result<SearchResponse, SearchApiError> {
        let endpoint = "GET /identity/credentials/search".to_string();

        tracing::debug!(
            limit = query.limit,
            offset = query.offset,
            status = query.status.as_deref().unwrap_or("all"),
            "searching credentials"
        );

        let resp = self
            .retry
            .send(|| self.http.get(&self.search_url).query(query).send())
            .await
            .map_err(|e| SearchApiError::Http {
                endpoint: endpoint.clone(),
                source: e,
            })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(SearchApiError::ApiError {
                endpoint,
                status,
                body,
            });
        }

        resp.json().await.map_err(|e| SearchApiError::Deserialization {
            endpoint,
            source: e,
        })
    }
}

#[async_trait]
impl SearchClient for HttpSearchClient {
    async fn search(&self, query: &SearchQuery) -> Result<SearchResponse, CredlensError> {
        Ok(self.search_credentials(query).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_url_joins_without_double_slash() {
        let client = HttpSearchClient::new(SearchApiConfig::local(9000).unwrap()).unwrap();
        assert_eq!(
            client.search_url(),
            "http://127.0.0.1:9000/api/ui/v1/identity/credentials/search"
        );
    }

    #[test]
    fn search_url_keeps_base_path() {
        let config = SearchApiConfig::local(9000)
            .unwrap()
            .with_base_url("https://agents.example.com/control/")
            .unwrap();
        let client = HttpSearchClient::new(config).unwrap();
        assert_eq!(
            client.search_url(),
            "https://agents.example.com/control/api/ui/v1/identity/credentials/search"
        );
    }

    #[test]
    fn retry_budget_follows_configured_timeout() {
        let client = HttpSearchClient::new(SearchApiConfig::local(9000).unwrap()).unwrap();
        assert_eq!(client.retry, RetryPolicy::within(Duration::from_secs(5)));
    }

    #[test]
    fn rejects_token_with_newline() {
        let config = SearchApiConfig::local(9000).unwrap().with_token("bad\ntoken");
        let err = HttpSearchClient::new(config).unwrap_err();
        assert!(matches!(err, SearchApiError::Config(ConfigError::InvalidToken)));
    }
}
