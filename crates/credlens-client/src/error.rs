//! Search API client error types.

use credlens_core::CredlensError;

/// Errors from credential search calls.
#[derive(Debug, thiserror::Error)]
pub enum SearchApiError {
    /// HTTP transport error.
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        source: reqwest::Error,
    },
    /// The identity service returned a non-2xx status.
    #[error("identity service {endpoint} returned {status}: {body}")]
    ApiError {
        endpoint: String,
        status: u16,
        body: String,
    },
    /// Response deserialization failed.
    #[error("failed to deserialize response from {endpoint}: {source}")]
    Deserialization {
        endpoint: String,
        source: reqwest::Error,
    },
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] super::config::ConfigError),
}

impl From<SearchApiError> for CredlensError {
    fn from(err: SearchApiError) -> Self {
        CredlensError::network(err.to_string())
    }
}
