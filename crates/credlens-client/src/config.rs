//! Configuration for the credential search client.

use url::Url;
use zeroize::Zeroizing;

/// Default identity service location when `CREDLENS_API_URL` is unset.
pub const DEFAULT_API_URL: &str = "http://localhost:8080";

const API_URL_VAR: &str = "CREDLENS_API_URL";

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for the identity service.
#[derive(Clone)]
pub struct SearchApiConfig {
    /// Base URL of the control plane (e.g. `https://agents.example.com`).
    pub base_url: Url,
    /// Optional bearer token. Zeroed on drop.
    pub api_token: Option<Zeroizing<String>>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl std::fmt::Debug for SearchApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchApiConfig")
            .field("base_url", &self.base_url)
            .field("api_token", &self.api_token.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl SearchApiConfig {
    /// Configuration for `base_url` with no token and the default timeout.
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            api_token: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `CREDLENS_API_URL` (default: `http://localhost:8080`)
    /// - `CREDLENS_API_TOKEN` (optional)
    /// - `CREDLENS_TIMEOUT_SECS` (default: 30)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_with_base_url(None)
    }

    /// Like [`from_env`](Self::from_env), but an explicit `base_url` wins
    /// and `CREDLENS_API_URL` is not read at all.
    pub fn from_env_with_base_url(base_url: Option<&str>) -> Result<Self, ConfigError> {
        Self::from_lookup(base_url, |var| std::env::var(var).ok())
    }

    fn from_lookup(
        base_url: Option<&str>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let base_url = match base_url {
            Some(raw) => parse_url(raw, raw)?,
            None => {
                let raw = lookup(API_URL_VAR).unwrap_or_else(|| DEFAULT_API_URL.to_string());
                parse_url(API_URL_VAR, &raw)?
            }
        };
        let api_token = lookup("CREDLENS_API_TOKEN")
            .filter(|t| !t.is_empty())
            .map(Zeroizing::new);

        Ok(Self {
            base_url,
            api_token,
            timeout_secs: lookup("CREDLENS_TIMEOUT_SECS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        })
    }

    /// Configuration pointing to a local mock server (for testing).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidUrl` if the localhost URL cannot be parsed.
    pub fn local(port: u16) -> Result<Self, ConfigError> {
        let raw = format!("http://127.0.0.1:{port}");
        let base_url = Url::parse(&raw).map_err(|e| ConfigError::InvalidUrl(raw, e.to_string()))?;
        Ok(Self {
            base_url,
            api_token: None,
            timeout_secs: 5,
        })
    }

    /// Replace the bearer token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(Zeroizing::new(token.into()));
        self
    }

    /// Replace the base URL from an unparsed string.
    pub fn with_base_url(mut self, raw: &str) -> Result<Self, ConfigError> {
        self.base_url = parse_url(raw, raw)?;
        Ok(self)
    }
}

/// `source` names the origin in the error: the variable, or the raw value.
fn parse_url(source: &str, raw: &str) -> Result<Url, ConfigError> {
    Url::parse(raw).map_err(|e| ConfigError::InvalidUrl(source.to_string(), e.to_string()))
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
    #[error("API token contains characters not allowed in an HTTP header")]
    InvalidToken,
}
