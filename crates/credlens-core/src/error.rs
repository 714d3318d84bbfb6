//! # Error Types
//!
//! Every failure in the browsing core is scoped to a single user-visible
//! component state. None of them is fatal to the process.
//!
//! ## Propagation
//!
//! - `Network` during a reset clears the loaded list; during load-more it
//!   leaves the list untouched.
//! - `InvalidFilter` fails loudly instead of silently defaulting.
//! - `ClipboardUnavailable` is logged and swallowed by the caller.

use thiserror::Error;

/// Top-level error type for credlens.
#[derive(Error, Debug)]
pub enum CredlensError {
    /// Transport or HTTP failure reported by the search client.
    #[error("network error: {message}")]
    Network {
        /// Human-readable failure description, shown in the error banner.
        message: String,
    },

    /// A time-range token outside the closed token set.
    #[error("invalid filter: unrecognized time range {token:?}")]
    InvalidFilter {
        /// The rejected token.
        token: String,
    },

    /// The clipboard rejected a write.
    #[error("clipboard unavailable: {0}")]
    ClipboardUnavailable(String),

    /// An export document could not be delivered.
    #[error("export failed: {0}")]
    Export(String),

    /// JSON serialization of an export document failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CredlensError {
    /// Build a [`CredlensError::Network`] from any displayable failure.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Whether the error came from the search transport.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_error_displays_message() {
        let err = CredlensError::network("connection refused");
        assert!(err.is_network());
        assert_eq!(err.to_string(), "network error: connection refused");
    }

    #[test]
    fn invalid_filter_names_token() {
        let err = CredlensError::InvalidFilter {
            token: "90d".into(),
        };
        assert!(!err.is_network());
        assert!(err.to_string().contains("\"90d\""));
    }
}
