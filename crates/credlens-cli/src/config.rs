//! # CLI Configuration
//!
//! Optional YAML file passed with `--config`:
//!
//! ```yaml
//! api_url: https://agents.example.com
//! page_size: 100
//! status_map:
//!   cancelled_by_user: failed
//!   awaiting_approval: pending
//! ```
//!
//! Precedence: command-line flags, then the file, then `CREDLENS_*`
//! environment variables and built-in defaults.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use credlens_client::SearchApiConfig;
use credlens_core::{CanonicalStatus, StatusTable};
use credlens_state::DEFAULT_PAGE_SIZE;

/// Contents of the `--config` file. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default)]
    pub page_size: Option<usize>,
    /// Raw status → canonical status, layered over the default table.
    #[serde(default)]
    pub status_map: BTreeMap<String, CanonicalStatus>,
}

impl CliConfig {
    /// Read the config file, or return defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("invalid config: {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Connection settings after applying the file and `api_url_flag` over
    /// the environment. `CREDLENS_API_URL` is only consulted when neither
    /// gives a URL.
    pub fn api_config(&self, api_url_flag: Option<&str>) -> Result<SearchApiConfig> {
        let base_url = api_url_flag.or(self.api_url.as_deref());
        Ok(SearchApiConfig::from_env_with_base_url(base_url)?)
    }

    pub fn page_size(&self) -> usize {
        self.page_size.unwrap_or(DEFAULT_PAGE_SIZE)
    }

    pub fn status_table(&self) -> StatusTable {
        StatusTable::default().with_overrides(&self.status_map)
    }
}
