//! # credlens-cli — Command-Line Credential Browser
//!
//! Provides the `credlens` command, a terminal front end over
//! [`credlens_state::CredentialBrowser`].
//!
//! ## Subcommands
//!
//! - `credlens list` — Page through credentials and print rows.
//! - `credlens show` — Inspect one credential, optionally with its raw document.
//! - `credlens export` — Write one credential or the filtered set to disk.
//!
//! ```bash
//! credlens list --time-range 7d --status failed --pages 3
//! credlens list --search ws-42 --format json
//! credlens show exec-8f2c --raw
//! credlens export --status failed --out ./exports
//! ```
//!
//! ## Crate Policy
//!
//! - Argument parsing lives here; paging, filtering and export semantics
//!   live in `credlens-state`.
//! - Handlers return an exit code; errors bubble up as `anyhow::Error`.

pub mod config;
pub mod export;
pub mod list;
pub mod show;
pub mod sink;

use std::sync::Arc;

use anyhow::{bail, Result};
use clap::Args;

use credlens_client::HttpSearchClient;
use credlens_core::{ExportSink, Filters, MemorySink, SearchClient, StatusFilter, TimeRange};
use credlens_state::{CredentialBrowser, PageState};

use crate::config::CliConfig;

/// Resolved settings shared by every subcommand.
#[derive(Debug, Clone)]
pub struct Session {
    pub config: CliConfig,
    pub api_url: Option<String>,
}

impl Session {
    /// Build a browser backed by the HTTP client, delivering exports to
    /// `sink` (or nowhere, for read-only commands).
    pub fn browser(
        &self,
        sink: Option<Arc<dyn ExportSink>>,
    ) -> Result<CredentialBrowser<HttpSearchClient>> {
        let api = self.config.api_config(self.api_url.as_deref())?;
        tracing::debug!(?api, "connecting to identity service");
        let client = HttpSearchClient::new(api)?;
        let sink = sink.unwrap_or_else(|| Arc::new(MemorySink::new()) as Arc<dyn ExportSink>);
        Ok(CredentialBrowser::builder(client)
            .page_size(self.config.page_size())
            .status_table(self.config.status_table())
            .sink(sink)
            .build())
    }
}

/// Filter flags shared by `list`, `show` and `export`.
#[derive(Args, Debug, Clone)]
pub struct FilterArgs {
    /// Time window: 1h, 24h, 7d, 30d or all.
    #[arg(long, short = 't', default_value = "24h")]
    pub time_range: TimeRange,

    /// Raw backend status to match, or "all".
    #[arg(long, short = 's', default_value = "all")]
    pub status: String,

    /// Case-insensitive text matched against execution, workflow, session,
    /// reasoner and agent.
    #[arg(long, short = 'q', default_value = "")]
    pub search: String,

    /// Maximum number of pages to fetch.
    #[arg(long, default_value_t = 1)]
    pub pages: usize,
}

impl FilterArgs {
    pub fn filters(&self) -> Filters {
        Filters::new(self.time_range, StatusFilter::parse(&self.status))
    }
}

/// Reset to page 0 for the filters in `args`, then load up to
/// `args.pages` pages in total and apply the search query.
///
/// A failed first page is an error. A failed later page keeps what was
/// loaded and is reported as a warning.
pub async fn load_pages<C: SearchClient>(
    browser: &CredentialBrowser<C>,
    args: &FilterArgs,
) -> Result<PageState> {
    let mut state = browser.load_with(args.filters()).await;
    if let Some(err) = &state.error {
        bail!("failed to load credentials: {err}");
    }
    for _ in 1..args.pages.max(1) {
        if !state.can_load_more() {
            break;
        }
        state = browser.load_more().await;
        if let Some(err) = &state.error {
            tracing::warn!(loaded = state.items.len(), "stopped loading pages: {err}");
            break;
        }
    }
    browser.set_search_query(args.search.as_str());
    Ok(state)
}

/// Load pages until a credential whose `vc_id` or `execution_id` is `id`
/// is found, then open it. Gives up after `args.pages` pages, or when the
/// server has nothing more. Returns whether it was found.
pub async fn locate<C: SearchClient>(
    browser: &CredentialBrowser<C>,
    args: &FilterArgs,
    id: &str,
) -> Result<bool> {
    let mut state = browser.load_with(args.filters()).await;
    let mut pages = 1;
    loop {
        if let Some(err) = &state.error {
            bail!("failed to load credentials: {err}");
        }
        if browser.open_by_id(id) {
            return Ok(true);
        }
        if !state.can_load_more() || pages >= args.pages.max(1) {
            return Ok(false);
        }
        state = browser.load_more().await;
        pages += 1;
    }
}


#[cfg(test)]
mod tests {
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::testing::*;
    use super::*;

    #[tokio::test]
    async fn load_pages_stops_at_page_limit() {
        let server = serve(10, 3).await;
        let browser = session(&server, 3).browser(None).unwrap();

        let state = load_pages(&browser, &filter_args(2, "")).await.unwrap();
        assert_eq!(state.items.len(), 6);
        assert!(state.has_more);
    }

    #[tokio::test]
    async fn load_pages_stops_when_exhausted() {
        let server = serve(5, 3).await;
        let browser = session(&server, 3).browser(None).unwrap();

        let state = load_pages(&browser, &filter_args(10, "")).await.unwrap();
        assert_eq!(state.items.len(), 5);
        assert!(!state.has_more);
    }

    #[tokio::test]
    async fn load_pages_fails_on_first_page_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;
        let browser = session(&server, 3).browser(None).unwrap();

        let err = load_pages(&browser, &filter_args(1, "")).await.unwrap_err();
        assert!(err.to_string().contains("bad gateway"), "{err}");
    }

    #[tokio::test]
    async fn locate_walks_pages() {
        let server = serve(10, 3).await;
        let browser = session(&server, 3).browser(None).unwrap();

        assert!(locate(&browser, &filter_args(5, ""), "exec-7").await.unwrap());
        assert_eq!(browser.state().items.len(), 9);
        assert_eq!(
            browser.view().inspected().map(|r| r.vc_id.clone()),
            Some("vc-7".to_string())
        );
    }

    #[tokio::test]
    async fn locate_reports_missing() {
        let server = serve(4, 3).await;
        let browser = session(&server, 3).browser(None).unwrap();
        assert!(!locate(&browser, &filter_args(5, ""), "exec-99").await.unwrap());
    }
}
