//! # Pagination Controller
//!
//! Owns the offset/limit bookkeeping for the credential list and merges
//! server pages into one append-only sequence.
//!
//! ## Operations
//!
//! ```text
//!            reset(filters)                     load_more()
//!   ┌──────────────────────────────┐   ┌──────────────────────────────┐
//!   │ offset = 0                   │   │ no-op unless has_more and    │
//!   │ items  = first page          │   │ nothing is in flight         │
//!   │ on error: items = []         │   │ offset += page_size          │
//!   └──────────────────────────────┘   │ items  = items ++ next page  │
//!                                      │ on error: items unchanged    │
//!                                      └──────────────────────────────┘
//! ```
//!
//! After every applied response `has_more == total > offset + page_size`.
//!
//! ## Ordering
//!
//! Every fetch takes a ticket from a monotonically increasing request
//! token. A response is applied only if its ticket is still the latest one;
//! anything else belongs to a superseded request and is discarded. Requests
//! are never aborted, only ignored. A `reset` may supersede an in-flight
//! fetch; `load_more` never starts while another fetch is in flight.
//!
//! The state lock is a `parking_lot::Mutex` that is never held across an
//! `.await`, so overlapping `reset` / `load_more` futures always observe a
//! consistent snapshot.
//!
//! ## Cancellation
//!
//! A `reset` or `load_more` future dropped before its response arrives
//! releases its busy flag, provided no newer fetch has taken over. A dropped
//! `load_more` leaves offset and items untouched, so the next call asks for
//! the same page. A dropped `reset` leaves the list empty, as a failed reset
//! would, and `refresh` retries it.

use std::sync::Arc;

use credlens_core::{CredentialRecord, Filters, SearchClient, SearchQuery};
use parking_lot::Mutex;

use crate::clock::{Clock, SystemClock};

/// Number of credentials requested per page.
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// Snapshot of the paginated result set and its busy/error flags.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageState {
    /// Loaded credentials in fetch order.
    pub items: Vec<CredentialRecord>,
    /// Offset of the most recently applied page.
    pub offset: usize,
    /// Whether the server reported more results past the loaded pages.
    pub has_more: bool,
    /// Last server-reported total. Advisory only.
    pub total: usize,
    /// A reset is in flight.
    pub loading: bool,
    /// A load-more is in flight.
    pub loading_more: bool,
    /// Message of the last failed fetch, cleared by the next reset.
    pub error: Option<String>,
}

impl PageState {
    /// Whether a "load more" affordance should be offered.
    pub fn can_load_more(&self) -> bool {
        self.has_more && !self.loading && !self.loading_more
    }

    fn is_busy(&self) -> bool {
        self.loading || self.loading_more
    }
}

#[derive(Debug)]
struct Inner {
    state: PageState,
    filters: Filters,
    /// Query of page 0 for the current reset epoch. Load-more reuses its
    /// time bounds so every page of an epoch covers the same window.
    epoch_query: Option<SearchQuery>,
    latest_token: u64,
}

#[derive(Debug, Clone, Copy)]
enum FetchKind {
    Reset,
    LoadMore,
}

/// Held across the search `.await`. Clears the busy flag if the fetch is
/// abandoned while it still owns the latest token.
struct InFlight<'a> {
    inner: &'a Mutex<Inner>,
    token: u64,
    kind: FetchKind,
    armed: bool,
}

impl<'a> InFlight<'a> {
    fn new(inner: &'a Mutex<Inner>, token: u64, kind: FetchKind) -> Self {
        Self {
            inner,
            token,
            kind,
            armed: true,
        }
    }

    /// The response arrived; the caller applies or discards it.
    fn complete(mut self) {
        self.armed = false;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut inner = self.inner.lock();
        if inner.latest_token != self.token {
            return;
        }
        let state = &mut inner.state;
        match self.kind {
            FetchKind::Reset => {
                state.loading = false;
                state.offset = 0;
                state.items = Vec::new();
                state.total = 0;
                state.has_more = false;
            }
            FetchKind::LoadMore => state.loading_more = false,
        }
        tracing::debug!(token = self.token, kind = ?self.kind, "fetch abandoned before response");
    }
}

/// Drives paginated credential search through a [`SearchClient`].
pub struct PaginationController<C> {
    client: C,
    clock: Arc<dyn Clock>,
    page_size: usize,
    inner: Mutex<Inner>,
}

impl<C: SearchClient> PaginationController<C> {
    /// Create a controller with the default page size and the system clock.
    pub fn new(client: C) -> Self {
        Self::with_options(client, DEFAULT_PAGE_SIZE, Arc::new(SystemClock))
    }

    /// Create a controller with an explicit page size and clock.
    ///
    /// A zero page size is raised to one.
    pub fn with_options(client: C, page_size: usize, clock: Arc<dyn Clock>) -> Self {
        Self {
            client,
            clock,
            page_size: page_size.max(1),
            inner: Mutex::new(Inner {
                state: PageState::default(),
                filters: Filters::default(),
                epoch_query: None,
                latest_token: 0,
            }),
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Current snapshot.
    pub fn state(&self) -> PageState {
        self.inner.lock().state.clone()
    }

    /// Filters of the current reset epoch.
    pub fn filters(&self) -> Filters {
        self.inner.lock().filters.clone()
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Replace the result set with page 0 for `filters`.
    ///
    /// Supersedes any fetch still in flight. On failure the list is
    /// emptied and the error message is recorded.
    pub async fn reset(&self, filters: Filters) -> PageState {
        let (token, query) = {
            let mut inner = self.inner.lock();
            inner.latest_token += 1;
            let query = filters.to_query(self.clock.now(), self.page_size, 0);
            inner.filters = filters;
            inner.epoch_query = Some(query.clone());
            inner.state.loading = true;
            inner.state.loading_more = false;
            inner.state.error = None;
            (inner.latest_token, query)
        };

        tracing::debug!(token, limit = query.limit, "resetting credential list");
        let in_flight = InFlight::new(&self.inner, token, FetchKind::Reset);
        let result = self.client.search(&query).await;
        in_flight.complete();

        let mut inner = self.inner.lock();
        if inner.latest_token != token {
            tracing::debug!(token, latest = inner.latest_token, "discarding stale reset response");
            return inner.state.clone();
        }

        let state = &mut inner.state;
        state.loading = false;
        state.offset = 0;
        match result {
            Ok(page) => {
                state.items = page.credentials;
                state.total = page.total;
                state.has_more = page.total > self.page_size;
                tracing::info!(
                    loaded = state.items.len(),
                    total = state.total,
                    has_more = state.has_more,
                    "credential list reset"
                );
            }
            Err(e) => {
                tracing::warn!("failed to fetch credentials: {e}");
                state.items = Vec::new();
                state.total = 0;
                state.has_more = false;
                state.error = Some(e.to_string());
            }
        }
        state.clone()
    }

    /// Re-run page 0 with the current filters.
    pub async fn refresh(&self) -> PageState {
        let filters = self.filters();
        self.reset(filters).await
    }

    /// Append the next page.
    ///
    /// Returns the current state unchanged when there is nothing more to
    /// load or a fetch is already in flight. On failure the loaded items
    /// are kept and the error message is recorded.
    pub async fn load_more(&self) -> PageState {
        let (token, query) = {
            let mut inner = self.inner.lock();
            if !inner.state.has_more || inner.state.is_busy() {
                return inner.state.clone();
            }
            let Some(epoch_query) = inner.epoch_query.clone() else {
                return inner.state.clone();
            };
            inner.latest_token += 1;
            inner.state.loading_more = true;
            let query = SearchQuery {
                offset: inner.state.offset + self.page_size,
                ..epoch_query
            };
            (inner.latest_token, query)
        };

        tracing::debug!(token, offset = query.offset, limit = query.limit, "loading more credentials");
        let in_flight = InFlight::new(&self.inner, token, FetchKind::LoadMore);
        let result = self.client.search(&query).await;
        in_flight.complete();

        let mut inner = self.inner.lock();
        if inner.latest_token != token {
            tracing::debug!(token, latest = inner.latest_token, "discarding stale load-more response");
            return inner.state.clone();
        }

        let state = &mut inner.state;
        state.loading_more = false;
        match result {
            Ok(page) => {
                state.items.extend(page.credentials);
                state.offset = query.offset;
                state.total = page.total;
                state.has_more = page.total > query.offset + self.page_size;
                state.error = None;
                tracing::info!(
                    loaded = state.items.len(),
                    offset = state.offset,
                    total = state.total,
                    has_more = state.has_more,
                    "appended credential page"
                );
            }
            Err(e) => {
                tracing::warn!(offset = query.offset, "failed to load more credentials: {e}");
                state.error = Some(e.to_string());
            }
        }
        state.clone()
    }
}
