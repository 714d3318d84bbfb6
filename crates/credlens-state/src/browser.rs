//! # Credential Browser
//!
//! Composes pagination, client-side search, status normalization, the
//! list/detail view machine, copy feedback and export into the object a
//! front end drives.
//!
//! ## Refetch Rules
//!
//! | Change | Effect |
//! |--------|--------|
//! | time range | reset to page 0 |
//! | status | reset to page 0 |
//! | search query | re-filter loaded items, no request |
//!
//! Setting a filter to its current value does nothing.
//!
//! All methods take `&self`; UI state is held behind a `parking_lot::Mutex`
//! that is released before any `.await`.

use std::sync::Arc;

use credlens_core::{
    export_many, export_one, search, CredentialRecord, CredlensError, ExportSink, Filters,
    MemorySink, SearchClient, StatusFilter, StatusTable, TimeRange,
};
use parking_lot::Mutex;

use crate::clipboard::{Clipboard, CopyTracker, MemoryClipboard};
use crate::clock::{Clock, SystemClock};
use crate::pagination::{PageState, PaginationController, DEFAULT_PAGE_SIZE};
use crate::view::{CredentialRow, ViewState};

#[derive(Debug, Default)]
struct UiState {
    search_query: String,
    view: ViewState,
}

/// Builder for [`CredentialBrowser`].
pub struct BrowserBuilder<C> {
    client: C,
    page_size: usize,
    statuses: StatusTable,
    clock: Arc<dyn Clock>,
    clipboard: Arc<dyn Clipboard>,
    sink: Arc<dyn ExportSink>,
}

impl<C: SearchClient> BrowserBuilder<C> {
    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn status_table(mut self, statuses: StatusTable) -> Self {
        self.statuses = statuses;
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn clipboard(mut self, clipboard: Arc<dyn Clipboard>) -> Self {
        self.clipboard = clipboard;
        self
    }

    pub fn sink(mut self, sink: Arc<dyn ExportSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn build(self) -> CredentialBrowser<C> {
        CredentialBrowser {
            controller: PaginationController::with_options(
                self.client,
                self.page_size,
                self.clock.clone(),
            ),
            statuses: self.statuses,
            clock: self.clock,
            clipboard: self.clipboard,
            sink: self.sink,
            copies: CopyTracker::new(),
            ui: Mutex::new(UiState::default()),
        }
    }
}

/// Paginated, filterable, exportable view over the credential search API.
pub struct CredentialBrowser<C> {
    controller: PaginationController<C>,
    statuses: StatusTable,
    clock: Arc<dyn Clock>,
    clipboard: Arc<dyn Clipboard>,
    sink: Arc<dyn ExportSink>,
    copies: CopyTracker,
    ui: Mutex<UiState>,
}

impl<C: SearchClient> CredentialBrowser<C> {
    /// Start building a browser. Defaults: 50 per page, the default status
    /// table, the system clock, and in-memory clipboard and export sink.
    pub fn builder(client: C) -> BrowserBuilder<C> {
        BrowserBuilder {
            client,
            page_size: DEFAULT_PAGE_SIZE,
            statuses: StatusTable::default(),
            clock: Arc::new(SystemClock),
            clipboard: Arc::new(MemoryClipboard::new()),
            sink: Arc::new(MemorySink::new()),
        }
    }

    pub fn controller(&self) -> &PaginationController<C> {
        &self.controller
    }

    pub fn status_table(&self) -> &StatusTable {
        &self.statuses
    }

    // ── Fetching ────────────────────────────────────────────────────────

    /// Load page 0 for the current filters.
    pub async fn load(&self) -> PageState {
        self.controller.refresh().await
    }

    /// Load page 0 for `filters`, even if they equal the current ones.
    pub async fn load_with(&self, filters: Filters) -> PageState {
        self.controller.reset(filters).await
    }

    pub async fn refresh(&self) -> PageState {
        self.controller.refresh().await
    }

    pub async fn load_more(&self) -> PageState {
        self.controller.load_more().await
    }

    pub fn state(&self) -> PageState {
        self.controller.state()
    }

    pub fn filters(&self) -> Filters {
        self.controller.filters()
    }

    /// Replace both server-side filters, resetting if either changed.
    pub async fn set_filters(&self, filters: Filters) -> PageState {
        if filters == self.controller.filters() {
            return self.controller.state();
        }
        tracing::debug!(
            time_range = %filters.time_range,
            status = %filters.status,
            "filters changed"
        );
        self.controller.reset(filters).await
    }

    pub async fn set_time_range(&self, time_range: TimeRange) -> PageState {
        let filters = Filters {
            time_range,
            ..self.controller.filters()
        };
        self.set_filters(filters).await
    }

    /// Set the time range from its token. Unknown tokens fail with
    /// [`CredlensError::InvalidFilter`] and leave the list untouched.
    pub async fn set_time_range_token(&self, token: &str) -> Result<PageState, CredlensError> {
        let time_range = TimeRange::parse(token)?;
        Ok(self.set_time_range(time_range).await)
    }

    pub async fn set_status(&self, status: StatusFilter) -> PageState {
        let filters = Filters {
            status,
            ..self.controller.filters()
        };
        self.set_filters(filters).await
    }

    // ── Client-side refinement ──────────────────────────────────────────

    /// Update the free-text query. Never issues a request.
    pub fn set_search_query(&self, query: impl Into<String>) {
        self.ui.lock().search_query = query.into();
    }

    pub fn search_query(&self) -> String {
        self.ui.lock().search_query.clone()
    }

    /// Loaded items narrowed by the search query, in server order.
    pub fn visible(&self) -> Vec<CredentialRecord> {
        let state = self.controller.state();
        let query = self.search_query();
        search::filter(&state.items, &query).into_owned()
    }

    pub fn rows(&self) -> Vec<CredentialRow> {
        self.visible()
            .iter()
            .map(|record| CredentialRow::new(record, &self.statuses))
            .collect()
    }

    // ── Affordances ─────────────────────────────────────────────────────

    pub fn can_load_more(&self) -> bool {
        self.controller.state().can_load_more()
    }

    pub fn can_refresh(&self) -> bool {
        !self.controller.state().loading
    }

    /// Bulk export is offered only when something is visible.
    pub fn can_export(&self) -> bool {
        !self.visible().is_empty()
    }

    // ── List / detail ───────────────────────────────────────────────────

    pub fn view(&self) -> ViewState {
        self.ui.lock().view.clone()
    }

    /// Inspect `record`. Returns `false` if a record is already open.
    pub fn open(&self, record: CredentialRecord) -> bool {
        self.ui.lock().view.open(record)
    }

    /// Inspect the loaded credential whose `vc_id` or `execution_id` is
    /// `id`. Returns `false` if none is loaded or a record is already open.
    pub fn open_by_id(&self, id: &str) -> bool {
        let found = self
            .controller
            .state()
            .items
            .into_iter()
            .find(|r| r.vc_id == id || r.execution_id == id);
        match found {
            Some(record) => self.open(record),
            None => false,
        }
    }

    pub fn back(&self) {
        self.ui.lock().view.back();
    }

    /// Expand or collapse the raw document of the inspected record.
    pub fn toggle_raw(&self) -> Option<bool> {
        self.ui.lock().view.toggle_raw()
    }

    // ── Side effects ────────────────────────────────────────────────────

    /// Copy `text` and hold `label` as recently copied. Failures are logged
    /// and reported as `false`, never as an error.
    pub fn copy(&self, text: &str, label: &str) -> bool {
        self.copies.copy(self.clipboard.as_ref(), text, label)
    }

    pub fn recently_copied(&self) -> Option<String> {
        self.copies.recently_copied()
    }

    /// Export one credential. Returns the delivered file name.
    pub fn export_one(&self, record: &CredentialRecord) -> Result<String, CredlensError> {
        let document = export_one(record)?;
        document.deliver_to(self.sink.as_ref())?;
        tracing::info!(filename = %document.filename, "exported credential");
        Ok(document.filename)
    }

    /// Export the visible set as one document. Returns the delivered file
    /// name.
    pub fn export_visible(&self) -> Result<String, CredlensError> {
        let visible = self.visible();
        if visible.is_empty() {
            return Err(CredlensError::Export("no credentials to export".into()));
        }
        let document = export_many(&visible, self.clock.now())?;
        document.deliver_to(self.sink.as_ref())?;
        tracing::info!(
            filename = %document.filename,
            count = visible.len(),
            "exported credentials"
        );
        Ok(document.filename)
    }
}
