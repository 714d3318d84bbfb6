//! # credlens-state — Paginated Credential Browsing
//!
//! The stateful layer on top of `credlens-core`:
//!
//! - **Pagination** (`pagination.rs`): [`PaginationController`] merges
//!   server pages, tracks `has_more`, and discards responses that belong to
//!   superseded requests.
//! - **Browser** (`browser.rs`): [`CredentialBrowser`] turns filter changes
//!   into resets, applies the free-text search over loaded items, and
//!   exposes rows, affordances and export.
//! - **View** (`view.rs`): the list/detail [`ViewState`] machine and the
//!   [`CredentialRow`] projection.
//! - **Clipboard** (`clipboard.rs`): copy with transient "recently copied"
//!   feedback.
//! - **Clock** (`clock.rs`): wall-clock seam for deterministic tests.
//!
//! Nothing here blocks: fetches are async and the state locks are never
//! held across an `.await`.

pub mod browser;
pub mod clipboard;
pub mod clock;
pub mod pagination;
pub mod view;

#[cfg(test)]
pub(crate) mod testing;

pub use browser::{BrowserBuilder, CredentialBrowser};
pub use clipboard::{Clipboard, CopyTracker, MemoryClipboard, COPY_FEEDBACK};
pub use clock::{Clock, FixedClock, SystemClock};
pub use pagination::{PageState, PaginationController, DEFAULT_PAGE_SIZE};
pub use view::{CredentialRow, ViewState};
