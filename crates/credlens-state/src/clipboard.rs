//! # Clipboard and Copy Feedback
//!
//! Copying is a fire-and-forget side effect. A successful copy holds its
//! label as "recently copied" for [`COPY_FEEDBACK`], which drives a
//! transient "Copied!" affordance. A failed copy is logged and otherwise
//! ignored; it never reaches the user.
//!
//! Expiry is evaluated lazily against `tokio::time::Instant`, so no timer
//! task is spawned and tests can drive it with a paused clock.

use std::time::Duration;

use credlens_core::CredlensError;
use parking_lot::Mutex;
use tokio::time::Instant;

/// How long a copied label stays visible.
pub const COPY_FEEDBACK: Duration = Duration::from_millis(2000);

/// Destination for copied text.
pub trait Clipboard: Send + Sync {
    fn write_text(&self, text: &str) -> Result<(), CredlensError>;
}

/// In-process clipboard. Can be built in a failing mode to model a host
/// without clipboard access.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    contents: Mutex<Option<String>>,
    unavailable: bool,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// A clipboard whose every write fails.
    pub fn unavailable() -> Self {
        Self {
            contents: Mutex::new(None),
            unavailable: true,
        }
    }

    pub fn contents(&self) -> Option<String> {
        self.contents.lock().clone()
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&self, text: &str) -> Result<(), CredlensError> {
        if self.unavailable {
            return Err(CredlensError::ClipboardUnavailable(
                "no clipboard attached".into(),
            ));
        }
        *self.contents.lock() = Some(text.to_string());
        Ok(())
    }
}

/// Tracks the most recently copied label.
///
/// A new copy replaces the previous label and restarts the hold.
#[derive(Debug, Default)]
pub struct CopyTracker {
    last: Mutex<Option<(String, Instant)>>,
}

impl CopyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write `text` and, on success, mark `label` as recently copied.
    ///
    /// Returns whether the write succeeded.
    pub fn copy(&self, clipboard: &dyn Clipboard, text: &str, label: &str) -> bool {
        match clipboard.write_text(text) {
            Ok(()) => {
                *self.last.lock() = Some((label.to_string(), Instant::now() + COPY_FEEDBACK));
                true
            }
            Err(e) => {
                tracing::warn!(label, "failed to copy: {e}");
                false
            }
        }
    }

    /// The label still inside its feedback window, if any.
    pub fn recently_copied(&self) -> Option<String> {
        let mut last = self.last.lock();
        match last.as_ref() {
            Some((label, until)) if Instant::now() < *until => Some(label.clone()),
            Some(_) => {
                *last = None;
                None
            }
            None => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn copied_label_expires_after_two_seconds() {
        let clipboard = MemoryClipboard::new();
        let tracker = CopyTracker::new();

        assert!(tracker.copy(&clipboard, "abc", "execution"));
        assert_eq!(clipboard.contents().as_deref(), Some("abc"));
        assert_eq!(tracker.recently_copied().as_deref(), Some("execution"));

        tokio::time::advance(Duration::from_millis(1999)).await;
        assert_eq!(tracker.recently_copied().as_deref(), Some("execution"));

        tokio::time::advance(Duration::from_millis(1)).await;
        assert_eq!(tracker.recently_copied(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn second_copy_restarts_window() {
        let clipboard = MemoryClipboard::new();
        let tracker = CopyTracker::new();

        tracker.copy(&clipboard, "exec-1", "execution");
        tokio::time::advance(Duration::from_millis(1500)).await;
        tracker.copy(&clipboard, "did:web:issuer", "issuer");
        tokio::time::advance(Duration::from_millis(1500)).await;

        assert_eq!(tracker.recently_copied().as_deref(), Some("issuer"));
        assert_eq!(clipboard.contents().as_deref(), Some("did:web:issuer"));
    }

    #[tokio::test(start_paused = true)]
    async fn failed_copy_is_swallowed() {
        let tracker = CopyTracker::new();
        assert!(!tracker.copy(&MemoryClipboard::unavailable(), "abc", "execution"));
        assert_eq!(tracker.recently_copied(), None);
    }
}
