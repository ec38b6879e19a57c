//! Cancellable debounce timer.

use std::time::Duration;

use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::trace;

/// Arms one pending wait at a time; each new trigger cancels the previous one.
///
/// The returned token doubles as the cancellation scope of the whole operation the
/// wait gates, so superseding a caret settle cancels both its delay and whatever
/// stage it reached afterwards.
#[derive(Debug, Default)]
pub struct Debouncer {
    current: Mutex<Option<CancellationToken>>,
}

impl Debouncer {
    /// Creates an idle debouncer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancels the previously armed scope and returns a fresh one.
    #[must_use]
    pub fn arm(&self) -> CancellationToken {
        let mut slot = self.current.lock();
        if let Some(previous) = slot.take() {
            trace!("superseding pending operation");
            previous.cancel();
        }
        let token = CancellationToken::new();
        *slot = Some(token.clone());
        token
    }

    /// Cancels the pending scope without arming a new one.
    pub fn cancel_pending(&self) {
        if let Some(previous) = self.current.lock().take() {
            previous.cancel();
        }
    }
}

/// Waits out the debounce delay under a cancellation scope.
///
/// # Returns
///
/// `true` when the delay elapsed, `false` when the scope was cancelled first.
pub async fn wait_for(token: &CancellationToken, delay: Duration) -> bool {
    tokio::select! {
        () = token.cancelled() => false,
        () = tokio::time::sleep(delay) => true,
    }
}
