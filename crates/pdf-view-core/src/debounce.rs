use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Coalesces bursts of triggers into one.
///
/// Every call to [`Debouncer::settle`] takes a ticket and waits out the
/// delay; only the most recent ticket resolves to `true`.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    latest: Arc<AtomicU64>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            latest: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Wait for the delay; returns `false` if another trigger arrived meanwhile
    pub async fn settle(&self) -> bool {
        let ticket = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        tokio::time::sleep(self.delay).await;
        let settled = self.latest.load(Ordering::SeqCst) == ticket;
        if !settled {
            log::debug!("Coalescing trigger {} into a newer one", ticket);
        }
        settled
    }
}
