//! Trailing-edge debounce owned by its caller.
//!
//! Each `Debouncer` keeps its own generation counter, so two dialogs (or two
//! request handlers) debouncing independently never cancel each other. A
//! clone shares the same counter and can be handed to spawned
//! tasks of the same call site.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    generation: Arc<AtomicU64>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    fn next_ticket(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_current(&self, ticket: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket
    }

    /// Waits for the input to settle.
    ///
    /// Resolves to `Some(input)` when no later `call`/`run` was made on this
    /// debouncer during the delay, `None` otherwise.
    pub async fn call<T>(&self, input: T) -> Option<T> {
        let ticket = self.next_ticket();
        tokio::time::sleep(self.delay).await;

        if self.is_current(ticket) {
            Some(input)
        } else {
            debug!(ticket, "Superseded before settling");
            None
        }
    }

    /// Settles like `call`, then runs `fetch` with the input.
    ///
    /// A response that arrives after a newer call started is dropped, so the
    /// last call always wins even when responses come back out of order.
    pub async fn run<T, F, Fut, R>(&self, input: T, fetch: F) -> Option<R>
    where
        F: FnOnce(T) -> Fut,
        Fut: Future<Output = R>,
    {
        let ticket = self.next_ticket();
        tokio::time::sleep(self.delay).await;

        if !self.is_current(ticket) {
            debug!(ticket, "Superseded before settling");
            return None;
        }

        let response = fetch(input).await;

        if self.is_current(ticket) {
            Some(response)
        } else {
            debug!(ticket, "Discarding stale response");
            None
        }
    }

    /// Makes every pending `call`/`run` resolve to `None`
    pub fn cancel(&self) {
        self.next_ticket();
    }
}
