//! Single-flight command queue.
//!
//! The queue buffers pending transmissions and owns the one piece of
//! synchronization in the pipeline: the in-flight flag. Claiming an
//! entry and setting the flag happen under a single lock acquisition, so
//! two dispatch attempts can never race an idle flag into overlapping
//! transmissions.
//!
//! Service order is newest-first: the claim step removes the most
//! recently pushed entry. Under burst input (a brightness slider drag)
//! the latest intent is transmitted next and superseded intents follow,
//! trading fairness for latency. Entries are never cancelled; everything
//! pushed is eventually dispatched.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, Notify};

use crate::entry::QueueEntry;

/// Queue statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueStats {
    /// Entries waiting to be dispatched.
    pub pending: usize,
    /// Entries delivered (or suppressed in test mode).
    pub dispatched: u64,
    /// Entries dropped after a failed transmission.
    pub failed: u64,
}

/// Inner queue data, guarded as one unit.
struct QueueInner {
    entries: VecDeque<QueueEntry>,
    in_flight: bool,
    dispatched: u64,
    failed: u64,
}

/// Ordered buffer of pending transmissions with single-flight dispatch.
pub struct CommandQueue {
    inner: Mutex<QueueInner>,
    /// Wakes the dispatcher worker on new work.
    work: Notify,
    /// Wakes idle waiters when a transmission attempt settles.
    settled: Notify,
}

impl CommandQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(QueueInner {
                entries: VecDeque::new(),
                in_flight: false,
                dispatched: 0,
                failed: 0,
            }),
            work: Notify::new(),
            settled: Notify::new(),
        }
    }

    /// Append an entry. Always succeeds; the queue is unbounded so
    /// accepting a command never back-pressures the caller.
    pub async fn push(&self, entry: QueueEntry) {
        let mut inner = self.inner.lock().await;
        tracing::info!(id = %entry.id, code = %entry.code, pending = inner.entries.len() + 1,
            "queued command");
        inner.entries.push_back(entry);
        drop(inner);

        self.work.notify_one();
    }

    /// Claim the next entry for transmission.
    ///
    /// Returns `None` if a transmission is already in flight or nothing
    /// is pending; otherwise marks the queue in-flight and removes the
    /// most recently pushed entry, all as one atomic step.
    pub async fn claim(&self) -> Option<QueueEntry> {
        let mut inner = self.inner.lock().await;
        if inner.in_flight {
            return None;
        }
        let entry = inner.entries.pop_back()?;
        inner.in_flight = true;
        Some(entry)
    }

    /// Release the in-flight flag after a transmission attempt settles,
    /// successful or not. Returns whether entries remain pending.
    pub async fn finish(&self, delivered: bool) -> bool {
        let mut inner = self.inner.lock().await;
        inner.in_flight = false;
        if delivered {
            inner.dispatched += 1;
        } else {
            inner.failed += 1;
        }
        let more = !inner.entries.is_empty();
        drop(inner);

        self.settled.notify_waiters();
        more
    }

    /// Park until new work may be available.
    ///
    /// The wakeup is registered before the emptiness check so a push
    /// racing this call is never lost.
    pub async fn wait_for_work(&self) {
        let notified = self.work.notified();
        if !self.is_empty().await {
            return;
        }
        notified.await;
    }

    /// Wait until the queue is empty and nothing is in flight.
    pub async fn wait_idle(&self) {
        loop {
            let settled = self.settled.notified();
            tokio::pin!(settled);
            // Register before inspecting state so a completion between
            // the check and the await is not missed.
            settled.as_mut().enable();
            {
                let inner = self.inner.lock().await;
                if inner.entries.is_empty() && !inner.in_flight {
                    return;
                }
            }
            settled.await;
        }
    }

    /// Entries waiting to be dispatched.
    pub async fn len(&self) -> usize {
        self.inner.lock().await.entries.len()
    }

    /// Whether nothing is pending.
    pub async fn is_empty(&self) -> bool {
        self.inner.lock().await.entries.is_empty()
    }

    /// Current statistics.
    pub async fn stats(&self) -> QueueStats {
        let inner = self.inner.lock().await;
        QueueStats {
            pending: inner.entries.len(),
            dispatched: inner.dispatched,
            failed: inner.failed,
        }
    }
}

impl Default for CommandQueue {
    fn default() -> Self {
        Self::new()
    }
}
