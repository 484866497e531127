//! Testing utilities for RfCast.
//!
//! Provides a scriptable [`MockTransport`] implementing the production
//! transport capability: it records every request, can fail on demand,
//! and can hold requests open to exercise single-flight behavior.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::{Mutex, Semaphore};

use rfcast_commands::{Transport, TransportError};

/// In-memory transport double.
///
/// Requests are recorded before any gating or failure injection, so a
/// test can observe that a call has started even while it is held open.
pub struct MockTransport {
    requests: Mutex<Vec<String>>,
    started: AtomicUsize,
    failures: AtomicUsize,
    gate: Option<Semaphore>,
}

impl MockTransport {
    /// Transport that answers every request immediately with success.
    pub fn new() -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            started: AtomicUsize::new(0),
            failures: AtomicUsize::new(0),
            gate: None,
        }
    }

    /// Transport that holds every request open until [`release`] grants
    /// a permit.
    ///
    /// [`release`]: MockTransport::release
    pub fn gated() -> Self {
        Self {
            gate: Some(Semaphore::new(0)),
            ..Self::new()
        }
    }

    /// Allow `n` held requests to complete.
    pub fn release(&self, n: usize) {
        if let Some(gate) = &self.gate {
            gate.add_permits(n);
        }
    }

    /// Fail the next `n` requests with a transport error.
    pub fn fail_next(&self, n: usize) {
        self.failures.store(n, Ordering::SeqCst);
    }

    /// Every URL requested so far, in call order.
    pub async fn requests(&self) -> Vec<String> {
        self.requests.lock().await.clone()
    }

    /// Number of calls that have started (including held ones).
    pub fn started(&self) -> usize {
        self.started.load(Ordering::SeqCst)
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn get(&self, url: &str) -> Result<String, TransportError> {
        self.requests.lock().await.push(url.to_string());
        self.started.fetch_add(1, Ordering::SeqCst);

        if let Some(gate) = &self.gate {
            let permit = gate
                .acquire()
                .await
                .map_err(|_| TransportError::Unavailable("gate closed".to_string()))?;
            permit.forget();
        }

        let pending_failures = self.failures.load(Ordering::SeqCst);
        if pending_failures > 0
            && self
                .failures
                .compare_exchange(
                    pending_failures,
                    pending_failures - 1,
                    Ordering::SeqCst,
                    Ordering::SeqCst,
                )
                .is_ok()
        {
            return Err(TransportError::Unavailable(
                "scripted failure".to_string(),
            ));
        }

        Ok(String::new())
    }
}
