//! Dispatcher: drains the queue one transmission at a time.
//!
//! The drain is an explicit loop, not a completion-callback re-arm, so
//! sustained burst input cannot grow the call stack. Failures are
//! terminal for the single attempt only: the entry is dropped, the
//! failure logged, and the loop moves on.

use std::sync::Arc;

use tracing::{debug, info, warn};

use rfcast_core::BridgeConfig;

use crate::entry::QueueEntry;
use crate::queue::CommandQueue;
use crate::transport::Transport;

/// Drains the command queue through the transport, one entry at a time.
pub struct Dispatcher {
    queue: Arc<CommandQueue>,
    transport: Arc<dyn Transport>,
    config: BridgeConfig,
}

impl Dispatcher {
    /// Create a dispatcher over an explicitly injected queue, transport,
    /// and configuration.
    pub fn new(
        queue: Arc<CommandQueue>,
        transport: Arc<dyn Transport>,
        config: BridgeConfig,
    ) -> Self {
        Self {
            queue,
            transport,
            config,
        }
    }

    /// Drain the queue until it is empty or another drain holds the
    /// in-flight flag. Safe to invoke at any time; a concurrent call
    /// observes the claimed flag and returns without transmitting.
    pub async fn pump(&self) {
        while let Some(entry) = self.queue.claim().await {
            let delivered = self.deliver(&entry).await;
            self.queue.finish(delivered).await;
        }
    }

    /// Worker loop: drain, then park until the queue signals new work.
    pub async fn run(&self) {
        loop {
            self.pump().await;
            self.queue.wait_for_work().await;
        }
    }

    /// One transmission attempt. Never propagates transport errors;
    /// reports whether the entry counts as delivered.
    async fn deliver(&self, entry: &QueueEntry) -> bool {
        if self.config.is_test_mode() {
            info!(id = %entry.id, code = %entry.code,
                "test mode, command recorded without transmission");
            return true;
        }

        debug!(id = %entry.id, code = %entry.code, url = %entry.url, "transmitting");
        match self.transport.get(&entry.url).await {
            Ok(_) => {
                debug!(id = %entry.id, code = %entry.code, "bridge accepted command");
                true
            }
            Err(error) => {
                warn!(id = %entry.id, code = %entry.code, %error,
                    "transmission failed, dropping command");
                false
            }
        }
    }
}
