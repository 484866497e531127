//! Command service: the submission entry point for device models.
//!
//! Owns the queue and the dispatcher worker. All collaborators are
//! injected through the constructor; nothing here reaches for ambient
//! globals.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::debug;

use rfcast_core::{BridgeConfig, CommandCode, FrameError, RawCommand};

use crate::dispatch::Dispatcher;
use crate::entry::QueueEntry;
use crate::queue::{CommandQueue, QueueStats};
use crate::transport::Transport;

/// Accepts command codes, assembles their payloads, and feeds the
/// dispatcher worker.
pub struct CommandService {
    config: BridgeConfig,
    queue: Arc<CommandQueue>,
    worker: JoinHandle<()>,
}

impl CommandService {
    /// Start a service for one bridge/receiver pair. Spawns the
    /// dispatcher worker on the current runtime.
    pub fn new(config: BridgeConfig, transport: Arc<dyn Transport>) -> Self {
        let queue = Arc::new(CommandQueue::new());
        let dispatcher = Dispatcher::new(queue.clone(), transport, config.clone());
        let worker = tokio::spawn(async move { dispatcher.run().await });

        Self {
            config,
            queue,
            worker,
        }
    }

    /// Assemble the payload for `code` and accept it for dispatch.
    ///
    /// Returns as soon as the entry is queued; the transmission outcome
    /// never propagates back to the caller.
    pub async fn submit(&self, code: CommandCode) -> Result<(), FrameError> {
        let raw = RawCommand::build(code, self.config.wire_address(), self.config.address_width)?;
        let entry = QueueEntry::new(code, raw.bridge_url(&self.config.bridge_host));
        debug!(code = %code, "accepted command");
        self.queue.push(entry).await;
        Ok(())
    }

    /// The configuration this service was started with.
    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Current queue statistics.
    pub async fn stats(&self) -> QueueStats {
        self.queue.stats().await
    }

    /// Wait until every accepted command has been dispatched.
    pub async fn wait_idle(&self) {
        self.queue.wait_idle().await;
    }
}

impl Drop for CommandService {
    fn drop(&mut self) {
        self.worker.abort();
    }
}
