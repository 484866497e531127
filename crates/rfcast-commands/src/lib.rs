//! Command delivery pipeline for the RF bridge.
//!
//! Provides:
//! - Queue entries pairing a command code with its transmittable payload
//! - A single-flight command queue (newest-intent-first service order)
//! - The dispatcher worker that serializes transmissions
//! - The HTTP transport capability used to reach the bridge

pub mod dispatch;
pub mod entry;
pub mod queue;
pub mod service;
pub mod transport;

// Re-exports
pub use entry::QueueEntry;

pub use queue::{CommandQueue, QueueStats};

pub use dispatch::Dispatcher;

pub use service::CommandService;

pub use transport::{HttpTransport, Transport, TransportError};
