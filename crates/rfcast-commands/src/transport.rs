//! Transport capability for reaching the RF bridge.
//!
//! The pipeline only ever needs a single HTTP GET; any client that can
//! fulfil [`Transport::get`] is interchangeable, which is what the test
//! transports rely on.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

/// Transport error types.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("bridge returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("transport unavailable: {0}")]
    Unavailable(String),
}

/// Asynchronous GET capability to the bridge endpoint.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue one GET and return the response body.
    ///
    /// Implementations must bound how long a call can take; the
    /// dispatcher relies on the transport's own timeout.
    async fn get(&self, url: &str) -> Result<String, TransportError>;
}

/// HTTP transport backed by a shared [`reqwest::Client`].
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Build a transport whose requests time out after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<String, TransportError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status));
        }
        Ok(response.text().await?)
    }
}
