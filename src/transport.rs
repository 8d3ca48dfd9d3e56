//! HTTP transport seam
//!
//! The client never opens its own sockets; it talks through the [`Transport`]
//! trait, a single GET capability. The default implementation wraps
//! `reqwest`, and tests inject doubles through the same seam. Timeouts,
//! proxies, and any deadline behavior belong to whichever transport the
//! caller injects.

use crate::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// A raw HTTP response as the client core consumes it
///
/// The body is fully read by the transport, so the underlying connection is
/// released on every path before classification happens.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body, read to completion
    pub body: String,
}

/// The single HTTP capability the client needs
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue one GET and return the status and full body
    async fn get(&self, url: &str) -> Result<TransportResponse>;
}

/// Default transport backed by `reqwest`
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport with reqwest's default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a transport with a request timeout
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// Wrap an existing `reqwest` client
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<TransportResponse> {
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(TransportResponse { status, body })
    }
}
