//! HTTP transport port
//!
//! Defines the single network operation the API client needs. The reqwest
//! adapter lives in the infrastructure layer; tests substitute mocks.

use async_trait::async_trait;
use strata_domain::{OutboundRequest, TransportResponse};
use thiserror::Error;

/// Failures before any HTTP response was received.
#[derive(Error, Debug, Clone)]
pub enum TransportError {
    #[error("Connection error: {0}")]
    Connect(String),

    #[error("Failed to read response body: {0}")]
    Body(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Transport error: {0}")]
    Other(String),
}

/// Sends a prepared request and reads the whole response.
///
/// Implementations must not apply their own retries. Dropping the returned
/// future must abort the call; the client relies on that for timeouts.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: OutboundRequest) -> Result<TransportResponse, TransportError>;
}
