//! External collaborator seams: the backend transport and the page-context
//! reader
//!
//! The engine owns no HTTP client. The host implements `ChatTransport` over
//! whatever stack it already has; the send pipeline only sees the typed
//! result. `TransportError` keeps failure classes distinguishable for
//! transport implementations and logs even though the pipeline degrades all
//! of them identically.

use async_trait::async_trait;
use thiserror::Error;

use crate::core::types::{AssistantReply, PageContext};

/// Backend chat capability
///
/// One shot per user message: the current message plus page context goes
/// out, a reply payload or a typed failure comes back. No conversation
/// history is sent.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send_chat_message(
        &self,
        message: &str,
        context: &PageContext,
    ) -> Result<AssistantReply, TransportError>;
}

/// Reader for the user's current navigation state
///
/// Synchronous and side-effect-free; queried when a send starts.
pub trait PageContextSource: Send + Sync {
    fn current_context(&self) -> PageContext;
}

/// Transport failure classes
///
/// - `Unauthorized` (401) - session/token rejected
/// - `RateLimited` (429) - quota exceeded; retry after a delay
/// - `BadRequest` (400) - malformed request; caller error
/// - `ServiceError` (5xx) - server-side issue; retryable
/// - `Network` - connection/timeout; retryable
/// - `Other` - catch-all
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Service error: {0}")]
    ServiceError(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl TransportError {
    /// Check if a retry (after a delay) could succeed
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            TransportError::RateLimited(_)
                | TransportError::ServiceError(_)
                | TransportError::Network(_)
        )
    }

    /// Convert an HTTP status code and error text into a typed error
    pub fn from_status(status: u16, error_text: String) -> Self {
        match status {
            401 => TransportError::Unauthorized(error_text),
            429 => TransportError::RateLimited(error_text),
            400 => TransportError::BadRequest(error_text),
            500..=599 => TransportError::ServiceError(error_text),
            _ => TransportError::Other(anyhow::anyhow!("HTTP {}: {}", status, error_text)),
        }
    }
}
