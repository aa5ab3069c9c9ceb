//! Extension points invoked by the mass-call engine.

use async_trait::async_trait;
use thiserror::Error;

use crate::clients::TransportError;
use crate::mass_call::{BatchWindow, QueuedRequest};

/// Error raised by a [`MassCallHooks`] method.
///
/// # Example
///
/// ```rust
/// use crystallize_api::mass_call::HookError;
///
/// let error = HookError::new("audit log unavailable");
/// assert_eq!(error.to_string(), "audit log unavailable");
/// ```
#[derive(Debug, Error)]
#[error("{message}")]
pub struct HookError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl HookError {
    /// Creates a hook error from a message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a hook error wrapping an underlying error.
    #[must_use]
    pub fn with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Returns the error message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Callbacks around every request and window of a [`MassCallClient`](crate::MassCallClient).
///
/// Every method has a no-op default, so implementors only override what they
/// need.
///
/// # Error policy
///
/// A hook error never cancels the other requests of its window. Once the
/// window has settled, the engine finishes its bookkeeping (cursor,
/// concurrency, backoff) and returns [`MassCallError::Hook`](crate::mass_call::MassCallError::Hook)
/// with the results gathered so far. A request whose `before_request` or
/// `on_failure` hook failed is treated as failed and queued for retry; a
/// request whose `after_request` hook failed keeps its result.
///
/// `on_batch_done` runs on a spawned task and is never awaited: its errors are
/// logged, and its completion is not ordered with later windows.
///
/// # Example
///
/// ```rust
/// use async_trait::async_trait;
/// use crystallize_api::mass_call::{BatchWindow, HookError, MassCallHooks, QueuedRequest};
/// use crystallize_api::TransportError;
///
/// struct DropUnauthorized;
///
/// #[async_trait]
/// impl MassCallHooks for DropUnauthorized {
///     async fn on_failure(
///         &self,
///         _window: BatchWindow,
///         error: &TransportError,
///         _request: &QueuedRequest,
///     ) -> Result<bool, HookError> {
///         // a 401 will not heal by retrying
///         Ok(error.code() != 401)
///     }
/// }
/// ```
#[async_trait]
pub trait MassCallHooks: Send + Sync {
    /// Runs before a request is sent. Returning a request sends it instead of
    /// the queued one; the key is kept either way.
    async fn before_request(
        &self,
        _window: BatchWindow,
        _request: &QueuedRequest,
    ) -> Result<Option<QueuedRequest>, HookError> {
        Ok(None)
    }

    /// Runs after a request succeeded, with the data it returned.
    ///
    /// `request` is the request as it was queued, even when
    /// [`before_request`](Self::before_request) substituted another one.
    async fn after_request(
        &self,
        _window: BatchWindow,
        _request: &QueuedRequest,
        _result: &serde_json::Value,
    ) -> Result<(), HookError> {
        Ok(())
    }

    /// Runs after a request failed. Returning `false` drops the request
    /// instead of queueing it for [`retry`](crate::MassCallClient::retry).
    ///
    /// `request` is the request that was sent, substitution included; it is
    /// the one queued for retry.
    async fn on_failure(
        &self,
        _window: BatchWindow,
        _error: &TransportError,
        _request: &QueuedRequest,
    ) -> Result<bool, HookError> {
        Ok(true)
    }

    /// Runs once a window has settled, on a spawned task.
    async fn on_batch_done(&self, _window: BatchWindow) -> Result<(), HookError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_hook_error_exposes_source() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        let error = HookError::with_source("cannot write checkpoint", io);

        assert_eq!(error.message(), "cannot write checkpoint");
        assert!(error.source().unwrap().to_string().contains("disk full"));
    }

    #[test]
    fn test_hook_error_without_source() {
        let error = HookError::new("nope");
        assert!(error.source().is_none());
    }
}
