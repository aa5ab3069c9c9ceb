//! Batched, self-throttling execution of many independent GraphQL requests.
//!
//! [`MassCallClient`] queues requests against any of the Crystallize APIs and
//! runs them in concurrent windows whose size adapts to the error rate of the
//! previous window. Failed requests are kept aside so they can be retried
//! without re-running the successful ones.
//!
//! # Overview
//!
//! - [`MassCallClient`]: The engine
//! - [`MassCallOptions`]: Initial and maximum concurrency, backoff unit, hooks
//! - [`MassCallHooks`]: Callbacks around requests and windows
//! - [`QueuedRequest`]: One queued request and its key
//! - [`BatchWindow`]: The index range of one concurrent window
//! - [`FibonacciBackoff`]: Delay sequence applied after totally failed windows
//!
//! # Concurrency control
//!
//! After each window:
//!
//! - every request failed: sleep for the next Fibonacci delay, keep the concurrency
//! - more than half failed: concurrency drops to 1
//! - some failed: concurrency decreases by 1 (never below 1)
//! - none failed: concurrency increases by 1 (never above `max_spawn`)
//!
//! Any window that is not a total failure resets the Fibonacci sequence.
//!
//! # Example
//!
//! ```rust,ignore
//! use crystallize_api::{ApiClient, CrystallizeConfig, MassCallClient, MassCallOptions};
//!
//! let api = ApiClient::new(CrystallizeConfig::from_env()?);
//! let mut client = MassCallClient::new(api, MassCallOptions::default());
//!
//! for i in 1..=54 {
//!     client.enqueue_catalogue(format!("query {{ catalogue {{ id, key{i}: name }} }}"), None);
//! }
//!
//! let mut results = client.execute().await?;
//! while client.has_failed() {
//!     results.extend(client.retry().await?);
//! }
//! ```
//!
//! There is no retry limit: a request that can never succeed keeps coming
//! back from [`MassCallClient::retry`] until a hook drops it via
//! [`MassCallHooks::on_failure`] or the caller stops retrying.

mod backoff;
mod client;
mod errors;
mod hooks;
mod options;

use std::collections::HashMap;
use std::fmt;

pub use backoff::FibonacciBackoff;
pub use client::MassCallClient;
pub use errors::MassCallError;
pub use hooks::{HookError, MassCallHooks};
pub use options::{
    MassCallOptions, MassCallOptionsBuilder, DEFAULT_BACKOFF_UNIT, DEFAULT_INITIAL_SPAWN,
    DEFAULT_MAX_SPAWN,
};

use crate::clients::EndpointId;

/// Successful results of one `execute`/`retry` call, by request key.
pub type ResultMap = HashMap<String, serde_json::Value>;

/// The half-open range `[from, to)` of the working list dispatched together.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BatchWindow {
    /// First index of the window.
    pub from: usize,
    /// One past the last index of the window.
    pub to: usize,
}

impl BatchWindow {
    /// Creates a window.
    #[must_use]
    pub const fn new(from: usize, to: usize) -> Self {
        Self { from, to }
    }

    /// Number of requests in the window.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.to.saturating_sub(self.from)
    }

    /// Returns `true` if the window holds no request.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for BatchWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.from, self.to)
    }
}

/// A request waiting in a [`MassCallClient`] queue.
///
/// Requests are created by [`MassCallClient::enqueue`], which assigns the
/// key. Hooks can derive a modified copy with the `with_*` methods; the key
/// is always preserved.
#[derive(Clone, Debug, PartialEq)]
pub struct QueuedRequest {
    key: String,
    endpoint: EndpointId,
    query: String,
    variables: Option<serde_json::Value>,
}

impl QueuedRequest {
    pub(crate) fn new(
        key: String,
        endpoint: EndpointId,
        query: String,
        variables: Option<serde_json::Value>,
    ) -> Self {
        Self {
            key,
            endpoint,
            query,
            variables,
        }
    }

    /// The key results and failures are reported under.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The API the request targets.
    #[must_use]
    pub const fn endpoint(&self) -> EndpointId {
        self.endpoint
    }

    /// The GraphQL query.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// The query variables, if any.
    #[must_use]
    pub const fn variables(&self) -> Option<&serde_json::Value> {
        self.variables.as_ref()
    }

    /// Returns a copy targeting another endpoint.
    #[must_use]
    pub fn with_endpoint(&self, endpoint: EndpointId) -> Self {
        Self {
            endpoint,
            ..self.clone()
        }
    }

    /// Returns a copy with another query.
    #[must_use]
    pub fn with_query(&self, query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..self.clone()
        }
    }

    /// Returns a copy with other variables.
    #[must_use]
    pub fn with_variables(&self, variables: Option<serde_json::Value>) -> Self {
        Self {
            variables,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_len_and_display() {
        let window = BatchWindow::new(10, 15);
        assert_eq!(window.len(), 5);
        assert!(!window.is_empty());
        assert_eq!(window.to_string(), "[10, 15)");
        assert!(BatchWindow::new(4, 4).is_empty());
    }

    #[test]
    fn test_with_methods_keep_the_key() {
        let request = QueuedRequest::new(
            "catalogue-1".to_string(),
            EndpointId::Catalogue,
            "query { a }".to_string(),
            None,
        );

        let changed = request
            .with_query("query { b }")
            .with_endpoint(EndpointId::Search)
            .with_variables(Some(serde_json::json!({"x": 1})));

        assert_eq!(changed.key(), "catalogue-1");
        assert_eq!(changed.query(), "query { b }");
        assert_eq!(changed.endpoint(), EndpointId::Search);
        assert_eq!(changed.variables(), Some(&serde_json::json!({"x": 1})));
        assert_eq!(request.query(), "query { a }");
    }
}
