//! The request/response seam between the mass-call engine and the network.
//!
//! The [`Transport`] trait is the single contract the batch engine relies on:
//! send one query to one endpoint, get the `data` back or a typed
//! [`TransportError`]. [`ApiClient`](crate::clients::ApiClient) is the HTTP
//! implementation; tests and callers can supply their own.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::clients::endpoint::EndpointId;
use crate::clients::errors::HttpError;

/// Error returned by a [`Transport`] call.
///
/// # Example
///
/// ```rust
/// use crystallize_api::TransportError;
///
/// let error = TransportError::Graphql {
///     code: 200,
///     message: "Cannot query field \"nope\"".to_string(),
/// };
/// assert_eq!(error.code(), 200);
/// assert!(error.to_string().contains("nope"));
/// ```
#[derive(Debug, Error)]
pub enum TransportError {
    /// The HTTP exchange failed (network error or non-2xx status).
    #[error(transparent)]
    Http(#[from] HttpError),

    /// The server answered but reported GraphQL errors.
    #[error("GraphQL error ({code}): {message}")]
    Graphql {
        /// HTTP status code of the response.
        code: u16,
        /// Messages of the GraphQL errors, joined by `; `.
        message: String,
    },
}

impl TransportError {
    /// Returns the HTTP status code associated with the error, or 0 when the
    /// request never got a response.
    #[must_use]
    pub fn code(&self) -> u16 {
        match self {
            Self::Http(e) => e.status_code(),
            Self::Graphql { code, .. } => *code,
        }
    }

    /// Returns a human readable message.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Http(e) => e.to_string(),
            Self::Graphql { message, .. } => message.clone(),
        }
    }

    /// Builds a [`TransportError::Graphql`] from a GraphQL `errors` array.
    #[must_use]
    pub fn from_graphql_errors(code: u16, errors: &[serde_json::Value]) -> Self {
        let messages: Vec<String> = errors
            .iter()
            .map(|error| {
                error
                    .get("message")
                    .and_then(serde_json::Value::as_str)
                    .map_or_else(|| error.to_string(), String::from)
            })
            .collect();

        Self::Graphql {
            code,
            message: messages.join("; "),
        }
    }
}

/// Performs one GraphQL request against one Crystallize endpoint.
///
/// Implementations must return an error for non-2xx responses and for
/// responses carrying a GraphQL `errors` array. Timeouts, if wanted, belong
/// inside the implementation and surface as errors.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends `query` with optional `variables` to `endpoint` and returns the
    /// parsed `data` member of the response.
    async fn call(
        &self,
        endpoint: EndpointId,
        query: &str,
        variables: Option<&serde_json::Value>,
    ) -> Result<serde_json::Value, TransportError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn call(
        &self,
        endpoint: EndpointId,
        query: &str,
        variables: Option<&serde_json::Value>,
    ) -> Result<serde_json::Value, TransportError> {
        (**self).call(endpoint, query, variables).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::HttpResponseError;
    use serde_json::json;

    #[test]
    fn test_from_graphql_errors_joins_messages() {
        let errors = vec![
            json!({"message": "first"}),
            json!({"message": "second", "path": ["a"]}),
        ];
        let error = TransportError::from_graphql_errors(200, &errors);

        assert_eq!(error.code(), 200);
        assert_eq!(error.message(), "first; second");
    }

    #[test]
    fn test_from_graphql_errors_without_message_uses_json() {
        let errors = vec![json!({"extensions": {"code": "BAD"}})];
        let error = TransportError::from_graphql_errors(200, &errors);

        assert!(error.message().contains("BAD"));
    }

    #[test]
    fn test_http_error_conversion_keeps_status() {
        let error: TransportError = HttpError::Response(HttpResponseError {
            code: 401,
            message: r#"{"message":"Unauthorized"}"#.to_string(),
            error_reference: None,
        })
        .into();

        assert_eq!(error.code(), 401);
        assert!(error.message().contains("Unauthorized"));
    }
}
