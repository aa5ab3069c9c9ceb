//! HTTP response type for the Crystallize API SDK.

use std::collections::HashMap;

/// An HTTP response from one of the Crystallize APIs.
///
/// Contains the response status code, headers, body, and the parsed
/// `Retry-After` value used by the retry loop.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers, lowercased (headers may have multiple values).
    pub headers: HashMap<String, Vec<String>>,
    /// The parsed response body.
    pub body: serde_json::Value,
    /// Seconds to wait before retrying (from `Retry-After` header).
    pub retry_request_after: Option<f64>,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`, parsing the `Retry-After` header.
    #[must_use]
    pub fn new(code: u16, headers: HashMap<String, Vec<String>>, body: serde_json::Value) -> Self {
        let retry_request_after = headers
            .get("retry-after")
            .and_then(|values| values.first())
            .and_then(|value| value.parse::<f64>().ok());

        Self {
            code,
            headers,
            body,
            retry_request_after,
        }
    }

    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns the `X-Request-Id` header value, if present.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.headers
            .get("x-request-id")
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the GraphQL `errors` array of the body when it is non-empty.
    #[must_use]
    pub fn graphql_errors(&self) -> Option<&Vec<serde_json::Value>> {
        self.body
            .get("errors")
            .and_then(serde_json::Value::as_array)
            .filter(|errors| !errors.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn headers(pairs: &[(&str, &str)]) -> HashMap<String, Vec<String>> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), vec![(*v).to_string()]))
            .collect()
    }

    #[test]
    fn test_is_ok_for_2xx_only() {
        assert!(HttpResponse::new(200, HashMap::new(), json!({})).is_ok());
        assert!(HttpResponse::new(299, HashMap::new(), json!({})).is_ok());
        assert!(!HttpResponse::new(301, HashMap::new(), json!({})).is_ok());
        assert!(!HttpResponse::new(500, HashMap::new(), json!({})).is_ok());
    }

    #[test]
    fn test_retry_after_and_request_id_are_parsed() {
        let response = HttpResponse::new(
            429,
            headers(&[("retry-after", "2.5"), ("x-request-id", "req-1")]),
            json!({}),
        );
        assert_eq!(response.retry_request_after, Some(2.5));
        assert_eq!(response.request_id(), Some("req-1"));
    }

    #[test]
    fn test_graphql_errors_ignores_empty_array() {
        let empty = HttpResponse::new(200, HashMap::new(), json!({"data": {}, "errors": []}));
        assert!(empty.graphql_errors().is_none());

        let present = HttpResponse::new(
            200,
            HashMap::new(),
            json!({"errors": [{"message": "boom"}]}),
        );
        assert_eq!(present.graphql_errors().map(Vec::len), Some(1));
    }
}
