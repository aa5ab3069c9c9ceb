//! HTTP client for Crystallize API communication.
//!
//! This module provides the [`HttpClient`] type for making authenticated
//! requests to a single Crystallize endpoint with automatic retry handling.

use std::collections::HashMap;
use std::time::Duration;

use crate::clients::errors::{HttpError, HttpResponseError, MaxHttpRetriesExceededError};
use crate::clients::http_response::HttpResponse;
use crate::config::CrystallizeConfig;

/// Fixed retry wait time in seconds.
pub const RETRY_WAIT_TIME: u64 = 1;

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Header carrying the access token id.
pub const ACCESS_TOKEN_ID_HEADER: &str = "X-Crystallize-Access-Token-Id";
/// Header carrying the access token secret.
pub const ACCESS_TOKEN_SECRET_HEADER: &str = "X-Crystallize-Access-Token-Secret";

/// HTTP client bound to one endpoint URL.
///
/// The client handles:
/// - Default headers including User-Agent and the access token pair
/// - JSON request bodies
/// - Automatic retry logic for 429 and 500 responses
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
#[derive(Debug)]
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Full endpoint URL.
    url: String,
    /// Default headers to include in all requests.
    default_headers: HashMap<String, String>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client for the given endpoint URL.
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created. This should
    /// only happen in extremely unusual circumstances (e.g., TLS initialization failure).
    ///
    /// # Example
    ///
    /// ```rust
    /// use crystallize_api::{CrystallizeConfig, TenantIdentifier};
    /// use crystallize_api::clients::HttpClient;
    ///
    /// let config = CrystallizeConfig::builder()
    ///     .tenant_identifier(TenantIdentifier::new("furniture").unwrap())
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = HttpClient::new("https://api.crystallize.com/furniture/catalogue", &config);
    /// assert_eq!(client.url(), "https://api.crystallize.com/furniture/catalogue");
    /// ```
    #[must_use]
    pub fn new(url: impl Into<String>, config: &CrystallizeConfig) -> Self {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}Crystallize API Library v{SDK_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());
        default_headers.insert("Content-Type".to_string(), "application/json".to_string());

        if let Some(id) = config.access_token_id() {
            default_headers.insert(ACCESS_TOKEN_ID_HEADER.to_string(), id.as_ref().to_string());
        }
        if let Some(secret) = config.access_token_secret() {
            default_headers.insert(
                ACCESS_TOKEN_SECRET_HEADER.to_string(),
                secret.as_ref().to_string(),
            );
        }

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            url: url.into(),
            default_headers,
        }
    }

    /// Returns the endpoint URL of this client.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Posts a JSON body to the endpoint.
    ///
    /// A 429 response is retried after its `Retry-After` delay (or one
    /// second), a 500 after one second, until `tries` attempts were made.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - Network error occurs (`Network`)
    /// - Non-2xx response received (`Response`)
    /// - Retries are exhausted with `tries > 1` (`MaxRetries`)
    pub async fn post_json(
        &self,
        body: &serde_json::Value,
        tries: u32,
    ) -> Result<HttpResponse, HttpError> {
        let tries = tries.max(1);
        let mut attempt: u32 = 0;
        loop {
            attempt += 1;

            let mut req_builder = self.client.post(&self.url);
            for (key, value) in &self.default_headers {
                req_builder = req_builder.header(key, value);
            }

            let res = req_builder.body(body.to_string()).send().await?;

            let code = res.status().as_u16();
            let res_headers = Self::parse_response_headers(res.headers());
            let body_text = res.text().await.unwrap_or_default();

            let body = if body_text.is_empty() {
                serde_json::json!({})
            } else {
                serde_json::from_str(&body_text).unwrap_or_else(|_| {
                    if code >= 500 {
                        serde_json::json!({ "raw_body": body_text })
                    } else {
                        serde_json::json!({})
                    }
                })
            };

            let response = HttpResponse::new(code, res_headers, body);
            if response.is_ok() {
                return Ok(response);
            }

            let error_message = Self::serialize_error(&response);
            let error_reference = response.request_id().map(String::from);

            let should_retry = code == 429 || code == 500;
            if !should_retry || attempt >= tries {
                if should_retry && tries > 1 {
                    return Err(HttpError::MaxRetries(MaxHttpRetriesExceededError {
                        code,
                        tries,
                        message: error_message,
                        error_reference,
                    }));
                }
                return Err(HttpError::Response(HttpResponseError {
                    code,
                    message: error_message,
                    error_reference,
                }));
            }

            let delay = Self::calculate_retry_delay(&response, code);
            tracing::debug!(
                "Retrying request to {} after status {} in {:?} (attempt {}/{})",
                self.url,
                code,
                delay,
                attempt,
                tries
            );
            tokio::time::sleep(delay).await;
        }
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }

    /// Calculates the retry delay based on response and status code.
    fn calculate_retry_delay(response: &HttpResponse, status: u16) -> Duration {
        if status == 429 {
            if let Some(retry_after) = response.retry_request_after {
                return Duration::from_secs_f64(retry_after.max(0.0));
            }
        }
        Duration::from_secs(RETRY_WAIT_TIME)
    }

    /// Serializes the error members of a response body to JSON.
    fn serialize_error(response: &HttpResponse) -> String {
        let mut error_body = serde_json::Map::new();

        for field in ["errors", "error", "message", "raw_body"] {
            if let Some(value) = response.body.get(field) {
                error_body.insert(field.to_string(), value.clone());
            }
        }

        if let Some(request_id) = response.request_id() {
            error_body.insert(
                "error_reference".to_string(),
                serde_json::json!(format!(
                    "If you report this error, please include this id: {request_id}."
                )),
            );
        }

        serde_json::to_string(&error_body).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AccessTokenId, AccessTokenSecret, TenantIdentifier};

    fn config_with_tokens() -> CrystallizeConfig {
        CrystallizeConfig::builder()
            .tenant_identifier(TenantIdentifier::new("furniture").unwrap())
            .access_token_id(AccessTokenId::new("token-id").unwrap())
            .access_token_secret(AccessTokenSecret::new("token-secret").unwrap())
            .build()
            .unwrap()
    }

    #[test]
    fn test_access_token_headers_injected() {
        let client = HttpClient::new("https://example.com/graphql", &config_with_tokens());

        assert_eq!(
            client.default_headers().get(ACCESS_TOKEN_ID_HEADER),
            Some(&"token-id".to_string())
        );
        assert_eq!(
            client.default_headers().get(ACCESS_TOKEN_SECRET_HEADER),
            Some(&"token-secret".to_string())
        );
    }

    #[test]
    fn test_no_access_token_headers_when_unset() {
        let config = CrystallizeConfig::builder()
            .tenant_identifier(TenantIdentifier::new("furniture").unwrap())
            .build()
            .unwrap();
        let client = HttpClient::new("https://example.com/graphql", &config);

        assert!(client.default_headers().get(ACCESS_TOKEN_ID_HEADER).is_none());
        assert!(client
            .default_headers()
            .get(ACCESS_TOKEN_SECRET_HEADER)
            .is_none());
    }

    #[test]
    fn test_user_agent_with_prefix() {
        let config = CrystallizeConfig::builder()
            .tenant_identifier(TenantIdentifier::new("furniture").unwrap())
            .user_agent_prefix("Importer/2.0")
            .build()
            .unwrap();
        let client = HttpClient::new("https://example.com/graphql", &config);

        let user_agent = client.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.starts_with("Importer/2.0 | "));
        assert!(user_agent.contains("Crystallize API Library v"));
    }

    #[test]
    fn test_json_content_headers() {
        let client = HttpClient::new("https://example.com/graphql", &config_with_tokens());
        assert_eq!(
            client.default_headers().get("Content-Type"),
            Some(&"application/json".to_string())
        );
        assert_eq!(
            client.default_headers().get("Accept"),
            Some(&"application/json".to_string())
        );
    }

    #[test]
    fn test_serialize_error_keeps_error_members() {
        let mut headers = HashMap::new();
        headers.insert("x-request-id".to_string(), vec!["req-9".to_string()]);
        let response = HttpResponse::new(
            400,
            headers,
            serde_json::json!({"message": "Bad input", "other": 1}),
        );

        let message = HttpClient::serialize_error(&response);
        assert!(message.contains("Bad input"));
        assert!(message.contains("req-9"));
        assert!(!message.contains("other"));
    }
}
