//! GraphQL client implementation for a single Crystallize endpoint.
//!
//! This module provides the [`GraphqlClient`] type for executing GraphQL queries
//! against one of the Crystallize APIs.

use crate::clients::{EndpointId, HttpClient, TransportError};
use crate::config::CrystallizeConfig;

/// GraphQL client bound to one Crystallize endpoint.
///
/// Posts `{"query": ..., "variables": ...}` and unwraps the `data` member of
/// the response. Unlike a plain HTTP call, a response carrying a non-empty
/// GraphQL `errors` array is turned into [`TransportError::Graphql`].
///
/// # Thread Safety
///
/// `GraphqlClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use crystallize_api::{CrystallizeConfig, EndpointId, GraphqlClient, TenantIdentifier};
///
/// let config = CrystallizeConfig::builder()
///     .tenant_identifier(TenantIdentifier::new("furniture").unwrap())
///     .build()
///     .unwrap();
///
/// let client = GraphqlClient::new(EndpointId::Catalogue, &config);
/// let data = client.query("query { catalogue(path: \"/\") { name } }", None).await?;
/// println!("Root: {}", data["catalogue"]["name"]);
/// ```
#[derive(Debug)]
pub struct GraphqlClient {
    /// The internal HTTP client for making requests.
    http_client: HttpClient,
    /// Which API this client talks to.
    endpoint: EndpointId,
    /// Attempts per request on 429/500.
    tries: u32,
}

// Verify GraphqlClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<GraphqlClient>();
};

impl GraphqlClient {
    /// Creates a new GraphQL client for `endpoint`.
    #[must_use]
    pub fn new(endpoint: EndpointId, config: &CrystallizeConfig) -> Self {
        let url = endpoint.url(config);
        tracing::debug!("Creating {} GraphQL client for {}", endpoint, url);

        Self {
            http_client: HttpClient::new(url, config),
            endpoint,
            tries: config.tries(),
        }
    }

    /// Returns the endpoint this client talks to.
    #[must_use]
    pub const fn endpoint(&self) -> EndpointId {
        self.endpoint
    }

    /// Returns the endpoint URL.
    #[must_use]
    pub fn url(&self) -> &str {
        self.http_client.url()
    }

    /// Returns the underlying HTTP client.
    #[must_use]
    pub const fn http_client(&self) -> &HttpClient {
        &self.http_client
    }

    /// Executes a GraphQL query and returns the `data` member of the response.
    ///
    /// A missing `data` member yields `null`.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Http`] for HTTP-level failures and
    /// [`TransportError::Graphql`] when the response lists GraphQL errors.
    pub async fn query(
        &self,
        query: &str,
        variables: Option<&serde_json::Value>,
    ) -> Result<serde_json::Value, TransportError> {
        let body = serde_json::json!({
            "query": query,
            "variables": variables
        });

        let response = self.http_client.post_json(&body, self.tries).await?;

        if let Some(errors) = response.graphql_errors() {
            let error = TransportError::from_graphql_errors(response.code, errors);
            tracing::warn!("GraphQL errors from {} API: {}", self.endpoint, error);
            return Err(error);
        }

        Ok(response
            .body
            .get("data")
            .cloned()
            .unwrap_or(serde_json::Value::Null))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TenantIdentifier;

    fn create_config() -> CrystallizeConfig {
        CrystallizeConfig::builder()
            .tenant_identifier(TenantIdentifier::new("furniture").unwrap())
            .tries(3)
            .build()
            .unwrap()
    }

    #[test]
    fn test_graphql_client_targets_endpoint_url() {
        let client = GraphqlClient::new(EndpointId::Orders, &create_config());

        assert_eq!(client.endpoint(), EndpointId::Orders);
        assert_eq!(client.url(), "https://api.crystallize.com/furniture/orders");
    }

    #[test]
    fn test_graphql_client_takes_tries_from_config() {
        let client = GraphqlClient::new(EndpointId::Pim, &create_config());
        assert_eq!(client.tries, 3);
    }

    #[test]
    fn test_graphql_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<GraphqlClient>();
    }
}
