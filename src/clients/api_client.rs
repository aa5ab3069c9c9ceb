//! The per-tenant client bundling one GraphQL client per Crystallize API.

use async_trait::async_trait;

use crate::clients::{EndpointId, GraphqlClient, Transport, TransportError};
use crate::config::CrystallizeConfig;

/// Client for every Crystallize API of one tenant.
///
/// Owns one [`GraphqlClient`] per [`EndpointId`] and implements [`Transport`]
/// by routing each call to the matching client, which makes it the transport
/// of choice for [`MassCallClient`](crate::MassCallClient).
///
/// # Example
///
/// ```rust,ignore
/// use crystallize_api::{ApiClient, CrystallizeConfig};
///
/// let client = ApiClient::new(CrystallizeConfig::from_env()?);
/// let data = client
///     .catalogue_api("query { catalogue(path: \"/\") { name } }", None)
///     .await?;
/// ```
#[derive(Debug)]
pub struct ApiClient {
    config: CrystallizeConfig,
    catalogue: GraphqlClient,
    search: GraphqlClient,
    orders: GraphqlClient,
    subscriptions: GraphqlClient,
    pim: GraphqlClient,
    shop_cart: GraphqlClient,
}

// Verify ApiClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ApiClient>();
};

impl ApiClient {
    /// Creates the endpoint clients for `config`.
    #[must_use]
    pub fn new(config: CrystallizeConfig) -> Self {
        Self {
            catalogue: GraphqlClient::new(EndpointId::Catalogue, &config),
            search: GraphqlClient::new(EndpointId::Search, &config),
            orders: GraphqlClient::new(EndpointId::Orders, &config),
            subscriptions: GraphqlClient::new(EndpointId::Subscriptions, &config),
            pim: GraphqlClient::new(EndpointId::Pim, &config),
            shop_cart: GraphqlClient::new(EndpointId::ShopCart, &config),
            config,
        }
    }

    /// Returns the configuration the clients were built from.
    #[must_use]
    pub const fn config(&self) -> &CrystallizeConfig {
        &self.config
    }

    /// Returns the GraphQL client serving `endpoint`.
    #[must_use]
    pub const fn client(&self, endpoint: EndpointId) -> &GraphqlClient {
        match endpoint {
            EndpointId::Catalogue => &self.catalogue,
            EndpointId::Search => &self.search,
            EndpointId::Orders => &self.orders,
            EndpointId::Subscriptions => &self.subscriptions,
            EndpointId::Pim => &self.pim,
            EndpointId::ShopCart => &self.shop_cart,
        }
    }

    /// Queries the catalogue API.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] on HTTP or GraphQL failure.
    pub async fn catalogue_api(
        &self,
        query: &str,
        variables: Option<&serde_json::Value>,
    ) -> Result<serde_json::Value, TransportError> {
        self.catalogue.query(query, variables).await
    }

    /// Queries the search API.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] on HTTP or GraphQL failure.
    pub async fn search_api(
        &self,
        query: &str,
        variables: Option<&serde_json::Value>,
    ) -> Result<serde_json::Value, TransportError> {
        self.search.query(query, variables).await
    }

    /// Queries the orders API.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] on HTTP or GraphQL failure.
    pub async fn order_api(
        &self,
        query: &str,
        variables: Option<&serde_json::Value>,
    ) -> Result<serde_json::Value, TransportError> {
        self.orders.query(query, variables).await
    }

    /// Queries the subscriptions API.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] on HTTP or GraphQL failure.
    pub async fn subscription_api(
        &self,
        query: &str,
        variables: Option<&serde_json::Value>,
    ) -> Result<serde_json::Value, TransportError> {
        self.subscriptions.query(query, variables).await
    }

    /// Queries the PIM API.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] on HTTP or GraphQL failure.
    pub async fn pim_api(
        &self,
        query: &str,
        variables: Option<&serde_json::Value>,
    ) -> Result<serde_json::Value, TransportError> {
        self.pim.query(query, variables).await
    }

    /// Queries the shop cart API.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] on HTTP or GraphQL failure.
    pub async fn shop_cart_api(
        &self,
        query: &str,
        variables: Option<&serde_json::Value>,
    ) -> Result<serde_json::Value, TransportError> {
        self.shop_cart.query(query, variables).await
    }
}

#[async_trait]
impl Transport for ApiClient {
    async fn call(
        &self,
        endpoint: EndpointId,
        query: &str,
        variables: Option<&serde_json::Value>,
    ) -> Result<serde_json::Value, TransportError> {
        self.client(endpoint).query(query, variables).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TenantIdentifier;

    #[test]
    fn test_every_endpoint_has_its_own_client() {
        let config = CrystallizeConfig::builder()
            .tenant_identifier(TenantIdentifier::new("furniture").unwrap())
            .build()
            .unwrap();
        let client = ApiClient::new(config);

        for endpoint in EndpointId::ALL {
            let graphql = client.client(endpoint);
            assert_eq!(graphql.endpoint(), endpoint);
            assert_eq!(graphql.url(), endpoint.url(client.config()));
        }
    }
}
