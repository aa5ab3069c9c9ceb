//! The logical Crystallize APIs a request can target.

use std::fmt;

use crate::config::CrystallizeConfig;

/// Default origin of the tenant-scoped APIs.
pub const DEFAULT_API_ORIGIN: &str = "https://api.crystallize.com";
/// Default origin of the PIM API.
pub const DEFAULT_PIM_ORIGIN: &str = "https://pim.crystallize.com";
/// Default origin of the shop API.
pub const DEFAULT_SHOP_API_ORIGIN: &str = "https://shop-api.crystallize.com";

/// Identifies one of the Crystallize GraphQL APIs.
///
/// Every endpoint is served by its own [`GraphqlClient`](crate::clients::GraphqlClient)
/// with its own URL and headers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EndpointId {
    /// Catalogue API (read-only published content).
    Catalogue,
    /// Search API.
    Search,
    /// Orders API.
    Orders,
    /// Subscriptions API.
    Subscriptions,
    /// PIM API (tenant-independent URL).
    Pim,
    /// Shop cart API.
    ShopCart,
}

impl EndpointId {
    /// All endpoints, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Catalogue,
        Self::Search,
        Self::Orders,
        Self::Subscriptions,
        Self::Pim,
        Self::ShopCart,
    ];

    /// Returns the short name of the endpoint, used in request keys and logs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Catalogue => "catalogue",
            Self::Search => "search",
            Self::Orders => "orders",
            Self::Subscriptions => "subscriptions",
            Self::Pim => "pim",
            Self::ShopCart => "shop-cart",
        }
    }

    /// Builds the full URL of this endpoint for the given configuration.
    ///
    /// # Example
    ///
    /// ```rust
    /// use crystallize_api::{CrystallizeConfig, EndpointId, TenantIdentifier};
    ///
    /// let config = CrystallizeConfig::builder()
    ///     .tenant_identifier(TenantIdentifier::new("furniture").unwrap())
    ///     .build()
    ///     .unwrap();
    ///
    /// assert_eq!(
    ///     EndpointId::Catalogue.url(&config),
    ///     "https://api.crystallize.com/furniture/catalogue"
    /// );
    /// assert_eq!(EndpointId::Pim.url(&config), "https://pim.crystallize.com/graphql");
    /// ```
    #[must_use]
    pub fn url(&self, config: &CrystallizeConfig) -> String {
        let tenant = config.tenant_identifier();
        let origin = config.origin().map(AsRef::as_ref);

        match self {
            Self::Pim => format!("{}/graphql", origin.unwrap_or(DEFAULT_PIM_ORIGIN)),
            Self::ShopCart => format!(
                "{}/{tenant}/cart",
                origin.unwrap_or(DEFAULT_SHOP_API_ORIGIN)
            ),
            Self::Catalogue | Self::Search | Self::Orders | Self::Subscriptions => format!(
                "{}/{tenant}/{}",
                origin.unwrap_or(DEFAULT_API_ORIGIN),
                self.as_str()
            ),
        }
    }
}

impl fmt::Display for EndpointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
