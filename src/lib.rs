//! # Crystallize API Rust SDK
//!
//! A Rust SDK for the Crystallize GraphQL APIs, providing type-safe
//! configuration, an authenticated GraphQL transport, a self-throttling
//! engine for running many requests at once, and tiered usage pricing for
//! metered subscriptions.
//!
//! ## Overview
//!
//! This SDK provides:
//! - Type-safe configuration via [`CrystallizeConfig`] and [`CrystallizeConfigBuilder`]
//! - Validated newtypes for the tenant identifier, credentials and origin override
//! - One GraphQL client per Crystallize API via [`ApiClient`]
//! - Batched execution with adaptive concurrency and retry queues via [`MassCallClient`]
//! - Volume and graduated tier pricing via [`prices_for_usage_on_tier`]
//!
//! ## Quick Start
//!
//! ```rust
//! use crystallize_api::{CrystallizeConfig, TenantIdentifier, AccessTokenId, AccessTokenSecret};
//!
//! let config = CrystallizeConfig::builder()
//!     .tenant_identifier(TenantIdentifier::new("furniture").unwrap())
//!     .access_token_id(AccessTokenId::new("token-id").unwrap())
//!     .access_token_secret(AccessTokenSecret::new("token-secret").unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.tenant_identifier().as_ref(), "furniture");
//! ```
//!
//! ## Mass Calls
//!
//! ```rust,ignore
//! use crystallize_api::{ApiClient, CrystallizeConfig, MassCallClient, MassCallOptions};
//!
//! let api = ApiClient::new(CrystallizeConfig::from_env()?);
//! let mut client = MassCallClient::new(api, MassCallOptions::default());
//!
//! for id in &product_ids {
//!     client.enqueue_pim(
//!         "query Get($id: ID!) { product { get(id: $id, language: \"en\") { name } } }",
//!         Some(serde_json::json!({ "id": id })),
//!     );
//! }
//!
//! let mut results = client.execute().await?;
//! while client.has_failed() {
//!     results.extend(client.retry().await?);
//! }
//! ```
//!
//! ## Usage Pricing
//!
//! ```rust
//! use crystallize_api::{prices_for_usage_on_tier, PricingTier, TierType};
//!
//! let tiers = vec![
//!     PricingTier::new(0.0, 0.0, "USD"),
//!     PricingTier::new(100.0, 2.0, "USD"),
//! ];
//!
//! let prices = prices_for_usage_on_tier(150.0, &tiers, TierType::Volume).unwrap();
//! assert_eq!(prices["USD"], 100.0);
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: All newtypes validate on construction
//! - **Thread-safe**: Clients are `Send + Sync` and cheap to share
//! - **Async-first**: Designed for use with Tokio async runtime

pub mod clients;
pub mod config;
pub mod error;
pub mod mass_call;
pub mod pricing;

// Re-export public types at crate root for convenience
pub use config::{
    AccessTokenId, AccessTokenSecret, CrystallizeConfig, CrystallizeConfigBuilder, HostUrl,
    TenantIdentifier,
};
pub use error::ConfigError;

// Re-export transport types
pub use clients::{
    ApiClient, EndpointId, GraphqlClient, HttpClient, HttpError, HttpResponse, HttpResponseError,
    MaxHttpRetriesExceededError, Transport, TransportError,
};

// Re-export mass-call types
pub use mass_call::{
    BatchWindow, HookError, MassCallClient, MassCallError, MassCallHooks, MassCallOptions,
    QueuedRequest, ResultMap,
};

// Re-export pricing types
pub use pricing::{
    prices_for_usage_on_tier, MeteredVariable, Prices, PricingError, PricingTier, TierType,
};

// Verify the engine can move across tasks at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<MassCallOptions>();
    assert_send_sync::<MassCallClient<ApiClient>>();
    assert_send_sync::<TransportError>();
    assert_send_sync::<MassCallError>();
};
