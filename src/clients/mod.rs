//! Transport layer for the Crystallize GraphQL APIs.
//!
//! This module provides the HTTP and GraphQL plumbing the rest of the SDK is
//! built on. It handles authentication headers, request/response processing,
//! retry logic, and GraphQL error detection.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`EndpointId`]: Which Crystallize API a request targets
//! - [`HttpClient`]: The async HTTP client bound to one endpoint URL
//! - [`HttpResponse`]: A parsed response from the API
//! - [`GraphqlClient`]: Executes GraphQL queries against one endpoint
//! - [`ApiClient`]: One [`GraphqlClient`] per endpoint for a tenant
//! - [`Transport`]: The single-request contract consumed by the mass-call engine
//! - [`TransportError`]: Error of a [`Transport`] call
//!
//! # Example
//!
//! ```rust,ignore
//! use crystallize_api::clients::{ApiClient, EndpointId, Transport};
//! use crystallize_api::CrystallizeConfig;
//!
//! let client = ApiClient::new(CrystallizeConfig::from_env()?);
//! let data = client
//!     .call(EndpointId::Search, "query { search { edges { node { name } } } }", None)
//!     .await?;
//! ```
//!
//! # Retry Behavior
//!
//! The HTTP client implements automatic retry logic for transient failures:
//!
//! - **429 (Rate Limited)**: Retries using `Retry-After` header value, or 1 second if not present
//! - **500 (Server Error)**: Retries with fixed 1-second delay
//! - **Other errors (4xx)**: Returns immediately without retry
//!
//! The default `tries` is 1, meaning no automatic retries. Configure via
//! [`CrystallizeConfigBuilder::tries`](crate::CrystallizeConfigBuilder::tries).

mod api_client;
mod endpoint;
mod errors;
pub mod graphql;
mod http_client;
mod http_response;
mod transport;

pub use api_client::ApiClient;
pub use endpoint::{EndpointId, DEFAULT_API_ORIGIN, DEFAULT_PIM_ORIGIN, DEFAULT_SHOP_API_ORIGIN};
pub use errors::{HttpError, HttpResponseError, MaxHttpRetriesExceededError};
pub use http_client::{HttpClient, ACCESS_TOKEN_ID_HEADER, ACCESS_TOKEN_SECRET_HEADER, SDK_VERSION};
pub use http_response::HttpResponse;
pub use transport::{Transport, TransportError};

pub use graphql::GraphqlClient;
