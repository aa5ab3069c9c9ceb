//! GraphQL client for the Crystallize APIs.
//!
//! Every Crystallize API (catalogue, search, orders, subscriptions, PIM, shop
//! cart) is a GraphQL endpoint. [`GraphqlClient`] executes queries against one
//! of them, built on top of [`HttpClient`](crate::clients::HttpClient).
//!
//! # Response Structure
//!
//! GraphQL responses contain these fields in the body:
//!
//! - `data`: The query result data, returned by [`GraphqlClient::query`]
//! - `errors`: GraphQL errors, returned as [`TransportError::Graphql`](crate::clients::TransportError::Graphql)
//!
//! # Retry Behavior
//!
//! Requests are attempted [`CrystallizeConfig::tries`](crate::CrystallizeConfig::tries)
//! times on 429 (rate limited) and 500 (server error) responses.

mod client;

pub use client::GraphqlClient;
