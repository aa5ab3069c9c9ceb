//! Tiered usage pricing for metered subscriptions.
//!
//! Subscription plans bill metered variables (API calls, seats, storage...)
//! against a list of [`PricingTier`]s under one of two models, see
//! [`TierType`]. [`prices_for_usage_on_tier`] computes the amount owed per
//! currency.
//!
//! # Example
//!
//! ```rust
//! use crystallize_api::pricing::{prices_for_usage_on_tier, PricingTier, TierType};
//!
//! let tiers = vec![
//!     PricingTier::new(0.0, 5.0, "EUR"),
//!     PricingTier::new(3.0, 4.0, "EUR"),
//!     PricingTier::new(15.0, 3.0, "EUR"),
//! ];
//!
//! // 3 units at 5 + 1 unit at 4
//! let prices = prices_for_usage_on_tier(4.0, &tiers, TierType::Graduated).unwrap();
//! assert_eq!(prices["EUR"], 19.0);
//! ```
//!
//! The calculator is a pure function and performs no rounding; round for
//! display at the edge.

mod calculator;
mod tiers;

use std::collections::HashMap;

use thiserror::Error;

pub use calculator::{prices_for_usage_on_tier, FALLBACK_CURRENCY};
pub use tiers::{MeteredVariable, PricingTier, TierType};

/// Amount owed per currency code.
pub type Prices = HashMap<String, f64>;

/// Errors raised for invalid pricing input.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PricingError {
    /// No tiers were supplied.
    #[error("Cannot price usage without at least one pricing tier.")]
    EmptyTiers,

    /// Usage is not a number.
    #[error("Invalid usage '{usage}'.")]
    InvalidUsage {
        /// The rejected usage value.
        usage: f64,
    },

    /// The tier type name is not recognised.
    #[error("Unknown tier type '{value}'. Expected 'volume' or 'graduated'.")]
    UnknownTierType {
        /// The rejected name.
        value: String,
    },
}
