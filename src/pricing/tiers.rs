//! Pricing tier types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::pricing::{prices_for_usage_on_tier, Prices, PricingError};

/// One usage bracket of a metered price.
///
/// `threshold` is the inclusive lower bound of usage the tier starts
/// covering; `price` is the unit price within the tier (0 for a free tier).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PricingTier {
    /// Inclusive lower bound of the bracket.
    pub threshold: f64,
    /// Unit price inside the bracket.
    pub price: f64,
    /// ISO currency code the price is expressed in.
    pub currency: String,
}

impl PricingTier {
    /// Creates a tier.
    #[must_use]
    pub fn new(threshold: f64, price: f64, currency: impl Into<String>) -> Self {
        Self {
            threshold,
            price,
            currency: currency.into(),
        }
    }

    /// Returns `true` when usage inside this tier costs nothing.
    #[must_use]
    pub fn is_free(&self) -> bool {
        self.price == 0.0
    }
}

/// How usage is priced across tiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TierType {
    /// All usage is billed at the rate of the tier the total falls into.
    Volume,
    /// Each bracket of usage is billed at its own tier's rate.
    Graduated,
}

impl TierType {
    /// Returns the wire name of the tier type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Volume => "volume",
            Self::Graduated => "graduated",
        }
    }
}

impl fmt::Display for TierType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TierType {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "volume" => Ok(Self::Volume),
            "graduated" => Ok(Self::Graduated),
            _ => Err(PricingError::UnknownTierType {
                value: s.to_string(),
            }),
        }
    }
}

/// A metered variable of a subscription plan phase.
///
/// Mirrors the `meteredVariables` entries of subscription contracts, so it
/// can be deserialized straight from an API response.
///
/// # Example
///
/// ```rust
/// use crystallize_api::pricing::MeteredVariable;
///
/// let variable: MeteredVariable = serde_json::from_str(r#"{
///     "id": "api-calls",
///     "tierType": "graduated",
///     "tiers": [
///         { "threshold": 0, "price": 0, "currency": "EUR" },
///         { "threshold": 10, "price": 5, "currency": "EUR" }
///     ]
/// }"#).unwrap();
///
/// let prices = variable.prices_for_usage(12.0).unwrap();
/// assert_eq!(prices["EUR"], 10.0);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeteredVariable {
    /// Identifier of the metered variable.
    pub id: String,
    /// Pricing model applied to the tiers.
    pub tier_type: TierType,
    /// Tiers, in any order.
    pub tiers: Vec<PricingTier>,
}

impl MeteredVariable {
    /// Prices `usage` against this variable's tiers.
    ///
    /// # Errors
    ///
    /// See [`prices_for_usage_on_tier`].
    pub fn prices_for_usage(&self, usage: f64) -> Result<Prices, PricingError> {
        prices_for_usage_on_tier(usage, &self.tiers, self.tier_type)
    }
}
