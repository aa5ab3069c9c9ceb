//! Volume and graduated price computation.

use crate::pricing::{Prices, PricingError, PricingTier, TierType};

/// Currency of the empty result when no tier can be matched.
pub const FALLBACK_CURRENCY: &str = "USD";

/// Computes the price of `usage` against `tiers` under `tier_type`.
///
/// Tiers may be given in any order; they are sorted by threshold first
/// (stable, so among equal thresholds the earliest-listed tier comes first).
/// No rounding is applied.
///
/// - **Volume**: a tier with threshold 0 and price 0 is prepended when the
///   lowest threshold is above 0. The leading run of free tiers forms a free
///   allowance; the rest of the usage is billed at the price of the highest
///   tier whose threshold is at most `usage`. Negative usage counts as 0.
/// - **Graduated**: usage below the lowest threshold is free. From there each
///   tier absorbs up to the width of its bracket at its own price, and the
///   amounts are summed per currency.
///
/// # Errors
///
/// Returns [`PricingError::EmptyTiers`] for an empty tier list and
/// [`PricingError::InvalidUsage`] when `usage` is NaN.
///
/// # Example
///
/// ```rust
/// use crystallize_api::pricing::{prices_for_usage_on_tier, PricingTier, TierType};
///
/// let tiers = vec![
///     PricingTier::new(0.0, 0.0, "EUR"),
///     PricingTier::new(2.0, 250.0, "EUR"),
///     PricingTier::new(20.0, 20.0, "EUR"),
/// ];
///
/// let prices = prices_for_usage_on_tier(20.0, &tiers, TierType::Volume).unwrap();
/// assert_eq!(prices["EUR"], 360.0);
/// ```
pub fn prices_for_usage_on_tier(
    usage: f64,
    tiers: &[PricingTier],
    tier_type: TierType,
) -> Result<Prices, PricingError> {
    if tiers.is_empty() {
        return Err(PricingError::EmptyTiers);
    }
    if usage.is_nan() {
        return Err(PricingError::InvalidUsage { usage });
    }

    let mut sorted = tiers.to_vec();
    sorted.sort_by(|a, b| a.threshold.total_cmp(&b.threshold));

    Ok(match tier_type {
        TierType::Volume => volume_price(usage, sorted),
        TierType::Graduated => graduated_price(usage, sorted),
    })
}

fn volume_price(usage: f64, mut tiers: Vec<PricingTier>) -> Prices {
    let usage = usage.max(0.0);

    if tiers[0].threshold > 0.0 {
        let currency = tiers[0].currency.clone();
        tiers.insert(0, PricingTier::new(0.0, 0.0, currency));
    }

    let billable = (usage - free_allowance(&tiers)).max(0.0);

    let Some(mut index) = tiers.iter().rposition(|tier| usage >= tier.threshold) else {
        return Prices::from([(FALLBACK_CURRENCY.to_string(), 0.0)]);
    };
    // duplicate thresholds: earliest-listed wins
    while index > 0 && tiers[index - 1].threshold.total_cmp(&tiers[index].threshold).is_eq() {
        index -= 1;
    }

    let tier = &tiers[index];
    Prices::from([(tier.currency.clone(), tier.price * billable)])
}

/// Usage covered by the contiguous run of free tiers at the bottom of the
/// sorted list.
fn free_allowance(tiers: &[PricingTier]) -> f64 {
    if !tiers[0].is_free() {
        return 0.0;
    }
    tiers
        .iter()
        .find(|tier| !tier.is_free())
        .map_or(f64::INFINITY, |tier| tier.threshold)
}

fn graduated_price(usage: f64, mut tiers: Vec<PricingTier>) -> Prices {
    // duplicate thresholds: earliest-listed wins
    tiers.dedup_by(|later, kept| later.threshold.total_cmp(&kept.threshold).is_eq());

    let mut remaining = (usage - tiers[0].threshold.max(0.0)).max(0.0);
    let mut prices = Prices::new();

    for (index, tier) in tiers.iter().enumerate() {
        let width = tiers
            .get(index + 1)
            .map_or(f64::INFINITY, |next| next.threshold - tier.threshold);
        let allocated = remaining.min(width);
        remaining -= allocated;

        *prices.entry(tier.currency.clone()).or_insert(0.0) += tier.price * allocated;
    }

    prices
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eur(pairs: &[(f64, f64)]) -> Vec<PricingTier> {
        pairs
            .iter()
            .map(|&(threshold, price)| PricingTier::new(threshold, price, "EUR"))
            .collect()
    }

    #[test]
    fn test_free_allowance_spans_leading_free_tiers() {
        let tiers = eur(&[(0.0, 0.0), (2.0, 0.0), (8.0, 0.0), (10.0, 5.0)]);
        assert!((free_allowance(&tiers) - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_free_allowance_is_zero_without_free_base_tier() {
        let tiers = eur(&[(0.0, 3.0), (10.0, 0.0)]);
        assert!(free_allowance(&tiers).abs() < f64::EPSILON);
    }

    #[test]
    fn test_all_free_tiers_price_to_zero() {
        let tiers = eur(&[(0.0, 0.0), (10.0, 0.0)]);
        let prices = prices_for_usage_on_tier(500.0, &tiers, TierType::Volume).unwrap();
        assert_eq!(prices, Prices::from([("EUR".to_string(), 0.0)]));
    }

    #[test]
    fn test_negative_usage_is_clamped_for_volume() {
        let tiers = eur(&[(0.0, 4.0)]);
        let prices = prices_for_usage_on_tier(-3.0, &tiers, TierType::Volume).unwrap();
        assert_eq!(prices, Prices::from([("EUR".to_string(), 0.0)]));
    }

    #[test]
    fn test_duplicate_thresholds_earliest_listed_wins() {
        let tiers = vec![
            PricingTier::new(0.0, 1.0, "EUR"),
            PricingTier::new(10.0, 7.0, "EUR"),
            PricingTier::new(10.0, 9.0, "USD"),
        ];
        let prices = prices_for_usage_on_tier(12.0, &tiers, TierType::Volume).unwrap();
        assert_eq!(prices, Prices::from([("EUR".to_string(), 84.0)]));
    }

    #[test]
    fn test_graduated_duplicate_thresholds_earliest_listed_wins() {
        let tiers = vec![
            PricingTier::new(0.0, 1.0, "EUR"),
            PricingTier::new(10.0, 7.0, "EUR"),
            PricingTier::new(10.0, 9.0, "USD"),
        ];

        // 10 units at 1 + 2 units at 7, the USD duplicate is ignored
        let prices = prices_for_usage_on_tier(12.0, &tiers, TierType::Graduated).unwrap();
        assert_eq!(prices, Prices::from([("EUR".to_string(), 24.0)]));
    }

    #[test]
    fn test_graduated_accumulates_per_currency() {
        let tiers = vec![
            PricingTier::new(0.0, 1.0, "EUR"),
            PricingTier::new(10.0, 2.0, "USD"),
            PricingTier::new(20.0, 3.0, "EUR"),
        ];
        let prices = prices_for_usage_on_tier(25.0, &tiers, TierType::Graduated).unwrap();
        assert_eq!(
            prices,
            Prices::from([("EUR".to_string(), 25.0), ("USD".to_string(), 20.0)])
        );
    }

    #[test]
    fn test_rejects_empty_tiers_and_nan_usage() {
        assert!(matches!(
            prices_for_usage_on_tier(1.0, &[], TierType::Volume),
            Err(PricingError::EmptyTiers)
        ));
        assert!(matches!(
            prices_for_usage_on_tier(f64::NAN, &eur(&[(0.0, 1.0)]), TierType::Graduated),
            Err(PricingError::InvalidUsage { .. })
        ));
    }
}
