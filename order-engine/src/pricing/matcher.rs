//! Pricing tier matcher
//!
//! Tiers are evaluated in stored order and the first eligible tier wins.
//! Overlapping ranges are the rule author's responsibility; there is no
//! specificity tie-break.

use shared::models::PricingTier;

/// Find the first tier matching a unit cost.
///
/// A tier is eligible when `cost >= from` and (`to` is open-ended or
/// `cost <= to`). Tiers missing `from` or `value_percent` are malformed
/// and skipped, never fatal. A non-finite or negative cost never
/// matches.
pub fn match_tier<'a>(cost: f64, tiers: &'a [PricingTier]) -> Option<&'a PricingTier> {
    if !cost.is_finite() || cost < 0.0 {
        return None;
    }

    for (idx, tier) in tiers.iter().enumerate() {
        let (Some(from), Some(value_percent)) = (tier.from, tier.value_percent) else {
            tracing::warn!(tier = idx, "Skipping malformed pricing tier");
            continue;
        };
        if !from.is_finite() || !value_percent.is_finite() {
            tracing::warn!(tier = idx, "Skipping malformed pricing tier");
            continue;
        }

        if cost < from {
            continue;
        }

        match tier.to {
            None => return Some(tier),
            Some(to) if cost <= to => return Some(tier),
            Some(_) => {}
        }
    }

    None
}
