//! Parts pricing
//!
//! Tier matching and sale-price derivation from a shop's pricing rule
//! set. `auto_price` chains the two: resolve the tier for a unit cost,
//! then derive the price for the configured mode.

pub mod calculator;
pub mod matcher;

pub use calculator::price_from_rule;
pub use matcher::match_tier;

use shared::models::PricingRuleSet;

/// Derive a sale price for a unit cost from the active rule set.
///
/// Returns `None` when no tier matches or the price is not computable;
/// the line then has no auto-derived price and stays editable by hand.
pub fn auto_price(cost: f64, rule_set: &PricingRuleSet) -> Option<f64> {
    let tier = match_tier(cost, &rule_set.rules)?;
    let value_percent = tier.value_percent?;
    price_from_rule(cost, rule_set.mode, value_percent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{PricingMode, PricingTier};

    fn rule_set(mode: PricingMode) -> PricingRuleSet {
        PricingRuleSet {
            mode,
            rules: vec![PricingTier::new(0.0, Some(100.0), 20.0)],
        }
    }

    #[test]
    fn test_margin_price() {
        // cost=50, margin 20% => 50 / 0.8 = 62.50
        assert_eq!(auto_price(50.0, &rule_set(PricingMode::Margin)), Some(62.5));
    }

    #[test]
    fn test_markup_price() {
        // cost=50, markup 20% => 50 * 1.2 = 60.00
        assert_eq!(auto_price(50.0, &rule_set(PricingMode::Markup)), Some(60.0));
    }

    #[test]
    fn test_no_matching_tier() {
        assert_eq!(auto_price(150.0, &rule_set(PricingMode::Margin)), None);
    }

    #[test]
    fn test_empty_rule_set() {
        let set = PricingRuleSet::default();
        assert_eq!(auto_price(50.0, &set), None);
    }
}
