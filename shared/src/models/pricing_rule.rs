//! Parts pricing rule model
//!
//! A shop configures one rule set: a pricing mode plus an ordered list of
//! cost tiers. Tier order is significant: the matcher evaluates tiers in
//! stored order and the first eligible tier wins. The settings surface
//! that edits and persists rule sets is a separate collaborator; the
//! engine only reads them.

use serde::{Deserialize, Serialize};

/// Pricing mode enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PricingMode {
    /// Price set so (price - cost) / price equals the tier percentage
    #[default]
    Margin,
    /// Price set so (price - cost) / cost equals the tier percentage
    Markup,
}

/// One cost tier of a pricing rule set
///
/// Wire values are permissive: a tier missing `from` or `value_percent`
/// is malformed and skipped by the matcher, never fatal. `to = None`
/// means open-ended ("from `from` upward").
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PricingTier {
    #[serde(default)]
    pub from: Option<f64>,
    #[serde(default)]
    pub to: Option<f64>,
    #[serde(default)]
    pub value_percent: Option<f64>,
}

impl PricingTier {
    pub fn new(from: f64, to: Option<f64>, value_percent: f64) -> Self {
        Self {
            from: Some(from),
            to,
            value_percent: Some(value_percent),
        }
    }
}

/// Pricing rule set entity (one per shop)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PricingRuleSet {
    pub mode: PricingMode,
    /// Ordered tiers; first eligible tier wins
    #[serde(default)]
    pub rules: Vec<PricingTier>,
}
