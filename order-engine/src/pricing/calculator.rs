//! Sale price calculator
//!
//! Turns (cost, mode, percent) into a sale price using rust_decimal
//! precision. Margin at or above 100% clamps to the cost instead of
//! producing a negative or infinite price.

use crate::money::{round2, to_decimal, to_f64};
use rust_decimal::Decimal;
use shared::models::PricingMode;

/// Calculate a sale price from a matched tier percentage.
///
/// - `markup`: `price = cost * (1 + percent/100)`
/// - `margin`: `price = cost / (1 - percent/100)`; a margin of 100% or
///   more falls back to `price = cost` (safety clamp, not an error)
///
/// Returns `None` for a non-positive cost or non-finite percent.
pub fn price_from_rule(cost: f64, mode: PricingMode, value_percent: f64) -> Option<f64> {
    if !cost.is_finite() || cost <= 0.0 || !value_percent.is_finite() {
        return None;
    }

    let cost_dec = to_decimal(cost);
    let rate = to_decimal(value_percent) / Decimal::ONE_HUNDRED;

    let price = match mode {
        PricingMode::Markup => cost_dec * (Decimal::ONE + rate),
        PricingMode::Margin => {
            let denom = Decimal::ONE - rate;
            if denom <= Decimal::ZERO {
                // Margin >= 100% cannot be priced; charge cost with zero
                // margin. Logged so the rule author can spot it.
                tracing::debug!(
                    value_percent,
                    "Margin of 100% or more, clamping price to cost"
                );
                cost_dec
            } else {
                cost_dec / denom
            }
        }
    };

    Some(to_f64(round2(price)))
}
