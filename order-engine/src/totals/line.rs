//! Line total calculation
//!
//! The core charge is folded into the per-unit price before the quantity
//! multiplication, so a line total already carries its core amount.

use crate::money::{round2, to_decimal, to_f64};
use crate::pricing::auto_price;
use shared::models::PricingRuleSet;
use shared::order::PartLine;

/// Auto-fill the sale price from the unit cost, once per line.
///
/// A price that has been resolved before (by auto-fill or by a manual
/// edit) is never overwritten. A cost with no matching tier leaves the
/// line unresolved so a later rule reload can still fill it.
pub fn resolve_unit_price(line: &mut PartLine, rule_set: &PricingRuleSet) {
    if line.price_resolved || line.unit_price.is_some() {
        return;
    }
    let Some(cost) = line.unit_cost else {
        return;
    };
    if let Some(price) = auto_price(cost, rule_set) {
        line.unit_price = Some(price);
        line.price_resolved = true;
    }
}

/// Line total: `round(quantity * round(unit_price + core_charge))`.
///
/// `None` when the line is empty, the quantity is missing or not
/// positive, or the price is unresolved; an incomplete line displays as
/// "—", which must stay distinct from a genuinely zero line.
pub fn line_total(line: &PartLine) -> Option<f64> {
    if line.is_empty() {
        return None;
    }
    let quantity = line.quantity.filter(|q| q.is_finite() && *q > 0.0)?;
    let price = line.unit_price.filter(|p| p.is_finite() && *p >= 0.0)?;

    let per_unit = round2(to_decimal(price) + to_decimal(line.core_charge));
    Some(to_f64(round2(per_unit * to_decimal(quantity))))
}

/// Core amount of a line: `quantity * core_charge`, 0 when not
/// computable. Display/report only, already inside the line total.
pub fn line_core_total(line: &PartLine) -> f64 {
    if line.is_empty() || line.core_charge <= 0.0 {
        return 0.0;
    }
    let quantity = line
        .quantity
        .filter(|q| q.is_finite() && *q > 0.0)
        .unwrap_or(0.0);
    to_f64(to_decimal(quantity) * to_decimal(line.core_charge))
}
