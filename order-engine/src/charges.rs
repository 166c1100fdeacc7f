//! Row charge resolution
//!
//! Per-line surcharges: a single flat core charge, and an open list of
//! misc charges that are either derived from catalog data (AUTO) or
//! entered by hand (MANUAL). AUTO items track their source line's
//! quantity through a retained per-unit baseline; MANUAL items are never
//! touched by quantity recompute.

use crate::money::{round2, to_decimal, to_f64};
use rust_decimal::prelude::*;
use serde::Serialize;
use shared::models::CatalogPart;
use shared::order::{MiscChargeItem, MiscChargeOrigin, PartLine};

/// One aggregated misc-charge row, grouped by (description, unit price)
/// across every line of the block
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MiscChargeGroup {
    pub description: String,
    pub unit_price: f64,
    pub quantity: f64,
    pub amount: f64,
}

/// Line quantity used for charge scaling: 0 when unset or invalid
fn effective_line_quantity(line: &PartLine) -> f64 {
    line.quantity
        .filter(|q| q.is_finite() && *q > 0.0)
        .unwrap_or(0.0)
}

/// Rounded amount of a single misc item
pub fn item_amount(item: &MiscChargeItem) -> f64 {
    to_f64(to_decimal(item.quantity) * to_decimal(item.unit_price))
}

/// Attach catalog surcharge data to a line.
///
/// The core charge is set (or cleared) from the catalog flags; existing
/// AUTO misc items are replaced by one item per catalog misc charge with
/// a baseline of 1 per unit. MANUAL items are left alone.
pub fn apply_catalog_charges(
    line: &mut PartLine,
    part: &CatalogPart,
    line_index: usize,
    charge_cores: bool,
) {
    line.core_charge = if charge_cores && part.core_has_charge {
        part.core_cost.max(0.0)
    } else {
        0.0
    };

    line.misc_charges
        .retain(|m| m.origin == MiscChargeOrigin::Manual);

    if part.misc_has_charge {
        let qty = effective_line_quantity(line);
        for charge in &part.misc_charges {
            line.misc_charges.push(MiscChargeItem {
                description: charge.description.clone(),
                quantity: qty,
                unit_price: charge.price,
                origin: MiscChargeOrigin::Auto,
                source_line_index: Some(line_index),
                baseline_quantity: Some(1.0),
            });
        }
    }
}

/// Rescale the line's AUTO misc items after a quantity change.
///
/// The live quantity recomputes as `baseline_quantity * line quantity`
/// from the retained baseline, so repeated edits never compound.
pub fn rescale_auto_charges(line: &mut PartLine) {
    let qty = effective_line_quantity(line);
    for item in &mut line.misc_charges {
        if item.origin != MiscChargeOrigin::Auto {
            continue;
        }
        let baseline = item.baseline_quantity.unwrap_or(1.0);
        item.quantity = baseline * qty;
    }
}

/// Repoint AUTO items at their owning line after lines were removed or
/// reordered.
pub fn reindex_auto_charges(lines: &mut [PartLine]) {
    for (idx, line) in lines.iter_mut().enumerate() {
        for item in &mut line.misc_charges {
            if item.origin == MiscChargeOrigin::Auto {
                item.source_line_index = Some(idx);
            }
        }
    }
}

/// Aggregate misc charges across every line of a block.
///
/// Items sharing (description, unit price) fold into one row; insertion
/// order of first appearance is preserved.
pub fn group_misc_charges(lines: &[PartLine]) -> Vec<MiscChargeGroup> {
    let mut keys: Vec<(String, i64)> = Vec::new();
    let mut quantities: Vec<Decimal> = Vec::new();
    let mut amounts: Vec<Decimal> = Vec::new();
    let mut prices: Vec<f64> = Vec::new();

    for line in lines {
        for item in &line.misc_charges {
            let price = to_f64(to_decimal(item.unit_price));
            let key = (item.description.clone(), (price * 100.0).round() as i64);

            let pos = match keys.iter().position(|k| *k == key) {
                Some(pos) => pos,
                None => {
                    keys.push(key);
                    quantities.push(Decimal::ZERO);
                    amounts.push(Decimal::ZERO);
                    prices.push(price);
                    keys.len() - 1
                }
            };

            quantities[pos] += to_decimal(item.quantity);
            amounts[pos] += to_decimal(item_amount(item));
        }
    }

    keys.into_iter()
        .enumerate()
        .map(|(i, (description, _))| MiscChargeGroup {
            description,
            unit_price: prices[i],
            quantity: quantities[i].to_f64().unwrap_or_default(),
            amount: to_f64(round2(amounts[i])),
        })
        .collect()
}

/// Sum of all aggregated misc-group amounts in a block
pub fn misc_total(lines: &[PartLine]) -> f64 {
    let total: Decimal = group_misc_charges(lines)
        .iter()
        .map(|g| to_decimal(g.amount))
        .sum();
    to_f64(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::CatalogMiscCharge;

    fn catalog_part_with_charges() -> CatalogPart {
        CatalogPart {
            part_number: "ALT-220".to_string(),
            description: "Alternator".to_string(),
            average_cost: 120.0,
            core_has_charge: true,
            core_cost: 15.0,
            misc_has_charge: true,
            misc_charges: vec![CatalogMiscCharge {
                description: "Environmental fee".to_string(),
                price: 2.0,
            }],
            in_stock: 4.0,
        }
    }

    fn line_with_quantity(qty: f64) -> PartLine {
        PartLine {
            part_number: "ALT-220".to_string(),
            quantity: Some(qty),
            ..Default::default()
        }
    }

    #[test]
    fn test_apply_catalog_charges() {
        let mut line = line_with_quantity(1.0);
        apply_catalog_charges(&mut line, &catalog_part_with_charges(), 0, true);

        assert_eq!(line.core_charge, 15.0);
        assert_eq!(line.misc_charges.len(), 1);
        assert_eq!(line.misc_charges[0].origin, MiscChargeOrigin::Auto);
        assert_eq!(line.misc_charges[0].source_line_index, Some(0));
        assert_eq!(line.misc_charges[0].baseline_quantity, Some(1.0));
        assert_eq!(line.misc_charges[0].quantity, 1.0);
    }

    #[test]
    fn test_core_charge_respects_shop_default() {
        let mut line = line_with_quantity(1.0);
        apply_catalog_charges(&mut line, &catalog_part_with_charges(), 0, false);
        assert_eq!(line.core_charge, 0.0);
    }

    #[test]
    fn test_reapply_replaces_auto_keeps_manual() {
        let mut line = line_with_quantity(1.0);
        line.misc_charges
            .push(MiscChargeItem::manual("Disposal", 1.0, 5.0));
        apply_catalog_charges(&mut line, &catalog_part_with_charges(), 0, true);
        apply_catalog_charges(&mut line, &catalog_part_with_charges(), 0, true);

        let manual_count = line
            .misc_charges
            .iter()
            .filter(|m| m.origin == MiscChargeOrigin::Manual)
            .count();
        let auto_count = line
            .misc_charges
            .iter()
            .filter(|m| m.origin == MiscChargeOrigin::Auto)
            .count();
        assert_eq!(manual_count, 1);
        assert_eq!(auto_count, 1);
    }

    #[test]
    fn test_rescale_is_not_compounding() {
        let mut line = line_with_quantity(1.0);
        apply_catalog_charges(&mut line, &catalog_part_with_charges(), 0, true);

        line.quantity = Some(3.0);
        rescale_auto_charges(&mut line);
        assert_eq!(line.misc_charges[0].quantity, 3.0);

        // Editing again must rescale from the baseline, not from the
        // previous live quantity
        line.quantity = Some(2.0);
        rescale_auto_charges(&mut line);
        assert_eq!(line.misc_charges[0].quantity, 2.0);

        line.quantity = Some(2.0);
        rescale_auto_charges(&mut line);
        assert_eq!(line.misc_charges[0].quantity, 2.0);
    }

    #[test]
    fn test_manual_items_immune_to_rescale() {
        let mut line = line_with_quantity(1.0);
        line.misc_charges
            .push(MiscChargeItem::manual("Shop towel", 1.0, 5.0));

        line.quantity = Some(4.0);
        rescale_auto_charges(&mut line);
        assert_eq!(line.misc_charges[0].quantity, 1.0);
        assert_eq!(item_amount(&line.misc_charges[0]), 5.0);
    }

    #[test]
    fn test_grouping_across_lines() {
        let mut first = line_with_quantity(2.0);
        apply_catalog_charges(&mut first, &catalog_part_with_charges(), 0, true);
        rescale_auto_charges(&mut first);

        let mut second = line_with_quantity(1.0);
        apply_catalog_charges(&mut second, &catalog_part_with_charges(), 1, true);
        rescale_auto_charges(&mut second);

        let groups = group_misc_charges(&[first, second]);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].description, "Environmental fee");
        assert_eq!(groups[0].quantity, 3.0);
        assert_eq!(groups[0].amount, 6.0);
    }

    #[test]
    fn test_same_description_different_price_not_grouped() {
        let mut line = line_with_quantity(1.0);
        line.misc_charges
            .push(MiscChargeItem::manual("Fee", 1.0, 2.0));
        line.misc_charges
            .push(MiscChargeItem::manual("Fee", 1.0, 3.0));

        let groups = group_misc_charges(&[line]);
        assert_eq!(groups.len(), 2);
    }

    #[test]
    fn test_misc_total_spans_origins() {
        let mut line = line_with_quantity(3.0);
        apply_catalog_charges(&mut line, &catalog_part_with_charges(), 0, true);
        rescale_auto_charges(&mut line);
        line.misc_charges
            .push(MiscChargeItem::manual("Disposal", 1.0, 5.0));

        // 3 * $2 auto + $5 manual
        assert_eq!(misc_total(&[line]), 11.0);
    }

    #[test]
    fn test_reindex_after_line_removal() {
        let mut first = line_with_quantity(1.0);
        apply_catalog_charges(&mut first, &catalog_part_with_charges(), 0, true);
        let mut second = line_with_quantity(1.0);
        apply_catalog_charges(&mut second, &catalog_part_with_charges(), 1, true);

        // Drop the first line; the survivor moves to index 0
        let mut lines = vec![second];
        reindex_auto_charges(&mut lines);
        assert_eq!(lines[0].misc_charges[0].source_line_index, Some(0));
    }
}
