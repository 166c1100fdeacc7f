//! Order-level totals aggregation
//!
//! Plain sums of each block's corresponding total, each independently
//! re-rounded after summation.

use crate::money::{round2, to_decimal, to_f64};
use crate::totals::block::{block_totals, BlockTotals};
use rust_decimal::Decimal;
use serde::Serialize;
use shared::models::RateTable;
use shared::order::LaborBlock;

/// Computed order-level totals plus the per-block breakdowns they were
/// summed from. Derived state only, never independently mutated.
#[derive(Debug, Clone, Serialize, PartialEq, Default)]
pub struct OrderTotals {
    pub labor_total: Option<f64>,
    pub parts_total: Option<f64>,
    pub core_total: f64,
    pub misc_total: f64,
    pub shop_supply_total: Option<f64>,
    pub grand_total: Option<f64>,
    pub blocks: Vec<BlockTotals>,
}

/// Sum optional amounts: missing addends are skipped, and the sum is
/// `None` only when no addend was computable.
fn sum_defined(values: impl Iterator<Item = Option<f64>>) -> Option<f64> {
    let mut sum = Decimal::ZERO;
    let mut any = false;
    for value in values.flatten() {
        sum += to_decimal(value);
        any = true;
    }
    any.then(|| to_f64(round2(sum)))
}

/// Compute all block totals and aggregate them into order totals.
pub fn order_totals(
    blocks: &[LaborBlock],
    rates: &RateTable,
    shop_supply_percent: f64,
) -> OrderTotals {
    let per_block: Vec<BlockTotals> = blocks
        .iter()
        .map(|b| block_totals(b, rates, shop_supply_percent))
        .collect();

    let core_total = to_f64(
        per_block
            .iter()
            .map(|b| to_decimal(b.core_total))
            .sum::<Decimal>(),
    );
    let misc_total = to_f64(
        per_block
            .iter()
            .map(|b| to_decimal(b.misc_total))
            .sum::<Decimal>(),
    );

    OrderTotals {
        labor_total: sum_defined(per_block.iter().map(|b| b.labor_total)),
        parts_total: sum_defined(per_block.iter().map(|b| b.parts_total)),
        core_total,
        misc_total,
        shop_supply_total: sum_defined(per_block.iter().map(|b| b.shop_supply_total)),
        grand_total: sum_defined(per_block.iter().map(|b| b.block_total)),
        blocks: per_block,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::LaborRate;
    use shared::order::PartLine;

    fn rates() -> RateTable {
        RateTable::new(vec![LaborRate {
            code: "STD".to_string(),
            hourly_rate: 80.0,
        }])
    }

    fn block(hours: f64, price: f64) -> LaborBlock {
        LaborBlock {
            hours: Some(hours),
            rate_code: "STD".to_string(),
            parts: vec![PartLine {
                part_number: "P".to_string(),
                quantity: Some(1.0),
                unit_price: Some(price),
                price_resolved: true,
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_grand_total_is_sum_of_block_totals() {
        let blocks = vec![block(1.0, 50.0), block(2.0, 25.0)];
        let totals = order_totals(&blocks, &rates(), 0.0);

        assert_eq!(totals.labor_total, Some(240.0));
        assert_eq!(totals.parts_total, Some(75.0));
        let expected: f64 = totals
            .blocks
            .iter()
            .filter_map(|b| b.block_total)
            .sum();
        assert_eq!(totals.grand_total, Some(expected));
        assert_eq!(totals.grand_total, Some(315.0));
    }

    #[test]
    fn test_partial_blocks_still_aggregate() {
        let incomplete = LaborBlock::new("STD");
        let blocks = vec![block(1.0, 50.0), incomplete];
        let totals = order_totals(&blocks, &rates(), 0.0);
        assert_eq!(totals.grand_total, Some(130.0));
    }

    #[test]
    fn test_empty_order_has_no_grand_total() {
        let blocks = vec![LaborBlock::new("STD")];
        let totals = order_totals(&blocks, &rates(), 0.0);
        assert_eq!(totals.grand_total, None);
        assert_eq!(totals.labor_total, None);
        assert_eq!(totals.core_total, 0.0);
    }

    #[test]
    fn test_idempotent() {
        let blocks = vec![block(1.5, 62.5), block(0.5, 10.0)];
        let first = order_totals(&blocks, &rates(), 5.0);
        let second = order_totals(&blocks, &rates(), 5.0);
        assert_eq!(first, second);
    }
}
