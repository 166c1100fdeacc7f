//! Block totals calculation
//!
//! One labor entry plus its part lines aggregate into labor, parts,
//! core, misc and shop-supply totals. The central invariant: the block
//! total is labor + parts + misc + shop supply; the core total is
//! display-only and already folded into the parts total, and must never
//! be added again.

use crate::charges;
use crate::money::{round2, to_decimal, to_f64};
use crate::totals::line::{line_core_total, line_total};
use rust_decimal::Decimal;
use serde::Serialize;
use shared::models::RateTable;
use shared::order::LaborBlock;

/// Computed totals for one block. `None` means "not computable", which
/// is distinct from a computed $0.
#[derive(Debug, Clone, Serialize, PartialEq, Default)]
pub struct BlockTotals {
    pub labor_total: Option<f64>,
    pub parts_total: Option<f64>,
    /// Display/report only, already inside `parts_total`
    pub core_total: f64,
    pub misc_total: f64,
    pub shop_supply_total: Option<f64>,
    pub block_total: Option<f64>,
}

/// Labor revenue: `round(hours * hourly_rate)`, `None` if either input
/// is missing.
pub fn labor_total(block: &LaborBlock, rates: &RateTable) -> Option<f64> {
    let hours = block.hours.filter(|h| h.is_finite() && *h >= 0.0)?;
    let rate = rates.hourly_rate(&block.rate_code)?;
    Some(to_f64(to_decimal(hours) * to_decimal(rate)))
}

/// Compute every total of a block.
pub fn block_totals(
    block: &LaborBlock,
    rates: &RateTable,
    shop_supply_percent: f64,
) -> BlockTotals {
    let labor = labor_total(block, rates);

    // Parts: sum of computable line totals; a running sum <= 0 is not a
    // meaningful parts total
    let mut line_sum = Decimal::ZERO;
    let mut any_line = false;
    for line in block.parts.iter().filter(|l| !l.is_empty()) {
        if let Some(lt) = line_total(line) {
            line_sum += to_decimal(lt);
            any_line = true;
        }
    }
    let parts = (any_line && line_sum > Decimal::ZERO).then(|| to_f64(line_sum));

    // Core: display sum, never re-added to the block total
    let core_sum: Decimal = block
        .parts
        .iter()
        .map(|l| to_decimal(line_core_total(l)))
        .sum();
    let core = to_f64(core_sum);

    let misc = charges::misc_total(&block.parts);

    // Shop supply is a percentage of labor only
    let shop_supply = if shop_supply_percent.is_finite() && shop_supply_percent > 0.0 {
        labor.map(|lt| {
            to_f64(to_decimal(lt) * to_decimal(shop_supply_percent) / Decimal::ONE_HUNDRED)
        })
    } else {
        Some(0.0)
    };

    // Block total treats missing addends as 0, but a block where neither
    // labor nor parts computed has no total at all
    let block_total = if labor.is_none() && parts.is_none() {
        None
    } else {
        let sum = to_decimal(labor.unwrap_or(0.0))
            + to_decimal(parts.unwrap_or(0.0))
            + to_decimal(misc)
            + to_decimal(shop_supply.unwrap_or(0.0));
        Some(to_f64(round2(sum)))
    };

    BlockTotals {
        labor_total: labor,
        parts_total: parts,
        core_total: core,
        misc_total: misc,
        shop_supply_total: shop_supply,
        block_total,
    }
}
