//! Totals snapshot - persisted shape of the computed order totals
//!
//! Every field is a rounded monetary value; a total that could not be
//! computed live is persisted as 0. A previously-stored grand total is
//! trusted on restore only if it is still derivable from the stored
//! per-block sums; live recomputation always wins over a stale value.

use serde::{Deserialize, Serialize};

/// Tolerance for monetary consistency checks (one cent)
const CENT: f64 = 0.01;

/// Per-block totals row
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct BlockTotalsSnapshot {
    pub labor_total: f64,
    pub parts_total: f64,
    pub core_total: f64,
    pub misc_total: f64,
    pub shop_supply_total: f64,
    /// The block total (labor + parts + misc + shop supply; core is
    /// already inside parts_total)
    pub labor_full_total: f64,
}

/// Order-level totals snapshot
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct TotalsSnapshot {
    pub labor_total: f64,
    pub parts_total: f64,
    pub core_total: f64,
    pub misc_total: f64,
    pub shop_supply_total: f64,
    pub grand_total: f64,
    #[serde(default)]
    pub labors: Vec<BlockTotalsSnapshot>,
}

impl TotalsSnapshot {
    /// Whether the stored grand total is derivable from the stored
    /// per-block sums (within one cent). A snapshot that fails this
    /// check carries a stale override and must be recomputed instead
    /// of trusted.
    pub fn grand_total_derivable(&self) -> bool {
        let from_blocks: f64 = self.labors.iter().map(|b| b.labor_full_total).sum();
        (self.grand_total - from_blocks).abs() <= CENT + f64::EPSILON
    }
}
