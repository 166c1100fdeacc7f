//! Totals and draft serialization
//!
//! Converts live computed state to the persisted snapshot and draft
//! shapes, and rebuilds editor state from a stored draft. Persisted
//! monetary fields are plain rounded numbers; a total that was not
//! computable live is stored as 0.

use crate::charges;
use crate::money::{to_decimal, to_f64};
use crate::totals::OrderTotals;
use rust_decimal::Decimal;
use shared::order::{
    BlockTotalsSnapshot, DraftBlock, DraftMechanic, DraftPartLine, LaborBlock, MechanicSplit,
    MiscChargeItem, PartLine, TotalsSnapshot,
};

/// Convert live order totals into the persisted snapshot shape.
pub fn totals_snapshot(totals: &OrderTotals) -> TotalsSnapshot {
    TotalsSnapshot {
        labor_total: totals.labor_total.unwrap_or(0.0),
        parts_total: totals.parts_total.unwrap_or(0.0),
        core_total: totals.core_total,
        misc_total: totals.misc_total,
        shop_supply_total: totals.shop_supply_total.unwrap_or(0.0),
        grand_total: totals.grand_total.unwrap_or(0.0),
        labors: totals
            .blocks
            .iter()
            .map(|b| BlockTotalsSnapshot {
                labor_total: b.labor_total.unwrap_or(0.0),
                parts_total: b.parts_total.unwrap_or(0.0),
                core_total: b.core_total,
                misc_total: b.misc_total,
                shop_supply_total: b.shop_supply_total.unwrap_or(0.0),
                labor_full_total: b.block_total.unwrap_or(0.0),
            })
            .collect(),
    }
}

/// The stored grand total, if it is still derivable from the stored
/// per-block sums. Returns `None` for a stale override; the caller must
/// recompute instead of trusting it. Live recomputation always wins.
pub fn snapshot_grand_total(snapshot: &TotalsSnapshot) -> Option<f64> {
    if snapshot.grand_total_derivable() {
        Some(snapshot.grand_total)
    } else {
        tracing::warn!(
            stored = snapshot.grand_total,
            "Stored grand total not derivable from block sums, ignoring"
        );
        None
    }
}

/// Serialize blocks into the persisted draft shape.
///
/// Empty insertion-point lines are dropped; a line that only carries
/// misc charges is kept so the charges survive. Splits are expected to
/// be validated (and single splits normalized) before serialization.
pub fn blocks_to_draft(blocks: &[LaborBlock]) -> Vec<DraftBlock> {
    blocks.iter().map(block_to_draft).collect()
}

fn block_to_draft(block: &LaborBlock) -> DraftBlock {
    DraftBlock {
        labor_description: block.description.clone(),
        labor_hours: block.hours.unwrap_or(0.0),
        labor_rate_code: block.rate_code.clone(),
        assigned_mechanics: block.assigned_mechanics.iter().map(mechanic_to_draft).collect(),
        parts: block
            .parts
            .iter()
            .filter(|l| !l.is_empty() || !l.misc_charges.is_empty())
            .map(part_to_draft)
            .collect(),
    }
}

fn mechanic_to_draft(split: &MechanicSplit) -> DraftMechanic {
    DraftMechanic {
        user_id: split.mechanic_id.clone(),
        name: split.name.clone(),
        role: split.role.clone(),
        percent: split.percent.unwrap_or(0.0),
    }
}

fn part_to_draft(line: &PartLine) -> DraftPartLine {
    // The legacy shape flattens a line's misc charges to one amount
    let misc_amount: Decimal = line
        .misc_charges
        .iter()
        .map(|m| to_decimal(charges::item_amount(m)))
        .sum();
    let misc_description = line
        .misc_charges
        .iter()
        .map(|m| m.description.as_str())
        .collect::<Vec<_>>()
        .join("; ");

    DraftPartLine {
        part_number: line.part_number.clone(),
        description: line.description.clone(),
        qty: line.quantity.unwrap_or(0.0),
        cost: line.unit_cost.unwrap_or(0.0),
        price: line.unit_price.unwrap_or(0.0),
        core_charge: line.core_charge,
        misc_charge: to_f64(misc_amount),
        misc_charge_description: misc_description,
    }
}

/// Rebuild live blocks from a stored draft.
///
/// The legacy shape carries no charge origin or baselines, so restored
/// misc charges come back as MANUAL items: they are never rescaled by
/// later quantity edits. Zero-valued numeric fields are treated as
/// unset, matching how the shape is written.
pub fn blocks_from_draft(draft: &[DraftBlock]) -> Vec<LaborBlock> {
    let mut blocks: Vec<LaborBlock> = draft.iter().map(block_from_draft).collect();
    if blocks.is_empty() {
        blocks.push(LaborBlock::new(""));
    }
    blocks
}

fn block_from_draft(draft: &DraftBlock) -> LaborBlock {
    let mut parts: Vec<PartLine> = draft.parts.iter().map(part_from_draft).collect();
    parts.push(PartLine::default());

    LaborBlock {
        description: draft.labor_description.clone(),
        hours: positive(draft.labor_hours),
        rate_code: draft.labor_rate_code.clone(),
        assigned_mechanics: draft
            .assigned_mechanics
            .iter()
            .map(|m| MechanicSplit {
                mechanic_id: m.user_id.clone(),
                name: m.name.clone(),
                role: m.role.clone(),
                percent: positive(m.percent),
            })
            .collect(),
        parts,
    }
}

fn part_from_draft(draft: &DraftPartLine) -> PartLine {
    let mut misc_charges = Vec::new();
    if draft.misc_charge > 0.0 {
        let description = if draft.misc_charge_description.is_empty() {
            "Misc charge".to_string()
        } else {
            draft.misc_charge_description.clone()
        };
        misc_charges.push(MiscChargeItem::manual(description, 1.0, draft.misc_charge));
    }

    let price = positive(draft.price);
    PartLine {
        part_number: draft.part_number.clone(),
        description: draft.description.clone(),
        quantity: positive(draft.qty),
        unit_cost: positive(draft.cost),
        unit_price: price,
        price_resolved: price.is_some(),
        core_charge: draft.core_charge.max(0.0),
        misc_charges,
    }
}

fn positive(value: f64) -> Option<f64> {
    (value.is_finite() && value > 0.0).then_some(value)
}
