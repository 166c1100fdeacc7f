//! Interactive work-order editor session
//!
//! One `WorkOrderEditor` per session owns the rule set, rate table,
//! settings, roster and block list; there is no process-wide state.
//! Every discrete edit runs the full synchronous recompute chain
//! (resolve prices → line totals → block totals → order totals) to
//! completion; recompute is idempotent, and a rejected edit leaves the
//! previously displayed totals untouched.

use crate::allocation;
use crate::charges;
use crate::money::round2;
use crate::serializer;
use crate::services::store::WorkOrderStore;
use crate::totals::{self, OrderTotals};
use crate::utils::validation::{
    validate_required_text, validate_text, MAX_CODE_LEN, MAX_DESCRIPTION_LEN,
};
use rust_decimal::prelude::*;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{CatalogPart, Mechanic, PricingRuleSet, RateTable, WorkOrderSettings};
use shared::order::{
    DraftBlock, LaborBlock, MechanicSplit, MiscChargeItem, PartLine, WorkOrderDraft,
};

/// Which labor field the user edited; that edit is authoritative for the
/// synchronization pass it triggers.
enum LaborEdit {
    Hours(Option<f64>),
    Amount(f64),
}

/// Per-session work-order editor context
pub struct WorkOrderEditor {
    rule_set: PricingRuleSet,
    rates: RateTable,
    settings: WorkOrderSettings,
    roster: Vec<Mechanic>,
    /// Customer default rate hint, used only to pre-fill new blocks
    default_rate_code: Option<String>,
    blocks: Vec<LaborBlock>,
    totals: OrderTotals,
    /// Guards the hours/dollars synchronization against re-entry
    labor_sync_active: bool,
}

impl WorkOrderEditor {
    /// Create an editor for a new order with one starter block.
    pub fn new(
        rule_set: PricingRuleSet,
        rates: RateTable,
        settings: WorkOrderSettings,
        roster: Vec<Mechanic>,
        default_rate_code: Option<String>,
    ) -> Self {
        let starter = LaborBlock::new(default_rate_code.clone().unwrap_or_default());
        let mut editor = Self {
            rule_set,
            rates,
            settings,
            roster,
            default_rate_code,
            blocks: vec![starter],
            totals: OrderTotals::default(),
            labor_sync_active: false,
        };
        editor.recompute();
        editor
    }

    /// Restore an editor from a persisted draft. Totals are recomputed
    /// live; stored totals are never trusted over a fresh recompute.
    pub fn from_draft(
        rule_set: PricingRuleSet,
        rates: RateTable,
        settings: WorkOrderSettings,
        roster: Vec<Mechanic>,
        draft: &[DraftBlock],
    ) -> Self {
        let mut editor = Self {
            rule_set,
            rates,
            settings,
            roster,
            default_rate_code: None,
            blocks: serializer::blocks_from_draft(draft),
            totals: OrderTotals::default(),
            labor_sync_active: false,
        };
        editor.recompute();
        editor
    }

    pub fn blocks(&self) -> &[LaborBlock] {
        &self.blocks
    }

    pub fn totals(&self) -> &OrderTotals {
        &self.totals
    }

    /// Aggregated misc-charge rows for one block
    pub fn misc_charge_groups(&self, block: usize) -> AppResult<Vec<charges::MiscChargeGroup>> {
        let block = self.block(block)?;
        Ok(charges::group_misc_charges(&block.parts))
    }

    // ==================== Blocks ====================

    /// Add a labor block, pre-filling the rate code from the customer
    /// default hint. Returns the new block's index.
    pub fn add_block(&mut self) -> usize {
        let rate_code = self.default_rate_code.clone().unwrap_or_default();
        self.blocks.push(LaborBlock::new(rate_code));
        self.recompute();
        self.blocks.len() - 1
    }

    /// Remove a block. An active order always keeps at least one.
    pub fn remove_block(&mut self, index: usize) -> AppResult<()> {
        if index >= self.blocks.len() {
            return Err(AppError::new(ErrorCode::BlockNotFound));
        }
        if self.blocks.len() == 1 {
            return Err(AppError::new(ErrorCode::LastBlockNotRemovable));
        }
        self.blocks.remove(index);
        self.recompute();
        Ok(())
    }

    // ==================== Labor ====================

    pub fn set_labor_description(&mut self, block: usize, description: &str) -> AppResult<()> {
        validate_text(description, "labor_description", MAX_DESCRIPTION_LEN)?;
        self.block_mut(block)?.description = description.to_string();
        self.recompute();
        Ok(())
    }

    pub fn set_labor_rate_code(&mut self, block: usize, code: &str) -> AppResult<()> {
        validate_text(code, "labor_rate_code", MAX_CODE_LEN)?;
        self.block_mut(block)?.rate_code = code.to_string();
        self.recompute();
        Ok(())
    }

    /// Edit the hours field; the dollar figure follows.
    pub fn set_labor_hours(&mut self, block: usize, hours: Option<f64>) -> AppResult<()> {
        self.sync_labor_fields(block, LaborEdit::Hours(hours))
    }

    /// Edit the labor dollar figure directly; hours are reverse-derived
    /// from the block's hourly rate.
    pub fn set_labor_amount(&mut self, block: usize, amount: f64) -> AppResult<()> {
        self.sync_labor_fields(block, LaborEdit::Amount(amount))
    }

    /// The derived labor dollar figure for display
    pub fn labor_amount(&self, block: usize) -> AppResult<Option<f64>> {
        Ok(totals::labor_total(self.block(block)?, &self.rates))
    }

    fn sync_labor_fields(&mut self, block: usize, edit: LaborEdit) -> AppResult<()> {
        // The triggering edit is authoritative; a synchronization pass
        // must not fire another one.
        if self.labor_sync_active {
            return Ok(());
        }
        self.labor_sync_active = true;
        let result = self.apply_labor_edit(block, edit);
        self.labor_sync_active = false;
        result
    }

    fn apply_labor_edit(&mut self, block: usize, edit: LaborEdit) -> AppResult<()> {
        match edit {
            LaborEdit::Hours(hours) => {
                if let Some(h) = hours {
                    if !h.is_finite() || h < 0.0 {
                        return Err(AppError::new(ErrorCode::InvalidQuantity)
                            .with_field(format!("blocks[{}].labor_hours", block)));
                    }
                }
                self.block_mut(block)?.hours = hours;
            }
            LaborEdit::Amount(amount) => {
                if !amount.is_finite() || amount < 0.0 {
                    return Err(AppError::new(ErrorCode::InvalidAmount)
                        .with_field(format!("blocks[{}].labor_total", block)));
                }
                let rate = {
                    let b = self.block(block)?;
                    self.rates.hourly_rate(&b.rate_code).filter(|r| *r > 0.0)
                };
                let Some(rate) = rate else {
                    return Err(AppError::new(ErrorCode::RateRequired)
                        .with_field(format!("blocks[{}].labor_rate_code", block)));
                };
                let hours = round2(
                    Decimal::from_f64(amount).unwrap_or_default()
                        / Decimal::from_f64(rate).unwrap_or(Decimal::ONE),
                );
                self.block_mut(block)?.hours = hours.to_f64();
            }
        }
        self.recompute();
        Ok(())
    }

    // ==================== Part lines ====================

    pub fn set_part_number(&mut self, block: usize, line: usize, value: &str) -> AppResult<()> {
        validate_text(value, "part_number", MAX_CODE_LEN)?;
        self.line_mut(block, line)?.part_number = value.to_string();
        self.recompute();
        Ok(())
    }

    pub fn set_part_description(
        &mut self,
        block: usize,
        line: usize,
        value: &str,
    ) -> AppResult<()> {
        validate_text(value, "part_description", MAX_DESCRIPTION_LEN)?;
        self.line_mut(block, line)?.description = value.to_string();
        self.recompute();
        Ok(())
    }

    /// Edit a line's quantity. AUTO misc charges derived from this line
    /// rescale from their retained baselines.
    pub fn set_part_quantity(
        &mut self,
        block: usize,
        line: usize,
        quantity: Option<f64>,
    ) -> AppResult<()> {
        if let Some(q) = quantity {
            if !q.is_finite() || q < 0.0 {
                return Err(AppError::new(ErrorCode::InvalidQuantity)
                    .with_field(format!("blocks[{}].parts[{}].qty", block, line)));
            }
        }
        let part = self.line_mut(block, line)?;
        part.quantity = quantity;
        charges::rescale_auto_charges(part);
        self.recompute();
        Ok(())
    }

    /// Manually set (or clear) a line's sale price. A manual price is
    /// never overwritten by recompute; clearing it re-enables the
    /// one-time auto-fill.
    pub fn set_part_price(
        &mut self,
        block: usize,
        line: usize,
        price: Option<f64>,
    ) -> AppResult<()> {
        if let Some(p) = price {
            if !p.is_finite() || p < 0.0 {
                return Err(AppError::new(ErrorCode::InvalidAmount)
                    .with_field(format!("blocks[{}].parts[{}].price", block, line)));
            }
        }
        let part = self.line_mut(block, line)?;
        part.unit_price = price;
        part.price_resolved = price.is_some();
        self.recompute();
        Ok(())
    }

    /// Apply a catalog search result to a line: part number, description
    /// and unit cost come from the catalog, the quantity defaults to 1,
    /// and core/misc charges are derived from the catalog flags. The
    /// sale price resolves fresh on the next recompute.
    pub fn apply_catalog_part(
        &mut self,
        block: usize,
        line: usize,
        part: &CatalogPart,
    ) -> AppResult<()> {
        let charge_cores = self.settings.charge_for_cores_default;
        let target = self.line_mut(block, line)?;

        target.part_number = part.part_number.clone();
        target.description = part.description.clone();
        target.unit_cost = Some(part.average_cost.max(0.0));
        if target.quantity.is_none() {
            target.quantity = Some(1.0);
        }
        target.unit_price = None;
        target.price_resolved = false;

        charges::apply_catalog_charges(target, part, line, charge_cores);
        charges::rescale_auto_charges(target);
        self.recompute();
        Ok(())
    }

    pub fn remove_part_line(&mut self, block: usize, line: usize) -> AppResult<()> {
        let b = self.block_mut(block)?;
        if line >= b.parts.len() {
            return Err(AppError::new(ErrorCode::PartLineNotFound));
        }
        b.parts.remove(line);
        self.recompute();
        Ok(())
    }

    // ==================== Misc charges ====================

    /// Add a free-standing manual misc charge to a block. Manual charges
    /// are stored on the block's first line but are block-level data:
    /// they never rescale with any line's quantity.
    pub fn add_manual_charge(
        &mut self,
        block: usize,
        description: &str,
        quantity: f64,
        unit_price: f64,
    ) -> AppResult<()> {
        validate_required_text(description, "misc_charge_description", MAX_DESCRIPTION_LEN)?;
        if !quantity.is_finite() || quantity < 0.0 {
            return Err(AppError::new(ErrorCode::InvalidQuantity)
                .with_field("misc_charge_quantity"));
        }
        if !unit_price.is_finite() || unit_price < 0.0 {
            return Err(AppError::new(ErrorCode::InvalidAmount).with_field("misc_charge_price"));
        }

        let b = self.block_mut(block)?;
        let item = MiscChargeItem::manual(description, quantity, unit_price);
        match b.parts.first_mut() {
            Some(first) => first.misc_charges.push(item),
            None => {
                let mut line = PartLine::default();
                line.misc_charges.push(item);
                b.parts.push(line);
            }
        }
        self.recompute();
        Ok(())
    }

    pub fn remove_misc_charge(
        &mut self,
        block: usize,
        line: usize,
        index: usize,
    ) -> AppResult<()> {
        let part = self.line_mut(block, line)?;
        if index >= part.misc_charges.len() {
            return Err(AppError::validation("Misc charge not found"));
        }
        part.misc_charges.remove(index);
        self.recompute();
        Ok(())
    }

    // ==================== Mechanics ====================

    /// Assign a roster mechanic to a block. The percent starts unset;
    /// `distribute_splits_evenly` is the data-entry convenience, and
    /// validation happens at save.
    pub fn assign_mechanic(&mut self, block: usize, mechanic_id: &str) -> AppResult<()> {
        let mechanic = self
            .roster
            .iter()
            .find(|m| m.id == mechanic_id)
            .cloned()
            .ok_or_else(|| AppError::new(ErrorCode::MechanicNotFound))?;

        let b = self.block_mut(block)?;
        if b.assigned_mechanics
            .iter()
            .any(|s| s.mechanic_id == mechanic_id)
        {
            return Err(AppError::new(ErrorCode::MechanicAlreadyAssigned));
        }
        b.assigned_mechanics.push(MechanicSplit {
            mechanic_id: mechanic.id,
            name: mechanic.name,
            role: mechanic.role,
            percent: None,
        });
        Ok(())
    }

    pub fn remove_mechanic(&mut self, block: usize, mechanic_id: &str) -> AppResult<()> {
        let b = self.block_mut(block)?;
        let before = b.assigned_mechanics.len();
        b.assigned_mechanics.retain(|s| s.mechanic_id != mechanic_id);
        if b.assigned_mechanics.len() == before {
            return Err(AppError::new(ErrorCode::MechanicNotFound));
        }
        Ok(())
    }

    pub fn set_mechanic_percent(
        &mut self,
        block: usize,
        mechanic_id: &str,
        percent: Option<f64>,
    ) -> AppResult<()> {
        if let Some(p) = percent {
            if !p.is_finite() {
                return Err(AppError::new(ErrorCode::SplitPercentInvalid));
            }
        }
        let b = self.block_mut(block)?;
        let split = b
            .assigned_mechanics
            .iter_mut()
            .find(|s| s.mechanic_id == mechanic_id)
            .ok_or_else(|| AppError::new(ErrorCode::MechanicNotFound))?;
        split.percent = percent;
        Ok(())
    }

    /// Selection-time convenience: spread the split evenly.
    pub fn distribute_splits_evenly(&mut self, block: usize) -> AppResult<()> {
        allocation::distribute_evenly(&mut self.block_mut(block)?.assigned_mechanics);
        Ok(())
    }

    // ==================== Save ====================

    /// Save-time validation: mechanic splits (normalizing single splits)
    /// and text lengths. On failure the editor state stays as-is for
    /// correction; nothing is clamped.
    pub fn validate_for_save(&mut self) -> AppResult<()> {
        for (i, block) in self.blocks.iter_mut().enumerate() {
            allocation::validate_splits(&mut block.assigned_mechanics, i)?;
            validate_text(
                &block.description,
                &format!("blocks[{}].labor_description", i),
                MAX_DESCRIPTION_LEN,
            )?;
        }
        Ok(())
    }

    /// Validate, serialize and persist the draft. The engine performs no
    /// retries: a failed save surfaces the error and leaves the editor
    /// in its pre-save editable state.
    pub async fn save_draft(
        &mut self,
        order_id: &str,
        store: &dyn WorkOrderStore,
    ) -> AppResult<()> {
        self.validate_for_save()?;
        let draft = WorkOrderDraft::new(
            serializer::blocks_to_draft(&self.blocks),
            serializer::totals_snapshot(&self.totals),
        );
        store.save_draft(order_id, &draft).await
    }

    // ==================== Recompute ====================

    /// Full synchronous recompute: normalize lines, resolve prices,
    /// rescale auto charges, then rebuild every total. Runs to
    /// completion on every edit and is idempotent.
    fn recompute(&mut self) {
        let rule_set = &self.rule_set;
        for block in self.blocks.iter_mut() {
            normalize_lines(block);
            for line in block.parts.iter_mut() {
                totals::resolve_unit_price(line, rule_set);
                charges::rescale_auto_charges(line);
            }
        }
        self.totals =
            totals::order_totals(&self.blocks, &self.rates, self.settings.shop_supply_percent);
    }

    fn block(&self, index: usize) -> AppResult<&LaborBlock> {
        self.blocks
            .get(index)
            .ok_or_else(|| AppError::new(ErrorCode::BlockNotFound))
    }

    fn block_mut(&mut self, index: usize) -> AppResult<&mut LaborBlock> {
        self.blocks
            .get_mut(index)
            .ok_or_else(|| AppError::new(ErrorCode::BlockNotFound))
    }

    fn line_mut(&mut self, block: usize, line: usize) -> AppResult<&mut PartLine> {
        self.block_mut(block)?
            .parts
            .get_mut(line)
            .ok_or_else(|| AppError::new(ErrorCode::PartLineNotFound))
    }
}

/// Drop emptied lines (keeping any that still carry misc charges) and
/// keep exactly one trailing empty line as the insertion point.
fn normalize_lines(block: &mut LaborBlock) {
    block
        .parts
        .retain(|l| !l.is_empty() || !l.misc_charges.is_empty());

    let needs_insertion_point = block
        .parts
        .last()
        .map_or(true, |l| !(l.is_empty() && l.misc_charges.is_empty()));
    if needs_insertion_point {
        block.parts.push(PartLine::default());
    }

    charges::reindex_auto_charges(&mut block.parts);
}

#[cfg(test)]
mod tests;
