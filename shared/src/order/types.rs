//! Live work-order editor types

use serde::{Deserialize, Serialize};

// ============================================================================
// Status
// ============================================================================

/// Work order status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkOrderStatus {
    #[default]
    Draft,
    Open,
    Completed,
    Paid,
}

// ============================================================================
// Mechanic split
// ============================================================================

/// One mechanic's share of a block's labor revenue
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MechanicSplit {
    pub mechanic_id: String,
    pub name: String,
    #[serde(default)]
    pub role: String,
    /// Share of the block's labor, in percent. Absent means "not yet
    /// entered"; a single-mechanic split normalizes to 100 at save.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percent: Option<f64>,
}

// ============================================================================
// Misc charges
// ============================================================================

/// Origin of a misc charge item
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MiscChargeOrigin {
    /// Derived from catalog surcharge data; rescales with its source
    /// line's quantity
    Auto,
    /// Entered by hand; never touched by quantity recompute
    Manual,
}

/// One misc surcharge item attached to a part line
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MiscChargeItem {
    pub description: String,
    /// Live quantity. For AUTO items this is
    /// `baseline_quantity * source line quantity`.
    pub quantity: f64,
    pub unit_price: f64,
    pub origin: MiscChargeOrigin,
    /// Index of the part line this item was derived from (AUTO only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_line_index: Option<usize>,
    /// Per-catalog-unit quantity, fixed at derivation (AUTO only).
    /// Retained separately from the live quantity so repeated edits
    /// never compound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub baseline_quantity: Option<f64>,
}

impl MiscChargeItem {
    /// A free-standing, user-entered charge
    pub fn manual(description: impl Into<String>, quantity: f64, unit_price: f64) -> Self {
        Self {
            description: description.into(),
            quantity,
            unit_price,
            origin: MiscChargeOrigin::Manual,
            source_line_index: None,
            baseline_quantity: None,
        }
    }
}

// ============================================================================
// Part line
// ============================================================================

/// One part line of a labor block
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PartLine {
    #[serde(default)]
    pub part_number: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    /// Catalog-derived unit cost; read-only in the editor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_cost: Option<f64>,
    /// Sale price per unit. Auto-filled once from the pricing rules,
    /// editable afterwards.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<f64>,
    /// Set once the price has been resolved (auto-fill or manual edit);
    /// a resolved price is never overwritten by recompute.
    #[serde(default)]
    pub price_resolved: bool,
    /// Flat per-unit core charge
    #[serde(default)]
    pub core_charge: f64,
    #[serde(default)]
    pub misc_charges: Vec<MiscChargeItem>,
}

impl PartLine {
    /// A line with no populated field is "empty": excluded from totals
    /// and serialization, kept only as the trailing insertion point.
    pub fn is_empty(&self) -> bool {
        self.part_number.trim().is_empty()
            && self.description.trim().is_empty()
            && self.quantity.is_none()
            && self.unit_cost.is_none()
            && self.unit_price.is_none()
    }
}

// ============================================================================
// Labor block
// ============================================================================

/// One labor entry plus its associated part lines: the unit of totals
/// aggregation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct LaborBlock {
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours: Option<f64>,
    /// Reference into the external hourly-rate table
    #[serde(default)]
    pub rate_code: String,
    /// Unique by mechanic id; order preserved
    #[serde(default)]
    pub assigned_mechanics: Vec<MechanicSplit>,
    #[serde(default)]
    pub parts: Vec<PartLine>,
}

impl LaborBlock {
    /// A fresh block with one empty part line as the insertion point
    pub fn new(rate_code: impl Into<String>) -> Self {
        Self {
            rate_code: rate_code.into(),
            parts: vec![PartLine::default()],
            ..Default::default()
        }
    }
}

// ============================================================================
// Payments (external state, read for display only)
// ============================================================================

/// Payment input for recording a payment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentInput {
    pub amount: f64,
    pub payment_method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Outcome of a recorded payment, as reported by the store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentOutcome {
    pub paid_amount: f64,
    pub remaining_balance: f64,
    pub is_fully_paid: bool,
}
