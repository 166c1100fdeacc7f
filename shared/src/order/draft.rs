//! Draft write shapes - the persisted block list
//!
//! The legacy persisted shape flattens each part line's misc charges to a
//! single amount plus description, and carries no charge origin. These
//! shapes must stay wire-compatible with the existing store.

use super::snapshot::TotalsSnapshot;
use serde::{Deserialize, Serialize};

/// Assigned mechanic row in the persisted shape
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DraftMechanic {
    pub user_id: String,
    pub name: String,
    #[serde(default)]
    pub role: String,
    pub percent: f64,
}

/// Persisted part line
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct DraftPartLine {
    #[serde(default)]
    pub part_number: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub qty: f64,
    #[serde(default)]
    pub cost: f64,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub core_charge: f64,
    /// Flattened misc total for this line
    #[serde(default)]
    pub misc_charge: f64,
    #[serde(default)]
    pub misc_charge_description: String,
}

/// Persisted labor block
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct DraftBlock {
    #[serde(default)]
    pub labor_description: String,
    #[serde(default)]
    pub labor_hours: f64,
    #[serde(default)]
    pub labor_rate_code: String,
    #[serde(default)]
    pub assigned_mechanics: Vec<DraftMechanic>,
    #[serde(default)]
    pub parts: Vec<DraftPartLine>,
}

/// Full draft payload handed to the store
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WorkOrderDraft {
    pub blocks: Vec<DraftBlock>,
    pub totals: TotalsSnapshot,
    /// Unix millis
    #[serde(default)]
    pub updated_at: i64,
}

impl WorkOrderDraft {
    pub fn new(blocks: Vec<DraftBlock>, totals: TotalsSnapshot) -> Self {
        Self {
            blocks,
            totals,
            updated_at: chrono::Utc::now().timestamp_millis(),
        }
    }
}
