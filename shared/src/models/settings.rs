//! Work order shop settings

use serde::{Deserialize, Serialize};

fn default_shop_supply_percent() -> f64 {
    5.0
}

/// Per-shop work-order settings, configured externally
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkOrderSettings {
    /// Shop-supply fee as a percentage of labor revenue. <= 0 disables
    /// the fee.
    #[serde(default = "default_shop_supply_percent")]
    pub shop_supply_percent: f64,
    /// Whether core charges are billed by default when a catalog part
    /// carries one
    #[serde(default)]
    pub charge_for_cores_default: bool,
}

impl Default for WorkOrderSettings {
    fn default() -> Self {
        Self {
            shop_supply_percent: default_shop_supply_percent(),
            charge_for_cores_default: false,
        }
    }
}
