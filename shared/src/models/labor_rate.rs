//! Hourly labor rate table

use serde::{Deserialize, Serialize};

/// One labor rate entry, looked up by code
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LaborRate {
    pub code: String,
    pub hourly_rate: f64,
}

/// Ordered labor rate table
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RateTable {
    #[serde(default)]
    pub rates: Vec<LaborRate>,
}

impl RateTable {
    pub fn new(rates: Vec<LaborRate>) -> Self {
        Self { rates }
    }

    /// Look up an hourly rate by code. Non-finite stored rates are
    /// treated as absent.
    pub fn hourly_rate(&self, code: &str) -> Option<f64> {
        if code.is_empty() {
            return None;
        }
        self.rates
            .iter()
            .find(|r| r.code == code)
            .map(|r| r.hourly_rate)
            .filter(|hr| hr.is_finite())
    }
}
