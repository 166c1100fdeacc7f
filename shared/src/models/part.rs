//! Part catalog model
//!
//! Candidate parts returned by the external catalog search. Surcharge
//! flags and values are carried so the editor can derive per-line core
//! and misc charges when a part is applied to a line.

use serde::{Deserialize, Serialize};

/// One misc surcharge attached to a catalog part
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogMiscCharge {
    pub description: String,
    pub price: f64,
}

/// Catalog part returned by the external search service
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CatalogPart {
    pub part_number: String,
    pub description: String,
    /// Average unit cost, the basis for auto-derived pricing
    #[serde(default)]
    pub average_cost: f64,
    #[serde(default)]
    pub core_has_charge: bool,
    #[serde(default)]
    pub core_cost: f64,
    #[serde(default)]
    pub misc_has_charge: bool,
    #[serde(default)]
    pub misc_charges: Vec<CatalogMiscCharge>,
    #[serde(default)]
    pub in_stock: f64,
}
