//! VIN decode result model

use serde::{Deserialize, Serialize};

/// Vehicle info returned by the external VIN decoder
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct VehicleInfo {
    pub vin: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub make: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine: Option<String>,
}
