//! Mechanic roster model

use serde::{Deserialize, Serialize};

/// Roster entry for the allocation UI
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Mechanic {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub role: String,
}
