//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// Categories are determined by the leading digit of the error code:
/// - 0xxx: General errors
/// - 4xxx: Work order errors
/// - 5xxx: Payment errors
/// - 6xxx: Parts and pricing errors
/// - 8xxx: Mechanic errors
/// - 9xxx: System / external errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Work order errors (4xxx)
    WorkOrder,
    /// Payment errors (5xxx)
    Payment,
    /// Parts and pricing errors (6xxx)
    Parts,
    /// Mechanic errors (8xxx)
    Mechanic,
    /// System / external errors (9xxx)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            4000..5000 => Self::WorkOrder,
            5000..6000 => Self::Payment,
            6000..7000 => Self::Parts,
            8000..9000 => Self::Mechanic,
            _ => Self::System,
        }
    }

    /// Get the string name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::WorkOrder => "work_order",
            Self::Payment => "payment",
            Self::Parts => "parts",
            Self::Mechanic => "mechanic",
            Self::System => "system",
        }
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}
