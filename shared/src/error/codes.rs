//! Unified error codes for the work-order system
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 4xxx: Work order errors
//! - 5xxx: Payment errors
//! - 6xxx: Parts and pricing errors
//! - 8xxx: Mechanic errors
//! - 9xxx: System / external-service errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Invalid request
    InvalidRequest = 5,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 4xxx: Work Order ====================
    /// Work order not found
    WorkOrderNotFound = 4001,
    /// Work order is already closed
    WorkOrderClosed = 4002,
    /// An order must keep at least one labor block
    LastBlockNotRemovable = 4101,
    /// Labor block index out of range
    BlockNotFound = 4102,
    /// Part line index out of range
    PartLineNotFound = 4103,
    /// Invalid quantity value
    InvalidQuantity = 4104,
    /// Invalid monetary amount
    InvalidAmount = 4105,
    /// Hourly rate required to derive hours from a labor amount
    RateRequired = 4106,

    // ==================== 5xxx: Payment ====================
    /// Payment amount must be positive
    InvalidPaymentAmount = 5001,
    /// Payment recording failed
    PaymentFailed = 5002,

    // ==================== 6xxx: Parts / Pricing ====================
    /// Catalog part not found
    PartNotFound = 6001,
    /// No pricing tier matches the given cost
    NoMatchingTier = 6002,

    // ==================== 8xxx: Mechanic ====================
    /// Mechanic not found in the roster
    MechanicNotFound = 8001,
    /// Mechanic is already assigned to this block
    MechanicAlreadyAssigned = 8002,
    /// Mechanic split percentages are invalid
    SplitPercentInvalid = 8101,
    /// Mechanic split percentages do not sum to 100
    SplitSumMismatch = 8102,

    // ==================== 9xxx: System / External ====================
    /// Internal error
    InternalError = 9001,
    /// External lookup failed
    LookupFailed = 9101,
    /// Lookup response superseded by a newer request
    LookupSuperseded = 9102,
    /// Persistence request failed
    PersistenceFailed = 9201,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the default message for this error code
    pub fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Success",
            ErrorCode::Unknown => "Unknown error",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::RequiredField => "Required field missing",
            ErrorCode::ValueOutOfRange => "Value out of range",

            // Work Order
            ErrorCode::WorkOrderNotFound => "Work order not found",
            ErrorCode::WorkOrderClosed => "Work order is already closed",
            ErrorCode::LastBlockNotRemovable => {
                "A work order must keep at least one labor block"
            }
            ErrorCode::BlockNotFound => "Labor block not found",
            ErrorCode::PartLineNotFound => "Part line not found",
            ErrorCode::InvalidQuantity => "Invalid quantity",
            ErrorCode::InvalidAmount => "Invalid amount",
            ErrorCode::RateRequired => "Hourly rate required to derive hours",

            // Payment
            ErrorCode::InvalidPaymentAmount => "Payment amount must be positive",
            ErrorCode::PaymentFailed => "Payment recording failed",

            // Parts / Pricing
            ErrorCode::PartNotFound => "Catalog part not found",
            ErrorCode::NoMatchingTier => "No pricing tier matches the given cost",

            // Mechanic
            ErrorCode::MechanicNotFound => "Mechanic not found",
            ErrorCode::MechanicAlreadyAssigned => "Mechanic is already assigned",
            ErrorCode::SplitPercentInvalid => "Mechanic split percentages are invalid",
            ErrorCode::SplitSumMismatch => "Mechanic split percentages must total 100",

            // System / External
            ErrorCode::InternalError => "Internal error",
            ErrorCode::LookupFailed => "External lookup failed",
            ErrorCode::LookupSuperseded => "Lookup superseded by a newer request",
            ErrorCode::PersistenceFailed => "Persistence request failed",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        let code = match value {
            0 => ErrorCode::Success,
            1 => ErrorCode::Unknown,
            2 => ErrorCode::ValidationFailed,
            3 => ErrorCode::NotFound,
            5 => ErrorCode::InvalidRequest,
            7 => ErrorCode::RequiredField,
            8 => ErrorCode::ValueOutOfRange,

            4001 => ErrorCode::WorkOrderNotFound,
            4002 => ErrorCode::WorkOrderClosed,
            4101 => ErrorCode::LastBlockNotRemovable,
            4102 => ErrorCode::BlockNotFound,
            4103 => ErrorCode::PartLineNotFound,
            4104 => ErrorCode::InvalidQuantity,
            4105 => ErrorCode::InvalidAmount,
            4106 => ErrorCode::RateRequired,

            5001 => ErrorCode::InvalidPaymentAmount,
            5002 => ErrorCode::PaymentFailed,

            6001 => ErrorCode::PartNotFound,
            6002 => ErrorCode::NoMatchingTier,

            8001 => ErrorCode::MechanicNotFound,
            8002 => ErrorCode::MechanicAlreadyAssigned,
            8101 => ErrorCode::SplitPercentInvalid,
            8102 => ErrorCode::SplitSumMismatch,

            9001 => ErrorCode::InternalError,
            9101 => ErrorCode::LookupFailed,
            9102 => ErrorCode::LookupSuperseded,
            9201 => ErrorCode::PersistenceFailed,

            other => return Err(InvalidErrorCode(other)),
        };
        Ok(code)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
