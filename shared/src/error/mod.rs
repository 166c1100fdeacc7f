//! Unified error system for the work-order engine
//!
//! - [`ErrorCode`]: standardized error codes for all error types
//! - [`ErrorCategory`]: classification of errors by domain
//! - [`AppError`]: rich error type with codes, messages, and details
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 4xxx: Work order errors
//! - 5xxx: Payment errors
//! - 6xxx: Parts and pricing errors
//! - 8xxx: Mechanic errors
//! - 9xxx: System / external-service errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode};
//!
//! // Create a simple error
//! let err = AppError::new(ErrorCode::BlockNotFound);
//!
//! // Create a field-addressable validation error
//! let err = AppError::new(ErrorCode::SplitSumMismatch)
//!     .with_field("assigned_mechanics[0].percent");
//! ```

mod category;
mod codes;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{AppError, AppResult};
