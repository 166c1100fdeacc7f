//! Shared types for the work-order system
//!
//! Plain data types used across crates: pricing-rule models, catalog and
//! settings shapes, work-order line/block types, persisted draft and
//! totals-snapshot shapes, and the unified error types. No calculation
//! logic lives here.

pub mod error;
pub mod models;
pub mod order;

// Re-exports
pub use serde::{Deserialize, Serialize};

// Error re-exports (for convenient access)
pub use error::{AppError, AppResult, ErrorCategory, ErrorCode};
