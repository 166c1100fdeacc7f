//! Work-order pricing and totals engine
//!
//! The computation core of a repair-shop work-order editor: given tiered
//! pricing rules, labor and part line items, per-item surcharges and
//! mechanic labor splits, it computes a priced, itemized invoice and
//! keeps it consistent across interactive edits.
//!
//! # Module structure
//!
//! ```text
//! order-engine/src/
//! ├── money/         # Decimal arithmetic, 2dp rounding, "—" display
//! ├── pricing/       # Tier matcher and margin/markup calculator
//! ├── charges.rs     # Core and misc surcharge resolution
//! ├── totals/        # Line, block and order totals
//! ├── allocation.rs  # Mechanic split validation
//! ├── editor/        # Per-session editor and recompute chain
//! ├── serializer.rs  # Snapshot and draft conversion
//! ├── services/      # Lookup and persistence boundary
//! └── utils/         # Logger, validation helpers
//! ```
//!
//! Data flows one direction per recompute: rule set + catalog → resolved
//! price → line total → block totals → order totals. Edits trigger a
//! full, synchronous, idempotent recompute of the chain; only the
//! external lookups (part search, VIN decode) and persistence calls are
//! asynchronous.

pub mod allocation;
pub mod charges;
pub mod editor;
pub mod money;
pub mod pricing;
pub mod serializer;
pub mod services;
pub mod totals;
pub mod utils;

// Re-export public types
pub use charges::MiscChargeGroup;
pub use editor::WorkOrderEditor;
pub use services::{LookupHandle, LookupOutcome, PartCatalog, VinDecoder, WorkOrderStore};
pub use totals::{BlockTotals, OrderTotals};

// Re-export unified error types from shared
pub use shared::error::{AppError, AppResult, ErrorCode};

// Re-export logger init
pub use utils::logger::init_logger;
