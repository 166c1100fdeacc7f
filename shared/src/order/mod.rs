//! Work order data model
//!
//! Live editor types (blocks, part lines, charges, splits) plus the
//! persisted draft and totals-snapshot shapes.

pub mod draft;
pub mod snapshot;
pub mod types;

pub use draft::{DraftBlock, DraftMechanic, DraftPartLine, WorkOrderDraft};
pub use snapshot::{BlockTotalsSnapshot, TotalsSnapshot};
pub use types::{
    LaborBlock, MechanicSplit, MiscChargeItem, MiscChargeOrigin, PartLine, PaymentInput,
    PaymentOutcome, WorkOrderStatus,
};
