//! Totals computation
//!
//! One direction per recompute: resolved price → line total → block
//! totals → order totals. All functions are pure over plain data; the
//! editor session drives them after every discrete edit.

pub mod aggregate;
pub mod block;
pub mod line;

pub use aggregate::{order_totals, OrderTotals};
pub use block::{block_totals, labor_total, BlockTotals};
pub use line::{line_core_total, line_total, resolve_unit_price};
