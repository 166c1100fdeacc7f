//! External service boundary
//!
//! The engine consumes remote part search, VIN decoding and persistence
//! through async traits; it ships no implementations beyond test
//! doubles. Lookups are debounced with stale-result suppression;
//! persistence calls are fire-and-forget with surfaced outcomes.

pub mod lookup;
pub mod store;

pub use lookup::{
    spawn_debounced_lookup, LookupHandle, LookupOutcome, LookupService, PartCatalog, PartSearch,
    VinDecoder, VinLookup, DEBOUNCE_MS,
};
pub use store::{validate_payment, WorkOrderStore};
