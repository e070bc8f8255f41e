//! Domain types and models
//!
//! Value types shared by the token exchange, the order API client and the
//! record lifecycle coordinator.

pub mod credentials;
pub mod order;
pub mod record;

pub use credentials::{Credentials, Token};
pub use order::{Amount, OrderIntent, OrderPayload, PurchaseUnit};
pub use record::{CleanupOutcome, RecordKey, RecordLocation, SearchOutcome};

/// `true` when `value` is empty or whitespace only.
pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
