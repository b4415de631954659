//! Purchase domain module.
//!
//! - `aggregate` - Purchase aggregate and the fields a settlement writes
//! - `status` - PurchaseStatus state machine

mod aggregate;
mod status;

pub use aggregate::{Purchase, PurchaseUpdate};
pub use status::PurchaseStatus;
