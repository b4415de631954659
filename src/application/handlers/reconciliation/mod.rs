//! Webhook reconciliation handlers.
//!
//! Both handlers verify the delivery before reading it and report every
//! outcome as either a success or a [`ReconciliationError`] the HTTP layer
//! maps to a status code.
//!
//! [`ReconciliationError`]: crate::domain::webhook::ReconciliationError

mod handle_identity_event;
mod handle_payment_event;

pub use handle_identity_event::{
    HandleIdentityEventCommand, HandleIdentityEventHandler, IdentityEventOutcome,
};
pub use handle_payment_event::{
    HandlePaymentEventCommand, HandlePaymentEventHandler, PaymentEventOutcome,
};
