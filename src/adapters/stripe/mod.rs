//! Stripe payment gateway adapters.
//!
//! - `StripeCheckoutAdapter` - hosted checkout against the Stripe API
//! - `MockPaymentGateway` - in-process gateway for tests and local runs

mod mock_payment_gateway;
mod stripe_adapter;

pub use mock_payment_gateway::MockPaymentGateway;
pub use stripe_adapter::{StripeCheckoutAdapter, StripeConfig};
