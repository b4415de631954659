//! HTTP adapter for inbound webhooks.
//!
//! - `POST /clerk` - Identity events
//! - `POST /stripe` - Payment events

pub mod handlers;
pub mod routes;

pub use handlers::WebhookAck;
pub use routes::webhook_routes;
