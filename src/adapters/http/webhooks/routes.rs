//! Axum router configuration for inbound webhooks.

use axum::{routing::post, Router};

use super::handlers::{clerk_webhook, stripe_webhook};
use crate::adapters::http::state::AppState;

/// Create the webhook router, merged at the root.
///
/// These routes carry no bearer auth; every delivery is verified by signature.
///
/// # Routes
/// - `POST /clerk` - Identity events (Svix signed)
/// - `POST /stripe` - Payment events (Stripe signed)
pub fn webhook_routes() -> Router<AppState> {
    Router::new()
        .route("/clerk", post(clerk_webhook))
        .route("/stripe", post(stripe_webhook))
}
