//! HTTP handlers for inbound lifecycle webhooks.
//!
//! Both endpoints take the raw body so signatures are checked over the exact
//! bytes that were sent. The response body only tells the sender whether the
//! delivery was received; the status code decides whether it retries.

use axum::body::Bytes;
use axum::extract::{Json, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::adapters::http::state::AppState;
use crate::application::handlers::{HandleIdentityEventCommand, HandlePaymentEventCommand};
use crate::domain::webhook::{
    ReconciliationError, SvixHeaders, SVIX_ID_HEADER, SVIX_SIGNATURE_HEADER,
    SVIX_TIMESTAMP_HEADER,
};

pub const STRIPE_SIGNATURE_HEADER: &str = "stripe-signature";

/// Acknowledgement body for webhook senders.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct WebhookAck {
    pub received: bool,
}

fn header(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

fn respond<T>(result: Result<T, ReconciliationError>) -> Response {
    let (status, received) = match result {
        Ok(_) => (StatusCode::OK, true),
        Err(err) => (err.status_code(), err.is_acknowledged()),
    };
    (status, Json(WebhookAck { received })).into_response()
}

/// POST /stripe - Payment gateway events
pub async fn stripe_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let cmd = HandlePaymentEventCommand {
        payload: body.to_vec(),
        signature: header(&headers, STRIPE_SIGNATURE_HEADER),
    };

    respond(state.payment_event_handler().handle(cmd).await)
}

/// POST /clerk - Identity provider events
pub async fn clerk_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let cmd = HandleIdentityEventCommand {
        payload: body.to_vec(),
        headers: SvixHeaders {
            id: header(&headers, SVIX_ID_HEADER),
            timestamp: header(&headers, SVIX_TIMESTAMP_HEADER),
            signature: header(&headers, SVIX_SIGNATURE_HEADER),
        },
    };

    respond(state.identity_event_handler().handle(cmd).await)
}
