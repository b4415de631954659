//! Payment lifecycle events decoded from a verified gateway body.
//!
//! Only checkout session events settle purchases. Everything else is
//! reported as an unsupported kind so the caller can acknowledge it.

use serde::Deserialize;
use std::collections::HashMap;

use crate::domain::foundation::TransactionRef;
use crate::domain::purchase::PurchaseStatus;

use super::ReconciliationError;

/// Outcome a payment event asserts for its checkout session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentResolution {
    Succeeded,
    Failed,
}

impl PaymentResolution {
    pub fn target_status(&self) -> PurchaseStatus {
        match self {
            PaymentResolution::Succeeded => PurchaseStatus::Completed,
            PaymentResolution::Failed => PurchaseStatus::Failed,
        }
    }
}

/// A verified payment event that settles a purchase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentEvent {
    /// Gateway event id (`evt_...`), for logs.
    pub event_id: String,
    /// Gateway event type, e.g. `checkout.session.completed`.
    pub kind: String,
    /// Checkout session id the event refers to.
    pub transaction_ref: TransactionRef,
    pub resolution: PaymentResolution,
    /// Session metadata as set at checkout creation.
    pub metadata: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct RawEvent {
    id: String,
    #[serde(rename = "type")]
    event_type: String,
    data: RawEventData,
}

#[derive(Debug, Deserialize)]
struct RawEventData {
    object: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct CheckoutSessionObject {
    id: String,
    #[serde(default)]
    payment_status: Option<String>,
    #[serde(default)]
    metadata: HashMap<String, String>,
}

impl PaymentEvent {
    /// Decodes a verified body.
    ///
    /// # Errors
    ///
    /// - `UnsupportedEventKind` for events that do not settle a purchase
    /// - `MalformedPayload` when the body or the session object is invalid
    pub fn parse(payload: &[u8]) -> Result<Self, ReconciliationError> {
        let raw: RawEvent = serde_json::from_slice(payload)
            .map_err(|e| ReconciliationError::MalformedPayload(e.to_string()))?;

        if !raw.event_type.starts_with("checkout.session.") {
            return Err(ReconciliationError::UnsupportedEventKind(raw.event_type));
        }

        let session: CheckoutSessionObject = serde_json::from_value(raw.data.object)
            .map_err(|e| ReconciliationError::MalformedPayload(e.to_string()))?;

        let resolution = match raw.event_type.as_str() {
            "checkout.session.completed" => match session.payment_status.as_deref() {
                Some("paid") | Some("no_payment_required") => PaymentResolution::Succeeded,
                // Delayed methods settle later through async_payment_* events.
                _ => {
                    return Err(ReconciliationError::UnsupportedEventKind(format!(
                        "{} ({})",
                        raw.event_type,
                        session.payment_status.as_deref().unwrap_or("unknown")
                    )))
                }
            },
            "checkout.session.async_payment_succeeded" => PaymentResolution::Succeeded,
            "checkout.session.async_payment_failed" | "checkout.session.expired" => {
                PaymentResolution::Failed
            }
            _ => return Err(ReconciliationError::UnsupportedEventKind(raw.event_type)),
        };

        let transaction_ref = TransactionRef::new(session.id)
            .map_err(|e| ReconciliationError::MalformedPayload(e.to_string()))?;

        Ok(Self {
            event_id: raw.id,
            kind: raw.event_type,
            transaction_ref,
            resolution,
            metadata: session.metadata,
        })
    }
}
