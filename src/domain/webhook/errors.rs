//! Reconciliation error taxonomy.
//!
//! Each variant carries an acknowledgement decision. Acknowledged failures
//! answer 2xx so the sender stops retrying; unacknowledged ones do not.

use axum::http::StatusCode;
use thiserror::Error;

/// Why a webhook signature was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    #[error("missing signature header: {0}")]
    MissingHeader(&'static str),

    #[error("malformed signature header: {0}")]
    MalformedHeader(String),

    #[error("no signature matched")]
    Mismatch,

    #[error("timestamp older than tolerance")]
    TimestampTooOld,

    #[error("timestamp in the future")]
    TimestampInFuture,

    #[error("signing secret is not usable")]
    InvalidSecret,
}

/// Errors produced while reconciling an inbound lifecycle event.
#[derive(Debug, Error)]
pub enum ReconciliationError {
    /// Signature missing, malformed, stale or wrong. The body is untrusted.
    #[error("Invalid signature: {0}")]
    InvalidSignature(#[from] SignatureError),

    /// Verified event references a transaction with no recorded purchase.
    #[error("Unknown transaction: {0}")]
    UnknownTransaction(String),

    /// Verified event of a kind this service does not act on.
    #[error("Unsupported event kind: {0}")]
    UnsupportedEventKind(String),

    /// Verified body that does not decode into an event.
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    /// The persistent store could not be reached or rejected the write.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),
}

impl ReconciliationError {
    /// True when the sender should be told the event was received.
    pub fn is_acknowledged(&self) -> bool {
        matches!(
            self,
            ReconciliationError::UnknownTransaction(_)
                | ReconciliationError::UnsupportedEventKind(_)
        )
    }

    /// True when a redelivery may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ReconciliationError::StoreUnavailable(_))
    }

    /// Maps the error to the HTTP status returned to the sender.
    ///
    /// - 2xx: acknowledged, no retry
    /// - 4xx: rejected
    /// - 5xx: sender retries with backoff
    pub fn status_code(&self) -> StatusCode {
        match self {
            ReconciliationError::InvalidSignature(_) => StatusCode::UNAUTHORIZED,
            ReconciliationError::UnknownTransaction(_)
            | ReconciliationError::UnsupportedEventKind(_) => StatusCode::OK,
            ReconciliationError::MalformedPayload(_) => StatusCode::BAD_REQUEST,
            ReconciliationError::StoreUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ══════════════════════════════════════════════════════════════
    // Display
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn invalid_signature_displays_reason() {
        let err = ReconciliationError::from(SignatureError::Mismatch);
        assert_eq!(format!("{}", err), "Invalid signature: no signature matched");
    }

    #[test]
    fn unknown_transaction_displays_reference() {
        let err = ReconciliationError::UnknownTransaction("cs_test_9".to_string());
        assert_eq!(format!("{}", err), "Unknown transaction: cs_test_9");
    }

    // ══════════════════════════════════════════════════════════════
    // Acknowledgement and status codes
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn invalid_signature_is_rejected_without_ack() {
        let err = ReconciliationError::from(SignatureError::TimestampTooOld);
        assert!(!err.is_acknowledged());
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn unknown_transaction_is_acknowledged() {
        let err = ReconciliationError::UnknownTransaction("cs_1".to_string());
        assert!(err.is_acknowledged());
        assert!(!err.is_retryable());
        assert_eq!(err.status_code(), StatusCode::OK);
    }

    #[test]
    fn unsupported_kind_is_acknowledged() {
        let err = ReconciliationError::UnsupportedEventKind("payment_intent.created".to_string());
        assert!(err.is_acknowledged());
        assert_eq!(err.status_code(), StatusCode::OK);
    }

    #[test]
    fn malformed_payload_is_a_client_error() {
        let err = ReconciliationError::MalformedPayload("missing id".to_string());
        assert!(!err.is_acknowledged());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn store_unavailable_asks_for_retry() {
        let err = ReconciliationError::StoreUnavailable("pool timed out".to_string());
        assert!(!err.is_acknowledged());
        assert!(err.is_retryable());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
