//! HandlePaymentEventHandler - settles purchases from signed gateway events.

use std::sync::Arc;

use crate::domain::foundation::{CourseId, DomainError, PurchaseId, Timestamp, UserId};
use crate::domain::purchase::PurchaseStatus;
use crate::domain::webhook::{PaymentEvent, ReconciliationError, StripeSignatureVerifier};
use crate::ports::PurchaseRepository;

/// Command carrying one raw gateway delivery.
#[derive(Debug, Clone)]
pub struct HandlePaymentEventCommand {
    /// Exact request body bytes.
    pub payload: Vec<u8>,
    /// `Stripe-Signature` header value, if sent.
    pub signature: Option<String>,
}

/// Successful outcomes. Every variant is acknowledged to the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentEventOutcome {
    /// Purchase moved to completed; the buyer is now enrolled.
    PurchaseCompleted {
        purchase_id: PurchaseId,
        user_id: UserId,
        course_id: CourseId,
    },
    /// Purchase moved to failed.
    PurchaseFailed { purchase_id: PurchaseId },
    /// Purchase was already settled, by an earlier delivery or a concurrent one.
    AlreadyTerminal { purchase_id: PurchaseId },
}

/// Handler for payment lifecycle webhooks.
///
/// Steps: verify signature, decode event, look up the purchase by transaction
/// reference, settle it with one conditional update.
pub struct HandlePaymentEventHandler {
    verifier: Arc<StripeSignatureVerifier>,
    purchases: Arc<dyn PurchaseRepository>,
}

impl HandlePaymentEventHandler {
    pub fn new(verifier: Arc<StripeSignatureVerifier>, purchases: Arc<dyn PurchaseRepository>) -> Self {
        Self {
            verifier,
            purchases,
        }
    }

    pub async fn handle(
        &self,
        cmd: HandlePaymentEventCommand,
    ) -> Result<PaymentEventOutcome, ReconciliationError> {
        let result = self.process(cmd).await;
        match &result {
            Ok(outcome) => tracing::info!(?outcome, "Payment event reconciled"),
            Err(err) if err.is_acknowledged() => {
                tracing::info!(error = %err, "Payment event acknowledged without change")
            }
            Err(err) => tracing::warn!(
                error = %err,
                retryable = err.is_retryable(),
                "Payment event rejected"
            ),
        }
        result
    }

    async fn process(
        &self,
        cmd: HandlePaymentEventCommand,
    ) -> Result<PaymentEventOutcome, ReconciliationError> {
        // 1. Nothing is trusted before the signature checks out
        self.verifier
            .verify(&cmd.payload, cmd.signature.as_deref())?;

        // 2. Decode; unsupported kinds surface as an acknowledged error
        let event = PaymentEvent::parse(&cmd.payload)?;
        tracing::debug!(
            event_id = %event.event_id,
            kind = %event.kind,
            transaction_ref = %event.transaction_ref,
            "Verified payment event"
        );

        // 3. Idempotency check
        let purchase = self
            .purchases
            .find_by_transaction_ref(&event.transaction_ref)
            .await
            .map_err(store_unavailable)?
            .ok_or_else(|| {
                ReconciliationError::UnknownTransaction(event.transaction_ref.to_string())
            })?;

        if purchase.is_terminal() {
            return Ok(PaymentEventOutcome::AlreadyTerminal {
                purchase_id: purchase.id,
            });
        }

        // 4. Conditional transition
        let target = event.resolution.target_status();
        let Ok(update) = purchase.settle(target, Timestamp::now()) else {
            return Ok(PaymentEventOutcome::AlreadyTerminal {
                purchase_id: purchase.id,
            });
        };

        let applied = self
            .purchases
            .update_if_status(&purchase.id, PurchaseStatus::Pending, target, update)
            .await
            .map_err(store_unavailable)?;

        if !applied {
            return Ok(PaymentEventOutcome::AlreadyTerminal {
                purchase_id: purchase.id,
            });
        }

        Ok(match target {
            PurchaseStatus::Completed => PaymentEventOutcome::PurchaseCompleted {
                purchase_id: purchase.id,
                user_id: purchase.user_id,
                course_id: purchase.course_id,
            },
            _ => PaymentEventOutcome::PurchaseFailed {
                purchase_id: purchase.id,
            },
        })
    }
}

fn store_unavailable(err: DomainError) -> ReconciliationError {
    ReconciliationError::StoreUnavailable(err.to_string())
}
