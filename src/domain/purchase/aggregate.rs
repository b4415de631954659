//! Purchase aggregate entity.
//!
//! A Purchase records one buyer's attempt to pay for one course through a
//! hosted checkout session. Enrollment is derived from completed purchases.
//!
//! # Design Decisions
//!
//! - **Money in cents**: amounts are `i64` cents, never floats
//! - **Gateway reference is unique**: one purchase per checkout session
//! - **Settled once**: `completed` and `failed` are terminal

use crate::domain::foundation::{
    CourseId, DomainError, ErrorCode, PurchaseId, StateMachine, Timestamp, TransactionRef, UserId,
};
use serde::{Deserialize, Serialize};

use super::PurchaseStatus;

/// Purchase aggregate.
///
/// # Invariants
///
/// - `transaction_ref` is unique across purchases
/// - `completed_at` is set iff `status == Completed`
/// - `amount_cents >= 0`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Purchase {
    pub id: PurchaseId,
    pub user_id: UserId,
    pub course_id: CourseId,
    pub amount_cents: i64,
    pub status: PurchaseStatus,
    pub transaction_ref: TransactionRef,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub completed_at: Option<Timestamp>,
}

/// Fields written together with a status change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PurchaseUpdate {
    pub completed_at: Option<Timestamp>,
    pub updated_at: Timestamp,
}

impl Purchase {
    /// Records a new pending purchase for a freshly created checkout session.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a negative amount.
    pub fn create_pending(
        id: PurchaseId,
        user_id: UserId,
        course_id: CourseId,
        amount_cents: i64,
        transaction_ref: TransactionRef,
    ) -> Result<Self, DomainError> {
        if amount_cents < 0 {
            return Err(DomainError::validation(
                "amount_cents",
                "Purchase amount cannot be negative",
            ));
        }

        let now = Timestamp::now();
        Ok(Self {
            id,
            user_id,
            course_id,
            amount_cents,
            status: PurchaseStatus::Pending,
            transaction_ref,
            created_at: now,
            updated_at: now,
            completed_at: None,
        })
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Validates a settlement and returns the fields to write with it.
    ///
    /// The caller persists the change with a conditional update keyed on the
    /// current status, so two concurrent settlements cannot both land.
    ///
    /// # Errors
    ///
    /// `InvalidStateTransition` when the purchase is already terminal or the
    /// target is not a settlement status.
    pub fn settle(&self, target: PurchaseStatus, at: Timestamp) -> Result<PurchaseUpdate, DomainError> {
        self.status.transition_to(target).map_err(|_| {
            DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!(
                    "Cannot transition purchase from {} to {}",
                    self.status, target
                ),
            )
            .with_detail("purchase_id", self.id.to_string())
        })?;

        Ok(PurchaseUpdate {
            completed_at: (target == PurchaseStatus::Completed).then_some(at),
            updated_at: at,
        })
    }

    /// Applies a settlement previously validated with [`Purchase::settle`].
    pub fn apply(&mut self, status: PurchaseStatus, update: PurchaseUpdate) {
        self.status = status;
        self.completed_at = update.completed_at;
        self.updated_at = update.updated_at;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending_purchase() -> Purchase {
        Purchase::create_pending(
            PurchaseId::new(),
            UserId::new("user_1").unwrap(),
            CourseId::new(),
            4_999,
            TransactionRef::new("cs_test_1").unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn create_pending_starts_pending_without_completion_time() {
        let purchase = pending_purchase();

        assert_eq!(purchase.status, PurchaseStatus::Pending);
        assert_eq!(purchase.amount_cents, 4_999);
        assert!(purchase.completed_at.is_none());
        assert!(!purchase.is_terminal());
    }

    #[test]
    fn create_pending_rejects_negative_amount() {
        let result = Purchase::create_pending(
            PurchaseId::new(),
            UserId::new("user_1").unwrap(),
            CourseId::new(),
            -1,
            TransactionRef::new("cs_test_1").unwrap(),
        );

        assert_eq!(result.unwrap_err().code, ErrorCode::ValidationFailed);
    }

    #[test]
    fn settle_completed_sets_completion_time() {
        let purchase = pending_purchase();
        let at = Timestamp::now();

        let update = purchase.settle(PurchaseStatus::Completed, at).unwrap();

        assert_eq!(update.completed_at, Some(at));
        assert_eq!(update.updated_at, at);
    }

    #[test]
    fn settle_failed_leaves_completion_time_empty() {
        let purchase = pending_purchase();

        let update = purchase
            .settle(PurchaseStatus::Failed, Timestamp::now())
            .unwrap();

        assert!(update.completed_at.is_none());
    }

    #[test]
    fn settle_rejects_terminal_purchase() {
        let mut purchase = pending_purchase();
        let at = Timestamp::now();
        let update = purchase.settle(PurchaseStatus::Completed, at).unwrap();
        purchase.apply(PurchaseStatus::Completed, update);

        let err = purchase
            .settle(PurchaseStatus::Failed, Timestamp::now())
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::InvalidStateTransition);
        assert!(purchase.is_terminal());
        assert_eq!(purchase.completed_at, Some(at));
    }

    #[test]
    fn settle_rejects_pending_target() {
        let purchase = pending_purchase();
        assert!(purchase
            .settle(PurchaseStatus::Pending, Timestamp::now())
            .is_err());
    }
}
