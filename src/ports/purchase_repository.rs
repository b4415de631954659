//! Purchase repository port.
//!
//! The only write that settles a purchase is [`PurchaseRepository::update_if_status`],
//! a compare-and-set on the status column. Concurrent deliveries of the same
//! event race on that statement and exactly one of them wins.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, PurchaseId, TransactionRef};
use crate::domain::purchase::{Purchase, PurchaseStatus, PurchaseUpdate};

/// Repository port for Purchase persistence.
#[async_trait]
pub trait PurchaseRepository: Send + Sync {
    /// Records a new purchase.
    ///
    /// # Errors
    ///
    /// - `Conflict` if the transaction reference is already recorded
    /// - `DatabaseError` on persistence failure
    async fn save(&self, purchase: &Purchase) -> Result<(), DomainError>;

    /// Finds a purchase by its id.
    async fn find_by_id(&self, id: &PurchaseId) -> Result<Option<Purchase>, DomainError>;

    /// Finds a purchase by gateway transaction reference.
    async fn find_by_transaction_ref(
        &self,
        reference: &TransactionRef,
    ) -> Result<Option<Purchase>, DomainError>;

    /// Atomically moves a purchase from `expected` to `new_status`, writing
    /// `extra` in the same statement.
    ///
    /// Returns `true` if the row was updated, `false` if the purchase was no
    /// longer in `expected` (or does not exist).
    async fn update_if_status(
        &self,
        id: &PurchaseId,
        expected: PurchaseStatus,
        new_status: PurchaseStatus,
        extra: PurchaseUpdate,
    ) -> Result<bool, DomainError>;
}
