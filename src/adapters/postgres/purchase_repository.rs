//! PostgreSQL implementation of PurchaseRepository.
//!
//! Settlement is a single `UPDATE ... WHERE status = $expected`. Postgres
//! row locking serializes concurrent updates of the same row and the loser
//! re-evaluates the predicate, so at most one of them reports a row.

use crate::domain::foundation::{
    CourseId, DomainError, ErrorCode, PurchaseId, Timestamp, TransactionRef, UserId,
};
use crate::domain::purchase::{Purchase, PurchaseStatus, PurchaseUpdate};
use crate::ports::PurchaseRepository;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::{corrupt_row, db_error};

const TRANSACTION_REF_KEY: &str = "purchases_transaction_ref_key";

/// PostgreSQL implementation of the PurchaseRepository port.
pub struct PostgresPurchaseRepository {
    pool: PgPool,
}

impl PostgresPurchaseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a purchase.
#[derive(Debug, sqlx::FromRow)]
struct PurchaseRow {
    id: Uuid,
    user_id: String,
    course_id: Uuid,
    amount_cents: i64,
    status: String,
    transaction_ref: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl TryFrom<PurchaseRow> for Purchase {
    type Error = DomainError;

    fn try_from(row: PurchaseRow) -> Result<Self, Self::Error> {
        let status: PurchaseStatus = row.status.parse().map_err(corrupt_row)?;

        Ok(Purchase {
            id: PurchaseId::from_uuid(row.id),
            user_id: UserId::new(row.user_id).map_err(corrupt_row)?,
            course_id: CourseId::from_uuid(row.course_id),
            amount_cents: row.amount_cents,
            status,
            transaction_ref: TransactionRef::new(row.transaction_ref).map_err(corrupt_row)?,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
            completed_at: row.completed_at.map(Timestamp::from_datetime),
        })
    }
}

const PURCHASE_COLUMNS: &str = "id, user_id, course_id, amount_cents, status, transaction_ref, \
     created_at, updated_at, completed_at";

#[async_trait]
impl PurchaseRepository for PostgresPurchaseRepository {
    async fn save(&self, purchase: &Purchase) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO purchases (
                id, user_id, course_id, amount_cents, status, transaction_ref,
                created_at, updated_at, completed_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(purchase.id.as_uuid())
        .bind(purchase.user_id.as_str())
        .bind(purchase.course_id.as_uuid())
        .bind(purchase.amount_cents)
        .bind(purchase.status.as_str())
        .bind(purchase.transaction_ref.as_str())
        .bind(purchase.created_at.as_datetime())
        .bind(purchase.updated_at.as_datetime())
        .bind(purchase.completed_at.map(|t| *t.as_datetime()))
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint() == Some(TRANSACTION_REF_KEY) {
                    return DomainError::new(
                        ErrorCode::Conflict,
                        "Transaction reference already recorded",
                    )
                    .with_detail("transaction_ref", purchase.transaction_ref.to_string());
                }
            }
            db_error("Failed to save purchase", e)
        })?;

        Ok(())
    }

    async fn find_by_id(&self, id: &PurchaseId) -> Result<Option<Purchase>, DomainError> {
        let row: Option<PurchaseRow> = sqlx::query_as(&format!(
            "SELECT {} FROM purchases WHERE id = $1",
            PURCHASE_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to find purchase", e))?;

        row.map(Purchase::try_from).transpose()
    }

    async fn find_by_transaction_ref(
        &self,
        reference: &TransactionRef,
    ) -> Result<Option<Purchase>, DomainError> {
        let row: Option<PurchaseRow> = sqlx::query_as(&format!(
            "SELECT {} FROM purchases WHERE transaction_ref = $1",
            PURCHASE_COLUMNS
        ))
        .bind(reference.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to find purchase", e))?;

        row.map(Purchase::try_from).transpose()
    }

    async fn update_if_status(
        &self,
        id: &PurchaseId,
        expected: PurchaseStatus,
        new_status: PurchaseStatus,
        extra: PurchaseUpdate,
    ) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE purchases SET
                status = $3,
                completed_at = $4,
                updated_at = $5
            WHERE id = $1 AND status = $2
            "#,
        )
        .bind(id.as_uuid())
        .bind(expected.as_str())
        .bind(new_status.as_str())
        .bind(extra.completed_at.map(|t| *t.as_datetime()))
        .bind(extra.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to update purchase", e))?;

        Ok(result.rows_affected() == 1)
    }
}
